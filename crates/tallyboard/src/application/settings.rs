//! The settings aggregate: load, save, duplicate and equivalence.
//!
//! [`Settings`] holds every user-configurable value of the application.  It
//! is a plain value object: it knows how to read itself from a
//! [`KeyValueStore`] and write itself back, but it does not own the store or
//! the audio backend.  Side effects of mutations (pushing the volume into the
//! backend, saving on volume change, notifying observers) live in
//! [`SettingsService`](super::manage_settings::SettingsService).
//!
//! # Store layout
//!
//! ```text
//! [Size]
//! form=216\t200
//! split=100
//! [Sounds]
//! device=Speakers
//! player=1
//! volume=30
//! Log1=Horn\t/clips/horn.wav |horn2.wav\tADD + SUBTRACT
//! [Settings]
//! counters_disable=False
//! sounds_disable=False
//! Next=MULTIPLY
//! ...
//! [Counters]
//! Log1=Deaths\t/counters/deaths.txt
//! ```
//!
//! # Shared and copied state
//!
//! [`Settings::duplicate`] produces the draft edited by a settings dialog.
//! The counters, sounds and device lists are **shared** with the live value
//! (`Rc<RefCell<..>>`): list edits are immediately visible through both.  The
//! key-binding lists are **deep-copied**: a draft can rebind hotkeys without
//! touching the live bindings until it is committed.

use std::cell::RefCell;
use std::rc::Rc;

use tallyboard_core::codec::{format_bool, format_float, parse_bool, parse_float, parse_int};
use tallyboard_core::domain::geometry::{format_window_size, parse_window_size};
use tallyboard_core::domain::geometry::{FALLBACK_WINDOW_HEIGHT, FALLBACK_WINDOW_WIDTH};
use tallyboard_core::domain::media::{is_row_key, row_key};
use tallyboard_core::{
    device_name_at, resolve_device_index, ColumnWidth, Counter, KeyChord, OutputDevice,
    PlayerBackend, Sound, VKey, WindowGeometry, COUNTER_CHORD_NAMES, SOUND_CHORD_NAMES,
};
use thiserror::Error;
use tracing::{debug, warn};

use super::ports::{AudioBackendFactory, DeviceDirectory, KeyValueStore, StoreError};

/// A list shared between a [`Settings`] value and its duplicates.
pub type Shared<T> = Rc<RefCell<T>>;

/// Volume used when the stored value is missing or malformed.
pub const DEFAULT_VOLUME: u8 = 30;
/// Highest accepted volume.
pub const MAX_VOLUME: u8 = 100;

/// Section and key names of the settings store.
pub mod keys {
    pub const SIZE: &str = "Size";
    pub const FORM: &str = "form";
    pub const SPLIT: &str = "split";

    pub const SOUNDS: &str = "Sounds";
    pub const DEVICE: &str = "device";
    pub const PLAYER: &str = "player";
    pub const VOLUME: &str = "volume";

    pub const SETTINGS: &str = "Settings";
    pub const COUNTERS_DISABLE: &str = "counters_disable";
    pub const SOUNDS_DISABLE: &str = "sounds_disable";

    pub const COUNTERS: &str = "Counters";
}

/// Identifies a settings field in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    PlayerBackend,
    Device,
    Volume,
    DisableCounters,
    DisableSounds,
    WindowWidth,
    WindowHeight,
    SplitterPosition,
    FirstColumnWidth,
    SecondColumnWidth,
    KeyBindingsCounters,
    KeyBindingsSounds,
    Counters,
    Sounds,
}

/// The two groups of fixed hotkey slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordGroup {
    /// `Next, Previous, Up, Down, Reset`.
    Counters,
    /// `Pause, Continue`.
    Sounds,
}

impl ChordGroup {
    /// Finds the group owning slot `name`.
    pub fn of_slot(name: &str) -> Option<ChordGroup> {
        if COUNTER_CHORD_NAMES.contains(&name) {
            Some(ChordGroup::Counters)
        } else if SOUND_CHORD_NAMES.contains(&name) {
            Some(ChordGroup::Sounds)
        } else {
            None
        }
    }

    fn field(self) -> SettingField {
        match self {
            ChordGroup::Counters => SettingField::KeyBindingsCounters,
            ChordGroup::Sounds => SettingField::KeyBindingsSounds,
        }
    }
}

/// Errors raised by settings mutations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown key binding slot: {0}")]
    UnknownChordSlot(String),

    #[error("{list} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown output device: {0}")]
    UnknownDevice(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every user-configurable value of the application.
#[derive(Debug)]
pub struct Settings {
    player_backend: PlayerBackend,
    wmp_available: bool,
    device: usize,
    volume: u8,
    disable_counters: bool,
    disable_sounds: bool,
    geometry: WindowGeometry,
    counters: Shared<Vec<Counter>>,
    sounds: Shared<Vec<Sound>>,
    devices: Shared<Vec<OutputDevice>>,
    key_bindings_counters: Vec<KeyChord>,
    key_bindings_sounds: Vec<KeyChord>,
    initialized: bool,
}

impl Default for Settings {
    /// The values a load from an empty store produces on a machine without
    /// WMP or output devices.  Not initialized.
    fn default() -> Self {
        Self {
            player_backend: PlayerBackend::Native,
            wmp_available: false,
            device: 0,
            volume: DEFAULT_VOLUME,
            disable_counters: false,
            disable_sounds: false,
            geometry: WindowGeometry::default(),
            counters: Shared::default(),
            sounds: Shared::default(),
            devices: Shared::default(),
            key_bindings_counters: COUNTER_CHORD_NAMES
                .iter()
                .map(|name| KeyChord::with_default(*name))
                .collect(),
            key_bindings_sounds: SOUND_CHORD_NAMES
                .iter()
                .map(|name| KeyChord::with_default(*name))
                .collect(),
            initialized: false,
        }
    }
}

impl Settings {
    // ── Loading ──────────────────────────────────────────────────────────────

    /// Reads every setting from `store`.
    ///
    /// The order of reads matters: the splitter derives column widths from
    /// the window size, and the stored device name is resolved against the
    /// device list enumerated just before it.  Malformed values fall back to
    /// defaults; loading never fails.
    ///
    /// The result is not yet initialized, so [`save`](Self::save) is a no-op
    /// until [`mark_initialized`](Self::mark_initialized) is called.
    pub fn load(
        store: &dyn KeyValueStore,
        directory: &dyn DeviceDirectory,
        factory: &dyn AudioBackendFactory,
    ) -> Self {
        let mut settings = Settings::default();

        if let Some(text) = store.read_value(keys::SIZE, keys::FORM) {
            let (width, height) = parse_window_size(&text).unwrap_or_else(|| {
                warn!("malformed window size {text:?}; using fallback size");
                (FALLBACK_WINDOW_WIDTH, FALLBACK_WINDOW_HEIGHT)
            });
            settings.geometry.set_size(width, height);
        }

        // Columns are derived from the loaded width even without a stored splitter.
        let position = store
            .read_value(keys::SIZE, keys::SPLIT)
            .and_then(|text| {
                let parsed = parse_float(&text);
                if parsed.is_none() {
                    warn!("malformed splitter position {text:?}; keeping default");
                }
                parsed
            })
            .unwrap_or_else(|| settings.geometry.splitter_position());
        settings.geometry.set_splitter_position(position);

        settings.wmp_available = factory.is_available(PlayerBackend::Wmp);

        let devices = directory.list_devices();
        let stored_device = store.read_value(keys::SOUNDS, keys::DEVICE);
        settings.device = resolve_device_index(&devices, stored_device.as_deref());
        *settings.devices.borrow_mut() = devices;

        settings.volume = store
            .read_value(keys::SOUNDS, keys::VOLUME)
            .as_deref()
            .and_then(parse_int)
            .map(clamp_volume)
            .unwrap_or(DEFAULT_VOLUME);

        let stored_player = store.read_value(keys::SOUNDS, keys::PLAYER);
        settings.player_backend =
            PlayerBackend::from_stored(stored_player.as_deref(), settings.wmp_available);

        if let Some(value) = read_bool(store, keys::COUNTERS_DISABLE) {
            settings.disable_counters = value;
        }
        if let Some(value) = read_bool(store, keys::SOUNDS_DISABLE) {
            settings.disable_sounds = value;
        }

        settings.key_bindings_counters = read_chords(store, &COUNTER_CHORD_NAMES);
        settings.key_bindings_sounds = read_chords(store, &SOUND_CHORD_NAMES);

        *settings.counters.borrow_mut() = read_rows(store, keys::COUNTERS)
            .iter()
            .map(|row| Counter::decode_row(row))
            .collect();
        *settings.sounds.borrow_mut() = read_rows(store, keys::SOUNDS)
            .iter()
            .map(|row| Sound::decode_row(row))
            .collect();

        debug!(
            counters = settings.counters.borrow().len(),
            sounds = settings.sounds.borrow().len(),
            device = settings.device,
            backend = %settings.player_backend,
            "settings read from store"
        );
        settings
    }

    /// Produces a draft copy for a settings dialog.
    ///
    /// Counters, sounds and devices are shared with `self`; key bindings are
    /// deep-copied.  The copy is initialized.
    pub fn duplicate(&self) -> Settings {
        Settings {
            player_backend: self.player_backend,
            wmp_available: self.wmp_available,
            device: self.device,
            volume: self.volume,
            disable_counters: self.disable_counters,
            disable_sounds: self.disable_sounds,
            geometry: self.geometry,
            // Shared: the same underlying containers.
            counters: Rc::clone(&self.counters),
            sounds: Rc::clone(&self.sounds),
            devices: Rc::clone(&self.devices),
            // Deep copies.
            key_bindings_counters: self.key_bindings_counters.clone(),
            key_bindings_sounds: self.key_bindings_sounds.clone(),
            initialized: true,
        }
    }

    /// Allows [`save`](Self::save) to write.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    // ── Saving ───────────────────────────────────────────────────────────────

    /// Writes every setting to `store` and flushes it.
    ///
    /// Returns `Ok(false)` without touching the store while the settings are
    /// not initialized.
    ///
    /// Counter and sound rows are rewritten from scratch: every `Log{n}` key
    /// present in those sections is removed first, whatever its index, so a
    /// shrinking list never leaves stale rows behind.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from [`KeyValueStore::flush`].
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<bool, StoreError> {
        if !self.initialized {
            debug!("settings not initialized yet; skipping save");
            return Ok(false);
        }
        let portable = store.is_portable();

        store.write_value(
            keys::SIZE,
            keys::FORM,
            &format_window_size(self.geometry.width(), self.geometry.height()),
        );
        store.write_value(
            keys::SIZE,
            keys::SPLIT,
            &format_float(self.geometry.splitter_position()),
        );

        let device_name = device_name_at(&self.devices.borrow(), self.device)
            .unwrap_or_default()
            .to_string();
        store.write_value(keys::SOUNDS, keys::DEVICE, &device_name);
        store.write_value(keys::SOUNDS, keys::PLAYER, &self.player_backend.stored_value());
        store.write_value(keys::SOUNDS, keys::VOLUME, &self.volume.to_string());
        store.write_value(
            keys::SETTINGS,
            keys::COUNTERS_DISABLE,
            format_bool(self.disable_counters),
        );
        store.write_value(
            keys::SETTINGS,
            keys::SOUNDS_DISABLE,
            format_bool(self.disable_sounds),
        );

        for chord in self
            .key_bindings_counters
            .iter()
            .chain(&self.key_bindings_sounds)
        {
            store.write_value(keys::SETTINGS, chord.name(), &chord.encode());
        }

        clear_rows(store, keys::COUNTERS);
        clear_rows(store, keys::SOUNDS);

        for (i, counter) in self.counters.borrow().iter().enumerate() {
            store.write_value(keys::COUNTERS, &row_key(i + 1), &counter.encode_row(portable));
        }
        for (i, sound) in self.sounds.borrow().iter().enumerate() {
            store.write_value(keys::SOUNDS, &row_key(i + 1), &sound.encode_row(portable));
        }

        store.flush()?;
        debug!(portable, "settings saved");
        Ok(true)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn player_backend(&self) -> PlayerBackend {
        self.player_backend
    }

    /// Whether the WMP backend could be constructed when the settings loaded.
    pub fn wmp_available(&self) -> bool {
        self.wmp_available
    }

    pub fn device(&self) -> usize {
        self.device
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn disable_counters(&self) -> bool {
        self.disable_counters
    }

    pub fn disable_sounds(&self) -> bool {
        self.disable_sounds
    }

    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    pub fn counters(&self) -> &Shared<Vec<Counter>> {
        &self.counters
    }

    pub fn sounds(&self) -> &Shared<Vec<Sound>> {
        &self.sounds
    }

    pub fn devices(&self) -> &Shared<Vec<OutputDevice>> {
        &self.devices
    }

    pub fn key_bindings_counters(&self) -> &[KeyChord] {
        &self.key_bindings_counters
    }

    pub fn key_bindings_sounds(&self) -> &[KeyChord] {
        &self.key_bindings_sounds
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Looks up a hotkey slot by name in either group.
    pub fn key_binding(&self, name: &str) -> Option<&KeyChord> {
        self.key_bindings_counters
            .iter()
            .chain(&self.key_bindings_sounds)
            .find(|chord| chord.name() == name)
    }

    // ── Mutations ────────────────────────────────────────────────────────────
    //
    // Each mutation returns the fields it changed.  None of them has side
    // effects outside this value.

    pub fn set_player_backend(&mut self, backend: PlayerBackend) -> Vec<SettingField> {
        self.player_backend = backend;
        vec![SettingField::PlayerBackend]
    }

    /// Selects the output device at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] if there is no such device.
    pub fn set_device(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        let len = self.devices.borrow().len();
        if index >= len {
            return Err(SettingsError::IndexOutOfRange {
                list: "devices",
                index,
                len,
            });
        }
        self.device = index;
        Ok(vec![SettingField::Device])
    }

    /// Sets the volume, clamped to `0..=100`.
    pub fn set_volume(&mut self, volume: u8) -> Vec<SettingField> {
        self.volume = volume.min(MAX_VOLUME);
        vec![SettingField::Volume]
    }

    pub fn set_disable_counters(&mut self, disabled: bool) -> Vec<SettingField> {
        self.disable_counters = disabled;
        vec![SettingField::DisableCounters]
    }

    pub fn set_disable_sounds(&mut self, disabled: bool) -> Vec<SettingField> {
        self.disable_sounds = disabled;
        vec![SettingField::DisableSounds]
    }

    pub fn set_window_size(&mut self, width: f64, height: f64) -> Vec<SettingField> {
        self.geometry.set_size(width, height);
        vec![SettingField::WindowWidth, SettingField::WindowHeight]
    }

    /// Moves the splitter; both column widths are derived from it.
    pub fn set_splitter_position(&mut self, position: f64) -> Vec<SettingField> {
        self.geometry.set_splitter_position(position);
        vec![
            SettingField::FirstColumnWidth,
            SettingField::SecondColumnWidth,
            SettingField::SplitterPosition,
        ]
    }

    /// Sets the first column width; the splitter and second column follow.
    pub fn set_first_column_width(&mut self, width: ColumnWidth) -> Vec<SettingField> {
        self.geometry.set_first_column_width(width);
        vec![
            SettingField::FirstColumnWidth,
            SettingField::SecondColumnWidth,
            SettingField::SplitterPosition,
        ]
    }

    /// Rebinds hotkey slot `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownChordSlot`] if `name` is not one of the
    /// fixed slots.
    pub fn set_key_binding(
        &mut self,
        name: &str,
        keys: Vec<VKey>,
    ) -> Result<Vec<SettingField>, SettingsError> {
        let group =
            ChordGroup::of_slot(name).ok_or_else(|| SettingsError::UnknownChordSlot(name.to_string()))?;
        let chords = match group {
            ChordGroup::Counters => &mut self.key_bindings_counters,
            ChordGroup::Sounds => &mut self.key_bindings_sounds,
        };
        let chord = chords
            .iter_mut()
            .find(|chord| chord.name() == name)
            .ok_or_else(|| SettingsError::UnknownChordSlot(name.to_string()))?;
        chord.set_keys(keys);
        Ok(vec![group.field()])
    }

    /// Appends a counter.
    pub fn add_counter(&mut self, counter: Counter) -> Vec<SettingField> {
        self.counters.borrow_mut().push(counter);
        vec![SettingField::Counters]
    }

    /// Removes the counter at 0-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] for a bad index.
    pub fn remove_counter(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        remove_at(&self.counters, "counters", index)?;
        Ok(vec![SettingField::Counters])
    }

    /// Appends a sound.
    pub fn add_sound(&mut self, sound: Sound) -> Vec<SettingField> {
        self.sounds.borrow_mut().push(sound);
        vec![SettingField::Sounds]
    }

    /// Removes the sound at 0-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] for a bad index.
    pub fn remove_sound(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        remove_at(&self.sounds, "sounds", index)?;
        Ok(vec![SettingField::Sounds])
    }
}

/// Compares the fields a settings dialog can change.
///
/// Only the backend, the device, both feature toggles and the key sequences
/// of both hotkey lists (position by position, names ignored) take part.
/// Window geometry, volume and the counter/sound lists are ignored.
pub fn settings_equivalent(a: &Settings, b: &Settings) -> bool {
    a.player_backend == b.player_backend
        && a.device == b.device
        && a.disable_counters == b.disable_counters
        && a.disable_sounds == b.disable_sounds
        && chords_match(&a.key_bindings_counters, &b.key_bindings_counters)
        && chords_match(&a.key_bindings_sounds, &b.key_bindings_sounds)
}

fn chords_match(a: &[KeyChord], b: &[KeyChord]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_keys(y))
}

fn clamp_volume(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_VOLUME)) as u8
}

fn read_bool(store: &dyn KeyValueStore, key: &str) -> Option<bool> {
    let text = store.read_value(keys::SETTINGS, key)?;
    let value = parse_bool(&text);
    if value.is_none() {
        debug!("ignoring malformed {key}={text:?}");
    }
    value
}

fn read_chords(store: &dyn KeyValueStore, names: &[&str]) -> Vec<KeyChord> {
    names
        .iter()
        .map(|name| KeyChord::decode(*name, store.read_value(keys::SETTINGS, name).as_deref()))
        .collect()
}

/// Reads `Log1`, `Log2`, ... until the first missing or blank row.
fn read_rows(store: &dyn KeyValueStore, section: &str) -> Vec<String> {
    let mut rows = Vec::new();
    for index in 1.. {
        match store.read_value(section, &row_key(index)) {
            Some(row) if !row.trim().is_empty() => rows.push(row),
            _ => break,
        }
    }
    rows
}

/// Removes every indexed row key from `section`, including keys past a gap.
fn clear_rows(store: &mut dyn KeyValueStore, section: &str) {
    for key in store.keys(section) {
        if is_row_key(&key) {
            store.remove_value(section, &key);
        }
    }
}

fn remove_at<T>(list: &Shared<Vec<T>>, name: &'static str, index: usize) -> Result<T, SettingsError> {
    let mut items = list.borrow_mut();
    if index >= items.len() {
        return Err(SettingsError::IndexOutOfRange {
            list: name,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

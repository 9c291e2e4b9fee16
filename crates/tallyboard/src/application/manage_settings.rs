//! SettingsService: the single entry point for changing settings.
//!
//! The service owns the store, the live [`Settings`] value, the active audio
//! backend and the list of change subscribers.  Every mutation:
//!
//! 1. updates the [`Settings`] value,
//! 2. applies any live side effect (backend volume, backend device, backend
//!    reconstruction),
//! 3. publishes each changed [`SettingField`] to every subscriber,
//! 4. returns the changed fields to the caller.
//!
//! Only the volume setter saves immediately.  Everything else is persisted
//! by the next [`save`](SettingsService::save) or
//! [`commit`](SettingsService::commit).
//!
//! # Why channels? (for beginners)
//!
//! A UI that shows the settings needs to know when something changes.
//! Instead of registering callbacks on the model, a consumer calls
//! [`subscribe`](SettingsService::subscribe) and gets a
//! [`std::sync::mpsc::Receiver`].  The service sends into every live channel
//! before the mutation returns, so a consumer that drains its receiver after
//! a call sees every change that call made.

use std::sync::mpsc::{self, Receiver, Sender};

use tallyboard_core::{ColumnWidth, Counter, PlayerBackend, Sound, VKey};
use tracing::{debug, info, warn};

use super::ports::{
    AudioBackend, AudioBackendFactory, DeviceDirectory, KeyValueStore, StoreError,
};
use super::settings::{settings_equivalent, SettingField, Settings, SettingsError};

/// Owns the live settings and keeps the audio backend in sync with them.
pub struct SettingsService<S: KeyValueStore> {
    store: S,
    settings: Settings,
    backend: Box<dyn AudioBackend>,
    factory: Box<dyn AudioBackendFactory>,
    subscribers: Vec<Sender<SettingField>>,
}

impl<S: KeyValueStore> SettingsService<S> {
    /// Loads the settings from `store` and brings the backend up to date.
    ///
    /// The backend is created for the loaded backend kind.  The loaded device
    /// is pushed into it (Native only), then the loaded volume.  Afterwards a
    /// store opened from the legacy location is redirected to the default
    /// one and the settings become initialized.
    pub fn load(
        mut store: S,
        directory: &dyn DeviceDirectory,
        factory: Box<dyn AudioBackendFactory>,
    ) -> Self {
        let mut settings = Settings::load(&store, directory, factory.as_ref());

        let mut backend = factory.create(settings.player_backend());
        apply_to_backend(backend.as_mut(), &settings);

        if store.migrate_legacy_location() {
            info!("settings will be written to the default location from now on");
        }
        settings.mark_initialized();

        info!(
            backend = %settings.player_backend(),
            volume = settings.volume(),
            device = settings.device(),
            counters = settings.counters().borrow().len(),
            sounds = settings.sounds().borrow().len(),
            "settings loaded"
        );

        Self {
            store,
            settings,
            backend,
            factory,
            subscribers: Vec::new(),
        }
    }

    /// Returns a receiver that gets every field changed from now on.
    pub fn subscribe(&mut self) -> Receiver<SettingField> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn backend(&self) -> &dyn AudioBackend {
        self.backend.as_ref()
    }

    /// Writes the whole model to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be flushed.
    pub fn save(&mut self) -> Result<bool, StoreError> {
        self.settings.save(&mut self.store)
    }

    // ── Live mutations ───────────────────────────────────────────────────────

    /// Switches the audio backend.
    ///
    /// A fresh backend is created through the factory and receives the
    /// current device (Native only) and volume.  Asking for WMP on a machine
    /// without it selects Native instead.
    pub fn set_player_backend(&mut self, backend: PlayerBackend) -> Vec<SettingField> {
        let backend = if backend == PlayerBackend::Wmp && !self.settings.wmp_available() {
            warn!("WMP backend is not available on this machine; using native");
            PlayerBackend::Native
        } else {
            backend
        };

        let changed = self.settings.set_player_backend(backend);
        self.backend = self.factory.create(backend);
        apply_to_backend(self.backend.as_mut(), &self.settings);
        debug!(%backend, "audio backend recreated");
        self.publish(changed)
    }

    /// Selects the output device at `index` and routes the backend to it.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] if there is no such device.
    pub fn set_device(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        let changed = self.settings.set_device(index)?;
        self.backend.set_device(index);
        Ok(self.publish(changed))
    }

    /// Selects the output device called `name` (suffix-stripped, exact).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownDevice`] if no device has that name.
    pub fn set_device_by_name(&mut self, name: &str) -> Result<Vec<SettingField>, SettingsError> {
        let index = self
            .settings
            .devices()
            .borrow()
            .iter()
            .position(|device| device.name() == name)
            .ok_or_else(|| SettingsError::UnknownDevice(name.to_string()))?;
        self.set_device(index)
    }

    /// Sets the volume, pushes it into the backend and saves immediately.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the save fails.  The in-memory value and the
    /// backend are already updated at that point.
    pub fn set_volume(&mut self, volume: u8) -> Result<Vec<SettingField>, StoreError> {
        let changed = self.settings.set_volume(volume);
        self.backend.set_volume(self.settings.volume());
        let changed = self.publish(changed);
        self.settings.save(&mut self.store)?;
        Ok(changed)
    }

    pub fn set_disable_counters(&mut self, disabled: bool) -> Vec<SettingField> {
        let changed = self.settings.set_disable_counters(disabled);
        self.publish(changed)
    }

    pub fn set_disable_sounds(&mut self, disabled: bool) -> Vec<SettingField> {
        let changed = self.settings.set_disable_sounds(disabled);
        self.publish(changed)
    }

    pub fn set_window_size(&mut self, width: f64, height: f64) -> Vec<SettingField> {
        let changed = self.settings.set_window_size(width, height);
        self.publish(changed)
    }

    pub fn set_splitter_position(&mut self, position: f64) -> Vec<SettingField> {
        let changed = self.settings.set_splitter_position(position);
        self.publish(changed)
    }

    pub fn set_first_column_width(&mut self, width: ColumnWidth) -> Vec<SettingField> {
        let changed = self.settings.set_first_column_width(width);
        self.publish(changed)
    }

    /// Rebinds hotkey slot `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownChordSlot`] for an unknown slot.
    pub fn set_key_binding(
        &mut self,
        name: &str,
        keys: Vec<VKey>,
    ) -> Result<Vec<SettingField>, SettingsError> {
        let changed = self.settings.set_key_binding(name, keys)?;
        Ok(self.publish(changed))
    }

    pub fn add_counter(&mut self, counter: Counter) -> Vec<SettingField> {
        let changed = self.settings.add_counter(counter);
        self.publish(changed)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] for a bad index.
    pub fn remove_counter(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        let changed = self.settings.remove_counter(index)?;
        Ok(self.publish(changed))
    }

    pub fn add_sound(&mut self, sound: Sound) -> Vec<SettingField> {
        let changed = self.settings.add_sound(sound);
        self.publish(changed)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::IndexOutOfRange`] for a bad index.
    pub fn remove_sound(&mut self, index: usize) -> Result<Vec<SettingField>, SettingsError> {
        let changed = self.settings.remove_sound(index)?;
        Ok(self.publish(changed))
    }

    // ── Dialog drafts ────────────────────────────────────────────────────────

    /// Returns a draft for a settings dialog.
    ///
    /// See [`Settings::duplicate`] for what the draft shares with the live
    /// settings.
    pub fn draft(&self) -> Settings {
        self.settings.duplicate()
    }

    /// Applies a draft edited in a settings dialog and saves.
    ///
    /// Only the fields [`settings_equivalent`] compares are taken from the
    /// draft, each through its live setter so the backend follows.  Returns
    /// the changed fields; an equivalent draft changes nothing but is still
    /// saved.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the draft's device is out of range or the
    /// save fails.
    pub fn commit(&mut self, draft: &Settings) -> Result<Vec<SettingField>, SettingsError> {
        let mut changed = Vec::new();

        if !settings_equivalent(&self.settings, draft) {
            if draft.player_backend() != self.settings.player_backend() {
                changed.extend(self.set_player_backend(draft.player_backend()));
            }
            if draft.device() != self.settings.device() {
                changed.extend(self.set_device(draft.device())?);
            }
            if draft.disable_counters() != self.settings.disable_counters() {
                changed.extend(self.set_disable_counters(draft.disable_counters()));
            }
            if draft.disable_sounds() != self.settings.disable_sounds() {
                changed.extend(self.set_disable_sounds(draft.disable_sounds()));
            }
            for chord in draft
                .key_bindings_counters()
                .iter()
                .chain(draft.key_bindings_sounds())
            {
                let differs = self
                    .settings
                    .key_binding(chord.name())
                    .is_some_and(|live| !live.same_keys(chord));
                if differs {
                    for field in self.set_key_binding(chord.name(), chord.keys().to_vec())? {
                        if !changed.contains(&field) {
                            changed.push(field);
                        }
                    }
                }
            }
        }

        self.save()?;
        debug!(changed = changed.len(), "settings draft committed");
        Ok(changed)
    }

    fn publish(&mut self, changed: Vec<SettingField>) -> Vec<SettingField> {
        self.subscribers
            .retain(|tx| changed.iter().all(|field| tx.send(*field).is_ok()));
        changed
    }
}

/// Pushes the current device (if the backend routes devices) and volume.
fn apply_to_backend(backend: &mut dyn AudioBackend, settings: &Settings) {
    if backend.kind().supports_device_routing() {
        backend.set_device(settings.device());
    }
    backend.set_volume(settings.volume());
}

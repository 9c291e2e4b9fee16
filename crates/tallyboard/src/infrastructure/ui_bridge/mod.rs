//! Presentation bridge: renders the live settings for a front end.
//!
//! # Data Transfer Objects (DTOs)
//!
//! The settings model uses internal types (`Rc<RefCell<..>>` lists,
//! `PathBuf`, `VKey`) that a front end should not depend on.  DTOs are
//! simple structs that:
//!
//! - Contain only plain serialisable fields (`String`, `f64`, `u8`, ...).
//! - Derive `Serialize`/`Deserialize`, so the same snapshot can be printed
//!   as TOML for a human or as JSON for a script.
//!
//! A DTO is a snapshot.  It is rebuilt from [`Settings`] whenever a change
//! notification arrives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tallyboard_core::domain::key_chord::encode_keys;
use tallyboard_core::{device_name_at, KeyChord};

use crate::application::settings::Settings;

/// Error type for rendering a settings snapshot.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render settings as TOML: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("failed to render settings as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format of [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Toml,
    Json,
}

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// Snapshot of every setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDto {
    pub player: String,
    pub wmp_available: bool,
    pub device_index: usize,
    /// Empty when the index does not name an enumerated device.
    pub device_name: String,
    pub volume: u8,
    pub counters_disabled: bool,
    pub sounds_disabled: bool,
    pub devices: Vec<String>,
    pub window: WindowDto,
    pub counter_keys: Vec<ChordDto>,
    pub sound_keys: Vec<ChordDto>,
    pub counters: Vec<CounterDto>,
    pub sounds: Vec<SoundDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDto {
    pub width: f64,
    pub height: f64,
    pub splitter: f64,
    pub first_column: f64,
    pub second_column: f64,
}

/// A hotkey slot and its chord in store notation (`"CONTROL + KEY_R"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordDto {
    pub slot: String,
    pub keys: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterDto {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDto {
    pub name: String,
    pub files: Vec<String>,
    pub keys: String,
}

impl From<&KeyChord> for ChordDto {
    fn from(chord: &KeyChord) -> Self {
        Self {
            slot: chord.name().to_string(),
            keys: chord.encode(),
        }
    }
}

impl From<&Settings> for SettingsDto {
    fn from(settings: &Settings) -> Self {
        let devices = settings.devices().borrow();
        let geometry = settings.geometry();

        Self {
            player: settings.player_backend().to_string(),
            wmp_available: settings.wmp_available(),
            device_index: settings.device(),
            device_name: device_name_at(&devices, settings.device())
                .unwrap_or_default()
                .to_string(),
            volume: settings.volume(),
            counters_disabled: settings.disable_counters(),
            sounds_disabled: settings.disable_sounds(),
            devices: devices.iter().map(|d| d.name().to_string()).collect(),
            window: WindowDto {
                width: geometry.width(),
                height: geometry.height(),
                splitter: geometry.splitter_position(),
                first_column: geometry.first_column().value,
                second_column: geometry.second_column().value,
            },
            counter_keys: settings.key_bindings_counters().iter().map(ChordDto::from).collect(),
            sound_keys: settings.key_bindings_sounds().iter().map(ChordDto::from).collect(),
            counters: settings
                .counters()
                .borrow()
                .iter()
                .map(|c| CounterDto {
                    name: c.name.clone(),
                    file: c.file_path.display().to_string(),
                })
                .collect(),
            sounds: settings
                .sounds()
                .borrow()
                .iter()
                .map(|s| SoundDto {
                    name: s.name.clone(),
                    files: s.paths().iter().map(|p| p.display().to_string()).collect(),
                    keys: encode_keys(&s.keys),
                })
                .collect(),
        }
    }
}

/// Renders a snapshot of `settings` in `format`.
///
/// # Errors
///
/// Returns [`ReportError`] if serialisation fails.
pub fn render(settings: &Settings, format: ReportFormat) -> Result<String, ReportError> {
    let dto = SettingsDto::from(settings);
    match format {
        ReportFormat::Toml => Ok(toml::to_string_pretty(&dto)?),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&dto)?),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::KeyValueStore;
    use crate::infrastructure::audio::NullBackendFactory;
    use crate::infrastructure::devices::StaticDeviceDirectory;
    use crate::infrastructure::storage::IniDocument;

    fn loaded() -> Settings {
        let mut store = IniDocument::default();
        store.write_value("Sounds", "device", "Headphones");
        store.write_value("Sounds", "Log1", "Horn\tclips/horn.wav |horn2.wav\tADD + SUBTRACT");
        store.write_value("Counters", "Log1", "Deaths\tdeaths.txt");
        Settings::load(
            &store,
            &StaticDeviceDirectory::new(["Speakers (Realtek)", "Headphones (USB)"]),
            &NullBackendFactory::new(false),
        )
    }

    #[test]
    fn test_dto_captures_device_name_and_rows() {
        // Arrange / Act
        let dto = SettingsDto::from(&loaded());

        // Assert
        assert_eq!(dto.player, "native");
        assert_eq!(dto.device_index, 1);
        assert_eq!(dto.device_name, "Headphones");
        assert_eq!(dto.devices, vec!["Speakers", "Headphones"]);
        assert_eq!(dto.counters[0].name, "Deaths");
        assert_eq!(dto.sounds[0].files.len(), 2);
        assert_eq!(dto.sounds[0].keys, "ADD + SUBTRACT");
        assert_eq!(dto.counter_keys[0], ChordDto { slot: "Next".into(), keys: "MULTIPLY".into() });
    }

    #[test]
    fn test_render_json_round_trips_through_dto() {
        let settings = loaded();

        let json = render(&settings, ReportFormat::Json).expect("render json");
        let parsed: SettingsDto = serde_json::from_str(&json).expect("parse json");

        assert_eq!(parsed, SettingsDto::from(&settings));
    }

    #[test]
    fn test_render_toml_contains_tables() {
        let toml_text = render(&loaded(), ReportFormat::Toml).expect("render toml");

        assert!(toml_text.contains("player = \"native\""));
        assert!(toml_text.contains("[window]"));
        assert!(toml_text.contains("[[sounds]]"));
    }
}

//! Command-line interface.
//!
//! Every subcommand opens the settings store, loads it through
//! [`SettingsService`], applies at most one mutation and saves.  `show`
//! prints a snapshot instead.
//!
//! ```text
//! tallyboard show --format json
//! tallyboard set-volume 75
//! tallyboard bind Next "CONTROL + KEY_N"
//! tallyboard add-sound Horn --file clips/horn.wav --file clips/horn2.wav --keys "ADD + SUBTRACT"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use tallyboard_core::domain::key_chord::parse_chord;
use tallyboard_core::{Counter, FilePathGroup, PlayerBackend, Sound, VKey};

use crate::application::manage_settings::SettingsService;
use crate::application::settings::SettingField;
use crate::infrastructure::audio::NullBackendFactory;
use crate::infrastructure::devices::{StaticDeviceDirectory, DEFAULT_DEVICE_NAME};
use crate::infrastructure::storage::{IniFileStore, StoreLocation};
use crate::infrastructure::ui_bridge::{render, ReportFormat};

/// Tallyboard settings tool.
///
/// Reads and edits the counter/soundboard settings file.
#[derive(Debug, Parser)]
#[command(name = "tallyboard", about = "Inspect and edit Tallyboard settings", version)]
pub struct Cli {
    /// Settings file to use instead of the discovered location.
    #[arg(long, env = "TALLYBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat `--config` as a portable store (file names only, no absolute
    /// anchor paths).
    #[arg(long, requires = "config")]
    pub portable: bool,

    /// Output device product names, in enumeration order.
    ///
    /// Accepts a comma-separated list or the flag repeated.
    #[arg(
        long = "device-name",
        value_delimiter = ',',
        default_value = DEFAULT_DEVICE_NAME,
        env = "TALLYBOARD_DEVICES"
    )]
    pub device_names: Vec<String>,

    /// Whether the WMP backend can be constructed.  Defaults to `true` on
    /// Windows only.
    #[arg(long, env = "TALLYBOARD_WMP")]
    pub wmp_available: Option<bool>,

    /// `tracing` level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info", env = "TALLYBOARD_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current settings (the default).
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
    /// Set the playback volume (0-100) and save.
    SetVolume { volume: u8 },
    /// Route playback to the named output device.
    SetDevice { name: String },
    /// Select the audio backend (`wmp` or `native`).
    SetBackend { backend: PlayerBackend },
    /// Turn counters or sounds on or off.
    Toggle { feature: Feature, state: Switch },
    /// Bind a hotkey slot (`Next`, `Previous`, `Up`, `Down`, `Reset`,
    /// `Pause`, `Continue`) to a chord such as `"CONTROL + KEY_R"`.
    ///
    /// An empty chord clears the slot.  `Next`, `Up` and `Down` have
    /// built-in defaults, so a cleared one comes back as its default on the
    /// next load.
    Bind { slot: String, chord: String },
    /// Append a counter backed by a text file.
    AddCounter { name: String, path: PathBuf },
    /// Remove the counter at 1-based position INDEX.
    RemoveCounter { index: usize },
    /// Append a sound.  Clips after the first are expected in the first
    /// clip's directory.
    AddSound {
        name: String,
        #[arg(long = "file", required = true)]
        files: Vec<PathBuf>,
        #[arg(long, default_value = "")]
        keys: String,
    },
    /// Remove the sound at 1-based position INDEX.
    RemoveSound { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Toml,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Feature {
    Counters,
    Sounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => ReportFormat::Toml,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    /// Resolves the store location from `--config` or the platform default.
    ///
    /// # Errors
    ///
    /// Fails when no `--config` is given and the platform config directory
    /// cannot be determined.
    pub fn store_location(&self) -> anyhow::Result<StoreLocation> {
        match &self.config {
            Some(path) => Ok(StoreLocation::explicit(path, self.portable)),
            None => StoreLocation::discover().context("failed to locate the settings file"),
        }
    }
}

/// Runs the parsed command.
///
/// Returns the text to print, if any.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved, or if an argument
/// names an unknown device, slot, key or index.
pub fn execute(cli: Cli) -> anyhow::Result<Option<String>> {
    let location = cli.store_location()?;
    info!(path = %location.path.display(), portable = location.portable, "opening settings");
    let store = IniFileStore::open(location).context("failed to open the settings file")?;

    let directory = StaticDeviceDirectory::new(cli.device_names);
    let factory = NullBackendFactory::new(cli.wmp_available.unwrap_or(cfg!(windows)));
    let mut service = SettingsService::load(store, &directory, Box::new(factory));

    let command = cli.command.unwrap_or(Command::Show {
        format: OutputFormat::Toml,
    });

    let changed: Vec<SettingField> = match command {
        Command::Show { format } => {
            let text = render(service.settings(), format.into())?;
            return Ok(Some(text));
        }
        Command::SetVolume { volume } => {
            // Saves on its own.
            let changed = service.set_volume(volume).context("failed to save volume")?;
            info!(?changed, "settings updated");
            return Ok(None);
        }
        Command::SetDevice { name } => service.set_device_by_name(&name)?,
        Command::SetBackend { backend } => service.set_player_backend(backend),
        Command::Toggle { feature, state } => {
            let disabled = state == Switch::Off;
            match feature {
                Feature::Counters => service.set_disable_counters(disabled),
                Feature::Sounds => service.set_disable_sounds(disabled),
            }
        }
        Command::Bind { slot, chord } => {
            let keys = parse_keys(&chord)?;
            service.set_key_binding(&slot, keys)?
        }
        Command::AddCounter { name, path } => service.add_counter(Counter::new(name, path)),
        Command::RemoveCounter { index } => service.remove_counter(to_zero_based(index)?)?,
        Command::AddSound { name, files, keys } => {
            let keys = parse_keys(&keys)?;
            service.add_sound(Sound::new(name, FilePathGroup::new(files), keys))
        }
        Command::RemoveSound { index } => service.remove_sound(to_zero_based(index)?)?,
    };

    service.save().context("failed to save settings")?;
    info!(?changed, "settings updated");
    Ok(None)
}

/// Parses a chord typed on the command line.  Blank means no keys.
fn parse_keys(text: &str) -> anyhow::Result<Vec<VKey>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_chord(text).with_context(|| format!("invalid key chord '{text}'"))
}

fn to_zero_based(index: usize) -> anyhow::Result<usize> {
    index
        .checked_sub(1)
        .context("positions start at 1")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

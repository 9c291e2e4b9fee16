//! Collaborator traits the settings engine depends on.
//!
//! The application layer never touches files or audio APIs directly.  It
//! talks to these traits; the infrastructure layer provides the real
//! implementations, and tests substitute in-memory or mock ones.
//!
//! | Trait                 | Production implementation                    |
//! |-----------------------|----------------------------------------------|
//! | [`KeyValueStore`]     | `infrastructure::storage::IniFileStore`      |
//! | [`DeviceDirectory`]   | `infrastructure::devices::StaticDeviceDirectory` |
//! | [`AudioBackendFactory`] | `infrastructure::audio::NullBackendFactory` |

use std::path::PathBuf;

use tallyboard_core::{OutputDevice, PlayerBackend};
use thiserror::Error;

/// Error type for settings store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A flat section/key → string store.
///
/// Reads return `None` for missing keys; writes create the section and key
/// as needed.  Implementations may buffer writes until [`flush`](Self::flush).
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Returns the value stored under `section`/`key`.
    fn read_value(&self, section: &str, key: &str) -> Option<String>;

    /// Stores `value` under `section`/`key`, replacing any previous value.
    fn write_value(&mut self, section: &str, key: &str, value: &str);

    /// Deletes `section`/`key` if present.
    fn remove_value(&mut self, section: &str, key: &str);

    /// Lists the keys currently present in `section`, in file order.
    fn keys(&self, section: &str) -> Vec<String>;

    /// Returns `true` when the store lives next to the executable and must
    /// not record machine-specific absolute paths.
    fn is_portable(&self) -> bool;

    /// Persists buffered writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backing file cannot be written.
    fn flush(&mut self) -> Result<(), StoreError>;

    /// Redirects future writes from a legacy file location to the current
    /// default one.  Returns `true` if a redirect took place.
    fn migrate_legacy_location(&mut self) -> bool {
        false
    }
}

/// Enumerates the audio output devices of this machine.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceDirectory {
    /// Returns the devices in the order the audio subsystem numbers them.
    fn list_devices(&self) -> Vec<OutputDevice>;
}

/// An audio-playback implementation.
pub trait AudioBackend {
    /// Which backend this is.
    fn kind(&self) -> PlayerBackend;

    /// Sets the playback volume, `0..=100`.
    fn set_volume(&mut self, volume: u8);

    /// Routes playback to the device at `index` in the device directory.
    ///
    /// Backends without per-device routing ignore this call.
    fn set_device(&mut self, index: usize);
}

/// Constructs audio backends by kind.
pub trait AudioBackendFactory {
    /// Capability probe: can a backend of `kind` be constructed here?
    fn is_available(&self, kind: PlayerBackend) -> bool;

    /// Constructs a fresh backend of `kind`.
    fn create(&self, kind: PlayerBackend) -> Box<dyn AudioBackend>;
}

//! Audio player backend selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when text does not name a player backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown player backend {0:?} (expected \"wmp\" or \"native\")")]
pub struct UnknownBackendError(pub String);

/// Which audio-playback implementation plays the sounds.
///
/// The discriminant is the value persisted under `Sounds/player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlayerBackend {
    /// Windows Media Player control.  Only usable when installed.
    Wmp = 0,
    /// Built-in wave-out player with per-device routing.
    Native = 1,
}

impl PlayerBackend {
    /// Persisted integer form (`"0"` or `"1"`).
    pub fn stored_value(self) -> String {
        (self as u8).to_string()
    }

    /// Decodes `Sounds/player`.
    ///
    /// WMP is chosen only when it is available on this machine AND the stored
    /// text is exactly WMP's integer form; everything else selects
    /// [`PlayerBackend::Native`].
    pub fn from_stored(stored: Option<&str>, wmp_available: bool) -> Self {
        if wmp_available && stored == Some(PlayerBackend::Wmp.stored_value().as_str()) {
            PlayerBackend::Wmp
        } else {
            PlayerBackend::Native
        }
    }

    /// Returns `true` if the backend can route output to a chosen device.
    pub fn supports_device_routing(self) -> bool {
        matches!(self, PlayerBackend::Native)
    }
}

impl fmt::Display for PlayerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerBackend::Wmp => f.write_str("wmp"),
            PlayerBackend::Native => f.write_str("native"),
        }
    }
}

impl FromStr for PlayerBackend {
    type Err = UnknownBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wmp" => Ok(PlayerBackend::Wmp),
            "native" => Ok(PlayerBackend::Native),
            _ => Err(UnknownBackendError(s.to_string())),
        }
    }
}

//! Where the settings file lives.
//!
//! Three candidate files are checked, in order:
//!
//! | Mode     | Path                                       |
//! |----------|--------------------------------------------|
//! | Portable | `<exe dir>/tallyboard.ini`                 |
//! | Default  | `<config base>/tallyboard/config.ini`      |
//! | Legacy   | `<config base>/tallyboard.ini`             |
//!
//! The config base is the platform convention:
//! - Windows:  `%APPDATA%`
//! - Linux:    `$XDG_CONFIG_HOME` or `~/.config`
//! - macOS:    `~/Library/Application Support`
//!
//! A portable file next to the executable always wins and switches the store
//! into portable mode.  A legacy file is read only while no default file
//! exists; the first save after startup writes to the default path instead.

use std::path::{Path, PathBuf};

use crate::application::ports::StoreError;

/// File name of the portable store, next to the executable.
pub const PORTABLE_FILE_NAME: &str = "tallyboard.ini";
/// Directory created under the platform config base.
pub const APP_DIR_NAME: &str = "tallyboard";
/// File name of the default store inside [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.ini";
/// File name of the legacy store, directly in the config base.
pub const LEGACY_FILE_NAME: &str = "tallyboard.ini";

/// The resolved settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    /// File to read (and, unless `migrate_to` is set, write).
    pub path: PathBuf,
    /// Whether machine-specific absolute paths must be omitted.
    pub portable: bool,
    /// Set when `path` is the legacy file; writes move here.
    pub migrate_to: Option<PathBuf>,
}

impl StoreLocation {
    /// Uses `path` as-is.
    pub fn explicit(path: impl Into<PathBuf>, portable: bool) -> Self {
        Self {
            path: path.into(),
            portable,
            migrate_to: None,
        }
    }

    /// Picks the store file given the executable's directory and the
    /// platform config base.
    pub fn resolve(exe_dir: Option<&Path>, config_base: &Path) -> Self {
        if let Some(exe_dir) = exe_dir {
            let portable = exe_dir.join(PORTABLE_FILE_NAME);
            if portable.is_file() {
                return Self::explicit(portable, true);
            }
        }

        let default = config_base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        let legacy = config_base.join(LEGACY_FILE_NAME);
        if !default.exists() && legacy.is_file() {
            return Self {
                path: legacy,
                portable: false,
                migrate_to: Some(default),
            };
        }
        Self::explicit(default, false)
    }

    /// Resolves the location for the running executable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPlatformConfigDir`] when the platform config
    /// base directory cannot be determined from the environment.
    pub fn discover() -> Result<Self, StoreError> {
        let exe = std::env::current_exe().ok();
        let exe_dir = exe.as_deref().and_then(Path::parent);
        let base = platform_config_dir().ok_or(StoreError::NoPlatformConfigDir)?;
        Ok(Self::resolve(exe_dir, &base))
    }
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

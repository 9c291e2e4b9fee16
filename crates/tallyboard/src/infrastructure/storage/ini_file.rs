//! File-backed settings store.
//!
//! [`IniFileStore`] reads the whole INI file once when opened, serves reads
//! and writes from an in-memory [`IniDocument`], and rewrites the file on
//! every [`flush`](KeyValueStore::flush).

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::ini::IniDocument;
use super::location::StoreLocation;
use crate::application::ports::{KeyValueStore, StoreError};

/// A [`KeyValueStore`] persisted to an INI file.
#[derive(Debug)]
pub struct IniFileStore {
    path: PathBuf,
    migrate_to: Option<PathBuf>,
    document: IniDocument,
}

impl IniFileStore {
    /// Opens the store at `location`.
    ///
    /// A missing file is not an error: the store starts empty and the file is
    /// created by the first flush.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system errors other than "not
    /// found".
    pub fn open(location: StoreLocation) -> Result<Self, StoreError> {
        let document = match std::fs::read_to_string(&location.path) {
            Ok(content) => {
                debug!(path = %location.path.display(), "settings file read");
                IniDocument::parse(&content, location.portable)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %location.path.display(), "no settings file yet; starting empty");
                if location.portable {
                    IniDocument::portable()
                } else {
                    IniDocument::default()
                }
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: location.path,
                    source,
                })
            }
        };

        Ok(Self {
            path: location.path,
            migrate_to: location.migrate_to,
            document,
        })
    }

    /// The file the next flush writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &IniDocument {
        &self.document
    }
}

impl KeyValueStore for IniFileStore {
    fn read_value(&self, section: &str, key: &str) -> Option<String> {
        self.document.read_value(section, key)
    }

    fn write_value(&mut self, section: &str, key: &str, value: &str) {
        self.document.write_value(section, key, value);
    }

    fn remove_value(&mut self, section: &str, key: &str) {
        self.document.remove_value(section, key);
    }

    fn keys(&self, section: &str) -> Vec<String> {
        self.document.keys(section)
    }

    fn is_portable(&self) -> bool {
        self.document.is_portable()
    }

    /// Creates the parent directory if needed and rewrites the file.
    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, self.document.to_ini_string()).map_err(|source| {
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), "settings file written");
        Ok(())
    }

    fn migrate_legacy_location(&mut self) -> bool {
        let Some(target) = self.migrate_to.take() else {
            return false;
        };
        info!(
            from = %self.path.display(),
            to = %target.display(),
            "moving settings away from legacy location"
        );
        self.path = target;
        true
    }
}

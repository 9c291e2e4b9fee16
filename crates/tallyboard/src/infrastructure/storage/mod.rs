//! Storage infrastructure: settings file persistence.
//!
//! - `ini` – the in-memory INI document.  Also used directly as the store in
//!   tests and previews.
//! - `ini_file` – wraps a document and persists it to disk.
//! - `location` – decides which file to use (portable, default or legacy).
//!
//! Keeping storage concerns here means the settings model only ever sees the
//! [`KeyValueStore`](crate::application::ports::KeyValueStore) trait.

pub mod ini;
pub mod ini_file;
pub mod location;

pub use ini::IniDocument;
pub use ini_file::IniFileStore;
pub use location::StoreLocation;

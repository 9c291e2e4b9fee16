//! Key identifiers used by hotkey chords.
//!
//! Hotkeys are stored and compared as Windows Virtual-Key identifiers, the
//! same representation the OS keyboard hook reports.  Capturing keys is not
//! this crate's job; it only names them.

pub mod virtual_key;

pub use virtual_key::{UnknownKeyError, VKey};

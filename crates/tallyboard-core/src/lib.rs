//! # tallyboard-core
//!
//! Shared library for Tallyboard containing the domain entities, the key
//! identifier table, and the text codecs used by the settings store.
//!
//! It has zero dependencies on OS APIs, audio libraries, or the file system.
//!
//! # Architecture overview (for beginners)
//!
//! Tallyboard tracks numeric counters and plays sound clips when the user
//! presses hotkeys.  Everything the user configures is kept in a flat
//! section/key text file (an INI file).  Many settings do not fit in a single
//! scalar, so they are packed into one line each:
//!
//! - **`keymap`** – The names of the keys a hotkey can use (`MULTIPLY`,
//!   `KEY_A`, `F5`, ...).
//!
//! - **`domain`** – Hotkey chords, clip path groups, counter and sound rows,
//!   output devices and window geometry, each with its encode/decode rules.
//!
//! - **`codec`** – Scalar text forms (`True`/`False`, numbers) shared by the
//!   composite codecs.
//!
//! The application crate (`tallyboard`) builds the settings aggregate on top
//! of these types and talks to the real store.

pub mod codec;
pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `tallyboard_core::KeyChord` instead of `tallyboard_core::domain::key_chord::KeyChord`.
pub use domain::device::{device_name_at, resolve_device_index, OutputDevice};
pub use domain::file_group::FilePathGroup;
pub use domain::geometry::{ColumnWidth, WindowGeometry};
pub use domain::key_chord::{KeyChord, COUNTER_CHORD_NAMES, SOUND_CHORD_NAMES};
pub use domain::media::{Counter, Sound};
pub use domain::player::PlayerBackend;
pub use keymap::VKey;

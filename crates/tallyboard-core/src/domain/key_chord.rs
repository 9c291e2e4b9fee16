//! Hotkey chords: a named, ordered list of keys.
//!
//! A chord is stored as its key names joined by `" + "`, e.g.
//! `Settings/Next = CONTROL + MULTIPLY`.
//!
//! # Two parsing policies
//!
//! - [`KeyChord::decode`] is **all-or-nothing**: one bad token throws the
//!   whole chord away and the slot falls back to its built-in default.  A
//!   half-parsed chord would bind a different hotkey than the user chose.
//! - [`parse_key_list_lenient`] (used for sound rows) skips bad tokens and
//!   keeps the rest.

use tracing::debug;

use crate::keymap::{UnknownKeyError, VKey};

/// Chord slots of the counters panel, in persisted order.
pub const COUNTER_CHORD_NAMES: [&str; 5] = ["Next", "Previous", "Up", "Down", "Reset"];

/// Chord slots of the sounds panel, in persisted order.
pub const SOUND_CHORD_NAMES: [&str; 2] = ["Pause", "Continue"];

/// Separator written between key names.
pub const KEY_SEPARATOR: &str = " + ";

/// UI placeholder text that older versions leaked into sound key lists.
const PLACEHOLDER_PREFIX: &str = "Choose another file | ";

/// A named hotkey combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    name: String,
    keys: Vec<VKey>,
}

impl KeyChord {
    pub fn new(name: impl Into<String>, keys: Vec<VKey>) -> Self {
        Self {
            name: name.into(),
            keys,
        }
    }

    /// Creates a chord with no keys.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Creates the chord holding the built-in default for `name`.
    pub fn with_default(name: impl Into<String>) -> Self {
        let name = name.into();
        let keys = default_keys(&name);
        Self { name, keys }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[VKey] {
        &self.keys
    }

    pub fn set_keys(&mut self, keys: Vec<VKey>) {
        self.keys = keys;
    }

    /// Decodes the stored text of chord `name`.
    ///
    /// A missing value, an empty value, or any token that is not a key name
    /// yields the default for `name` (see [`default_keys`]).  Never fails.
    pub fn decode(name: impl Into<String>, raw: Option<&str>) -> Self {
        let name = name.into();
        let parsed = match raw {
            Some(text) => parse_chord(text),
            None => Err(UnknownKeyError(String::new())),
        };
        match parsed {
            Ok(keys) => Self { name, keys },
            Err(e) => {
                debug!("chord {name:?} falls back to its default: {e}");
                Self::with_default(name)
            }
        }
    }

    /// Encodes the chord as `"KEY + KEY + ..."`.
    pub fn encode(&self) -> String {
        encode_keys(&self.keys)
    }

    /// Returns `true` if both chords hold the same keys in the same order.
    ///
    /// Names are not compared.
    pub fn same_keys(&self, other: &KeyChord) -> bool {
        self.keys == other.keys
    }
}

/// Built-in fallback keys for a chord slot.
///
/// Only `Next`, `Up` and `Down` have defaults; every other slot is empty.
pub fn default_keys(name: &str) -> Vec<VKey> {
    match name {
        "Next" => vec![VKey::Multiply],
        "Up" => vec![VKey::Add],
        "Down" => vec![VKey::Subtract],
        _ => Vec::new(),
    }
}

/// Parses `"A + B"` strictly: every `+`-separated token must be a key name.
///
/// # Errors
///
/// Returns the first token that is not a key.  An empty string is a single
/// empty token and therefore an error.
pub fn parse_chord(text: &str) -> Result<Vec<VKey>, UnknownKeyError> {
    text.split('+').map(str::parse::<VKey>).collect()
}

/// Parses a sound's key list, silently skipping tokens that are not keys.
pub fn parse_key_list_lenient(text: &str) -> Vec<VKey> {
    text.replace(PLACEHOLDER_PREFIX, "")
        .split(KEY_SEPARATOR)
        .filter(|token| !token.is_empty())
        .filter_map(VKey::from_name)
        .collect()
}

/// Joins key names with `" + "`.  An empty list encodes as `""`.
pub fn encode_keys(keys: &[VKey]) -> String {
    keys.iter()
        .map(|key| key.name())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

//! Counters and sounds, and their one-line store rows.
//!
//! Both lists live in indexed keys (`Log1`, `Log2`, ...) whose values are
//! tab-separated records:
//!
//! ```text
//! Counters/Log1 = Deaths\t/home/me/counters/deaths.txt
//! Sounds/Log1   = Horn\t/home/me/clips/horn.wav |horn2.wav\tADD + SUBTRACT
//! ```
//!
//! Row decoding never fails: missing fields decode as empty values.

use std::path::{Path, PathBuf};

use super::file_group::{file_name_of, FilePathGroup};
use super::key_chord::{encode_keys, parse_key_list_lenient};
use crate::keymap::VKey;

/// Field separator inside a row.
pub const FIELD_SEPARATOR: char = '\t';

/// Prefix of every indexed list key.
pub const ROW_KEY_PREFIX: &str = "Log";

/// Key of the 1-based row `index` (`Log1`, `Log2`, ...).
pub fn row_key(index: usize) -> String {
    format!("{ROW_KEY_PREFIX}{index}")
}

/// Returns `true` if `key` has the shape of an indexed row key.
pub fn is_row_key(key: &str) -> bool {
    key.strip_prefix(ROW_KEY_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// A named counter backed by a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub name: String,
    pub file_path: PathBuf,
}

impl Counter {
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
        }
    }

    /// File-name component of the counter's path.
    pub fn file_name(&self) -> String {
        file_name_of(&self.file_path)
    }

    /// Decodes `"name\tfilePath"`.
    pub fn decode_row(row: &str) -> Self {
        let mut fields = row.split(FIELD_SEPARATOR);
        let name = fields.next().unwrap_or_default();
        let path = fields.next().unwrap_or_default();
        Self::new(name, path)
    }

    /// Encodes the row; portable mode stores the file name only.
    pub fn encode_row(&self, portable: bool) -> String {
        let path = if portable {
            self.file_name()
        } else {
            self.file_path.display().to_string()
        };
        format!("{}{FIELD_SEPARATOR}{}", self.name, path)
    }
}

/// A named sound: one or more clips and the hotkey that plays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    pub name: String,
    pub file_paths: FilePathGroup,
    pub keys: Vec<VKey>,
}

impl Sound {
    pub fn new(name: impl Into<String>, file_paths: FilePathGroup, keys: Vec<VKey>) -> Self {
        Self {
            name: name.into(),
            file_paths,
            keys,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        self.file_paths.paths()
    }

    /// Returns the anchor path, if the sound has any clip.
    pub fn first_path(&self) -> Option<&Path> {
        self.file_paths.paths().first().map(PathBuf::as_path)
    }

    /// Decodes `"name\tpathList\tkeyList"`.
    ///
    /// Unknown key names are skipped; see
    /// [`parse_key_list_lenient`](super::key_chord::parse_key_list_lenient).
    pub fn decode_row(row: &str) -> Self {
        let mut fields = row.split(FIELD_SEPARATOR);
        let name = fields.next().unwrap_or_default();
        let file_paths = FilePathGroup::decode(fields.next().unwrap_or_default());
        let keys = parse_key_list_lenient(fields.next().unwrap_or_default());
        Self::new(name, file_paths, keys)
    }

    /// Encodes the row with the path policy selected by `portable`.
    pub fn encode_row(&self, portable: bool) -> String {
        format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.name,
            self.file_paths.encode(portable),
            encode_keys(&self.keys)
        )
    }
}

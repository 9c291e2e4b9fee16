//! In-memory INI document.
//!
//! # What is an INI file? (for beginners)
//!
//! An INI file is a flat list of `key=value` lines grouped under `[Section]`
//! headers:
//!
//! ```ini
//! [Sounds]
//! device=Speakers
//! volume=30
//! Log1=Horn	C:\clips\horn.wav |horn2.wav	ADD + SUBTRACT
//! ```
//!
//! There is no nesting and no typing; every value is a single line of text.
//! The settings layer packs composite values (rows, chords, path lists) into
//! that single line itself.
//!
//! # Dialect
//!
//! - Lines starting with `;` or `#` are comments.  They are skipped on parse
//!   and not written back.
//! - Keys are trimmed.  Values are trimmed of *spaces* only, so tab-separated
//!   fields at either end survive.
//! - Sections and keys keep their first-seen order; new keys are appended to
//!   the end of their section.
//! - Lookups are exact (case-sensitive).
//! - `key=value` lines before the first section header are ignored.

use tracing::debug;

use crate::application::ports::{KeyValueStore, StoreError};

#[derive(Debug, Clone, Default, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// An ordered section/key → value document held entirely in memory.
///
/// `flush` is a no-op; [`IniFileStore`](super::IniFileStore) wraps a
/// document and writes it to disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    sections: Vec<Section>,
    portable: bool,
}

impl IniDocument {
    /// An empty document in portable mode.
    pub fn portable() -> Self {
        Self {
            sections: Vec::new(),
            portable: true,
        }
    }

    /// Parses INI text.
    pub fn parse(text: &str, portable: bool) -> Self {
        let mut document = Self {
            sections: Vec::new(),
            portable,
        };
        let mut current: Option<usize> = None;

        for (number, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                current = Some(document.section_index_or_insert(name.trim()));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!(line = number + 1, "ignoring INI line without '='");
                continue;
            };
            let Some(index) = current else {
                debug!(line = number + 1, "ignoring INI key outside any section");
                continue;
            };
            document.sections[index].set(key.trim(), value.trim_matches(' '));
        }
        document
    }

    /// Renders the document as INI text.
    pub fn to_ini_string(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for (key, value) in &section.entries {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }

    /// Lists the section names in file order.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name.clone()).collect()
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

impl Section {
    fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

impl KeyValueStore for IniDocument {
    fn read_value(&self, section: &str, key: &str) -> Option<String> {
        self.section(section)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn write_value(&mut self, section: &str, key: &str, value: &str) {
        // A value is a single line.
        let value = value.replace(['\r', '\n'], " ");
        let index = self.section_index_or_insert(section);
        self.sections[index].set(key, &value);
    }

    fn remove_value(&mut self, section: &str, key: &str) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.name == section) {
            section.entries.retain(|(k, _)| k != key);
        }
    }

    fn keys(&self, section: &str) -> Vec<String> {
        self.section(section)
            .map(|s| s.entries.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    fn is_portable(&self) -> bool {
        self.portable
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; written by hand
[Size]
form = 216\t200
split=100

[Sounds]
Log1=Horn\tclip1.wav |clip2.wav\tADD + SUBTRACT
# trailing comment
";

    // ── parse ────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_reads_sections_and_keys() {
        // Arrange / Act
        let doc = IniDocument::parse(SAMPLE, false);

        // Assert
        assert_eq!(doc.section_names(), vec!["Size", "Sounds"]);
        assert_eq!(doc.read_value("Size", "form").as_deref(), Some("216\t200"));
        assert_eq!(doc.read_value("Size", "split").as_deref(), Some("100"));
        assert_eq!(
            doc.read_value("Sounds", "Log1").as_deref(),
            Some("Horn\tclip1.wav |clip2.wav\tADD + SUBTRACT")
        );
    }

    #[test]
    fn test_parse_keeps_trailing_tab_of_value() {
        let doc = IniDocument::parse("[Counters]\nLog1=Deaths\t\n", false);

        assert_eq!(doc.read_value("Counters", "Log1").as_deref(), Some("Deaths\t"));
    }

    #[test]
    fn test_parse_handles_crlf_line_endings() {
        let doc = IniDocument::parse("[Sounds]\r\nvolume=40\r\n", false);

        assert_eq!(doc.read_value("Sounds", "volume").as_deref(), Some("40"));
    }

    #[test]
    fn test_parse_ignores_keys_before_first_section() {
        let doc = IniDocument::parse("orphan=1\n[Sounds]\nvolume=40\n", false);

        assert!(doc.section_names().iter().all(|s| !s.is_empty()));
        assert_eq!(doc.keys("Sounds"), vec!["volume"]);
    }

    #[test]
    fn test_parse_value_containing_equals_sign() {
        let doc = IniDocument::parse("[Counters]\nLog1=a=b\tc.txt\n", false);

        assert_eq!(doc.read_value("Counters", "Log1").as_deref(), Some("a=b\tc.txt"));
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        let doc = IniDocument::parse(SAMPLE, false);

        assert_eq!(doc.read_value("size", "form"), None);
        assert_eq!(doc.read_value("Size", "Form"), None);
    }

    // ── write / remove ───────────────────────────────────────────────────────

    #[test]
    fn test_write_appends_new_key_and_replaces_existing() {
        // Arrange
        let mut doc = IniDocument::parse(SAMPLE, false);

        // Act
        doc.write_value("Size", "split", "120");
        doc.write_value("Size", "extra", "x");
        doc.write_value("Settings", "Next", "MULTIPLY");

        // Assert
        assert_eq!(doc.keys("Size"), vec!["form", "split", "extra"]);
        assert_eq!(doc.read_value("Size", "split").as_deref(), Some("120"));
        assert_eq!(doc.section_names(), vec!["Size", "Sounds", "Settings"]);
    }

    #[test]
    fn test_write_flattens_line_breaks() {
        let mut doc = IniDocument::default();

        doc.write_value("Counters", "Log1", "two\nlines");

        assert_eq!(doc.read_value("Counters", "Log1").as_deref(), Some("two lines"));
    }

    #[test]
    fn test_remove_value_deletes_only_that_key() {
        let mut doc = IniDocument::parse(SAMPLE, false);

        doc.remove_value("Size", "form");
        doc.remove_value("Missing", "form");

        assert_eq!(doc.keys("Size"), vec!["split"]);
    }

    // ── serialize ────────────────────────────────────────────────────────────

    #[test]
    fn test_to_ini_string_reparses_to_same_document() {
        // Arrange
        let doc = IniDocument::parse(SAMPLE, true);

        // Act
        let text = doc.to_ini_string();

        // Assert
        assert!(text.starts_with("[Size]\nform=216\t200\nsplit=100\n"));
        assert!(!text.contains("comment"));
        assert_eq!(IniDocument::parse(&text, true), doc);
    }

    #[test]
    fn test_portable_flag_is_reported() {
        assert!(IniDocument::portable().is_portable());
        assert!(!IniDocument::default().is_portable());
    }
}

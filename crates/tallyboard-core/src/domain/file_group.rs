//! File path groups: the clips played by one sound.
//!
//! # Storage format
//!
//! A group is written as one string.  The first path is the *anchor*; its
//! directory is shared by every other file in the group, so later entries are
//! stored as bare file names, each prefixed by `" |"`:
//!
//! ```text
//! /home/me/clips/horn.wav |horn2.wav |horn3.wav      (portable mode off)
//!  |horn.wav |horn2.wav |horn3.wav                   (portable mode on)
//! ```
//!
//! In portable mode the anchor is left out entirely so that no
//! machine-specific absolute path ends up in the file.  On load every entry
//! then becomes a bare file name, resolved later against the portable
//! installation directory.

use std::path::{Path, PathBuf};

/// Prefix written before every path after the anchor.
pub const PATH_SEPARATOR: &str = " |";

/// An ordered list of paths sharing the directory of the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePathGroup {
    paths: Vec<PathBuf>,
}

impl FilePathGroup {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory of the anchor path, against which later entries resolve.
    ///
    /// Returns `None` for an empty group.  A bare file name has the empty
    /// path as its directory.
    pub fn base_dir(&self) -> Option<&Path> {
        self.paths
            .first()
            .map(|first| first.parent().unwrap_or_else(|| Path::new("")))
    }

    /// Decodes a stored path list.
    ///
    /// Empty segments are dropped, so both the portable and non-portable
    /// forms decode; an empty string decodes to an empty group.
    pub fn decode(text: &str) -> Self {
        let mut segments = text.split(PATH_SEPARATOR).filter(|s| !s.is_empty());
        let Some(anchor) = segments.next() else {
            return Self::default();
        };

        let anchor = PathBuf::from(anchor);
        let base = anchor
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut paths = vec![anchor];
        paths.extend(segments.map(|name| base.join(name)));
        Self { paths }
    }

    /// Encodes the group.
    ///
    /// With `portable == false` the anchor is written verbatim and unprefixed;
    /// with `portable == true` it is omitted.  Every later path is written as
    /// `" |"` followed by its file name only.
    pub fn encode(&self, portable: bool) -> String {
        let (mut out, rest) = match self.paths.split_first() {
            Some((anchor, rest)) if !portable => (anchor.display().to_string(), rest),
            _ => (String::new(), self.paths.as_slice()),
        };
        for path in rest {
            out.push_str(PATH_SEPARATOR);
            out.push_str(&file_name_of(path));
        }
        out
    }
}

/// File-name component of `path`, or the whole path when it has none.
pub fn file_name_of(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_dir() -> PathBuf {
        std::env::temp_dir().join("clips")
    }

    // ── decode ───────────────────────────────────────────────────────────────

    #[test]
    fn test_decode_resolves_later_entries_against_anchor_directory() {
        // Arrange
        let anchor = clip_dir().join("horn.wav");
        let text = format!("{} |horn2.wav |horn3.wav", anchor.display());

        // Act
        let group = FilePathGroup::decode(&text);

        // Assert
        assert_eq!(
            group.paths(),
            &[anchor, clip_dir().join("horn2.wav"), clip_dir().join("horn3.wav")]
        );
        assert_eq!(group.base_dir(), Some(clip_dir().as_path()));
    }

    #[test]
    fn test_decode_bare_file_names_stay_relative() {
        let group = FilePathGroup::decode("clip1.wav |clip2.wav");
        assert_eq!(
            group.paths(),
            &[PathBuf::from("clip1.wav"), PathBuf::from("clip2.wav")]
        );
        assert_eq!(group.base_dir(), Some(Path::new("")));
    }

    #[test]
    fn test_decode_portable_form_drops_leading_empty_segment() {
        let group = FilePathGroup::decode(" |a.wav |b.wav");
        assert_eq!(group.paths(), &[PathBuf::from("a.wav"), PathBuf::from("b.wav")]);
    }

    #[test]
    fn test_decode_empty_text_is_empty_group() {
        let group = FilePathGroup::decode("");
        assert!(group.is_empty());
        assert_eq!(group.base_dir(), None);
    }

    // ── encode ───────────────────────────────────────────────────────────────

    #[test]
    fn test_encode_non_portable_writes_anchor_verbatim() {
        // Arrange
        let anchor = clip_dir().join("horn.wav");
        let group = FilePathGroup::new(vec![anchor.clone(), clip_dir().join("horn2.wav")]);

        // Act
        let text = group.encode(false);

        // Assert
        assert_eq!(text, format!("{} |horn2.wav", anchor.display()));
        assert!(!text.starts_with(PATH_SEPARATOR));
    }

    #[test]
    fn test_encode_portable_omits_anchor_and_absolute_directories() {
        // Arrange
        let group = FilePathGroup::new(vec![
            clip_dir().join("horn.wav"),
            clip_dir().join("horn2.wav"),
        ]);

        // Act
        let text = group.encode(true);

        // Assert
        assert_eq!(text, " |horn.wav |horn2.wav");
        assert!(!text.contains(&clip_dir().display().to_string()));
    }

    #[test]
    fn test_encode_strips_directory_of_later_entries_from_other_folders() {
        // Later entries are always written as bare names; they resolve against
        // the anchor's directory on the next load.
        let group = FilePathGroup::new(vec![
            clip_dir().join("a.wav"),
            std::env::temp_dir().join("elsewhere").join("b.wav"),
        ]);
        let decoded = FilePathGroup::decode(&group.encode(false));
        assert_eq!(decoded.paths()[1], clip_dir().join("b.wav"));
    }

    #[test]
    fn test_encode_empty_group_is_empty_string() {
        assert_eq!(FilePathGroup::default().encode(false), "");
        assert_eq!(FilePathGroup::default().encode(true), "");
    }

    #[test]
    fn test_portable_round_trip_keeps_file_names() {
        let group = FilePathGroup::new(vec![clip_dir().join("x.ogg"), clip_dir().join("y.ogg")]);
        let decoded = FilePathGroup::decode(&group.encode(true));
        assert_eq!(decoded.paths(), &[PathBuf::from("x.ogg"), PathBuf::from("y.ogg")]);
    }

    #[test]
    fn test_file_name_of_path_without_name_returns_whole_path() {
        assert_eq!(file_name_of(Path::new("..")), "..");
    }
}

//! Integration tests for the tallyboard-core store-row codecs.
//!
//! These tests go through the public API only and check the properties the
//! settings file relies on: sound rows survive a write/read cycle, malformed
//! chords never fail, and portable encoding never leaks the anchor path.

use std::path::PathBuf;

use tallyboard_core::domain::key_chord::parse_key_list_lenient;
use tallyboard_core::{
    resolve_device_index, Counter, FilePathGroup, KeyChord, OutputDevice, Sound, VKey,
    COUNTER_CHORD_NAMES, SOUND_CHORD_NAMES,
};

fn clip_dir() -> PathBuf {
    std::env::temp_dir().join("tallyboard-clips")
}

// ── Sound rows ────────────────────────────────────────────────────────────────

#[test]
fn test_sound_row_survives_non_portable_cycle() {
    // Arrange
    let dir = clip_dir();
    let sound = Sound::new(
        "Airhorn",
        FilePathGroup::new(vec![dir.join("a.wav"), dir.join("b.wav"), dir.join("c.wav")]),
        vec![VKey::Control, VKey::F5],
    );

    // Act
    let decoded = Sound::decode_row(&sound.encode_row(false));

    // Assert
    assert_eq!(decoded, sound);
}

#[test]
fn test_sound_row_with_later_path_outside_anchor_dir_is_normalised() {
    // Arrange: the second clip lives elsewhere; only its file name is stored
    let dir = clip_dir();
    let elsewhere = std::env::temp_dir().join("other").join("b.wav");
    let sound = Sound::new(
        "Mixed",
        FilePathGroup::new(vec![dir.join("a.wav"), elsewhere]),
        Vec::new(),
    );

    // Act
    let decoded = Sound::decode_row(&sound.encode_row(false));

    // Assert
    assert_eq!(decoded.paths(), &[dir.join("a.wav"), dir.join("b.wav")]);
}

#[test]
fn test_portable_sound_row_keeps_every_clip_by_file_name() {
    let dir = clip_dir();
    let sound = Sound::new(
        "Horn",
        FilePathGroup::new(vec![dir.join("horn.wav"), dir.join("horn2.wav")]),
        vec![VKey::Add],
    );

    let row = sound.encode_row(true);

    assert_eq!(row, "Horn\t |horn.wav |horn2.wav\tADD");
    assert!(!row.contains(&dir.display().to_string()));
}

#[test]
fn test_sound_row_horn_scenario() {
    let sound = Sound::decode_row("Horn\tclip1.wav |clip2.wav\tADD + SUBTRACT");

    assert_eq!(sound.name, "Horn");
    assert_eq!(sound.paths().len(), 2);
    assert_eq!(sound.keys, vec![VKey::Add, VKey::Subtract]);
}

#[test]
fn test_sound_row_with_missing_fields_decodes_empty() {
    let sound = Sound::decode_row("Lonely");

    assert_eq!(sound.name, "Lonely");
    assert!(sound.file_paths.is_empty());
    assert!(sound.keys.is_empty());
}

// ── Counter rows ──────────────────────────────────────────────────────────────

#[test]
fn test_counter_row_path_policy() {
    let counter = Counter::new("Deaths", clip_dir().join("deaths.txt"));

    assert_eq!(counter.encode_row(true), "Deaths\tdeaths.txt");
    assert_eq!(Counter::decode_row(&counter.encode_row(false)), counter);
}

// ── Chords ────────────────────────────────────────────────────────────────────

#[test]
fn test_malformed_chords_never_fail() {
    let inputs = [None, Some(""), Some("+"), Some("ADD +"), Some("add"), Some("\t"), Some("999")];

    for name in COUNTER_CHORD_NAMES.iter().chain(SOUND_CHORD_NAMES.iter()) {
        for raw in inputs {
            let chord = KeyChord::decode(*name, raw);
            let expected = match *name {
                "Next" => vec![VKey::Multiply],
                "Up" => vec![VKey::Add],
                "Down" => vec![VKey::Subtract],
                _ => Vec::new(),
            };
            assert_eq!(chord.keys(), expected.as_slice(), "slot {name}, input {raw:?}");
        }
    }
}

#[test]
fn test_chord_accepts_numeric_codes() {
    let chord = KeyChord::decode("Reset", Some("17 + 82"));

    assert_eq!(chord.keys(), &[VKey::Control, VKey::KeyR]);
    assert_eq!(chord.encode(), "CONTROL + KEY_R");
}

#[test]
fn test_lenient_key_list_strips_placeholder() {
    let keys = parse_key_list_lenient("Choose another file | ADD + NOPE + F2");

    assert_eq!(keys, vec![VKey::Add, VKey::F2]);
}

// ── Devices ───────────────────────────────────────────────────────────────────

#[test]
fn test_device_resolution_against_enumeration() {
    let devices: Vec<_> = ["Speakers (Realtek High Definition Audio)", "Headset (USB)"]
        .into_iter()
        .map(OutputDevice::new)
        .collect();

    assert_eq!(resolve_device_index(&devices, Some("Headset")), 1);
    assert_eq!(resolve_device_index(&devices, Some("headset")), 0);
    assert_eq!(resolve_device_index(&devices, None), 0);
}

//! Integration tests for the settings engine.
//!
//! These tests exercise the public API end to end: `SettingsService` +
//! `IniFileStore` on a real temporary file, the null audio backend, and the
//! command-line entry point.

use std::path::{Path, PathBuf};

use clap::Parser;
use uuid::Uuid;

use tallyboard::application::manage_settings::SettingsService;
use tallyboard::application::ports::KeyValueStore;
use tallyboard::application::settings::{settings_equivalent, SettingField};
use tallyboard::cli::{execute, Cli};
use tallyboard::infrastructure::audio::mock::{BackendCall, RecordingBackendFactory};
use tallyboard::infrastructure::audio::NullBackendFactory;
use tallyboard::infrastructure::devices::StaticDeviceDirectory;
use tallyboard::infrastructure::storage::{IniDocument, IniFileStore, StoreLocation};
use tallyboard_core::{Counter, FilePathGroup, PlayerBackend, Sound, VKey};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A unique directory under the system temp dir, removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("tallyboard-it-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn directory() -> StaticDeviceDirectory {
    StaticDeviceDirectory::new(["Speakers (Realtek)", "Headphones (USB)"])
}

fn open_service(path: &Path, portable: bool) -> SettingsService<IniFileStore> {
    let store = IniFileStore::open(StoreLocation::explicit(path, portable)).expect("open store");
    SettingsService::load(store, &directory(), Box::new(NullBackendFactory::new(true)))
}

fn cli_args<'a>(config: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "tallyboard",
        "--config",
        config,
        "--device-name",
        "Speakers (A),Headphones (B)",
    ];
    args.extend_from_slice(extra);
    args
}

fn run(args: &[&str]) -> Option<String> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute(cli).expect("command succeeds")
}

// ── File round trips ──────────────────────────────────────────────────────────

#[test]
fn test_file_round_trip_reproduces_settings_for_two_cycles() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let clips = dir.path().join("clips");

    let mut service = open_service(&path, false);
    service.set_player_backend(PlayerBackend::Wmp);
    service.set_device(1).expect("device");
    service.set_disable_counters(true);
    service
        .set_key_binding("Reset", vec![VKey::Control, VKey::KeyR])
        .expect("bind");
    service.add_counter(Counter::new("Deaths", dir.path().join("deaths.txt")));
    service.add_sound(Sound::new(
        "Horn",
        FilePathGroup::new(vec![clips.join("horn.wav"), clips.join("horn2.wav")]),
        vec![VKey::Add, VKey::Subtract],
    ));
    service.set_splitter_position(80.0);

    // Act
    service.save().expect("first save");
    let mut first = open_service(&path, false);
    first.save().expect("second save");
    let second = open_service(&path, false);

    // Assert
    assert!(settings_equivalent(service.settings(), first.settings()));
    assert!(settings_equivalent(first.settings(), second.settings()));

    let sounds = second.settings().sounds().borrow();
    assert_eq!(sounds[0].paths(), &[clips.join("horn.wav"), clips.join("horn2.wav")]);
    assert_eq!(sounds[0].keys, vec![VKey::Add, VKey::Subtract]);
    assert_eq!(second.settings().geometry().splitter_position(), 80.0);
    assert_eq!(
        second.settings().counters().borrow()[0].file_path,
        dir.path().join("deaths.txt")
    );
}

#[test]
fn test_portable_store_never_writes_absolute_anchor() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.path().join("tallyboard.ini");
    let anchor = dir.path().join("clips").join("horn.wav");
    let mut service = open_service(&path, true);
    service.add_sound(Sound::new(
        "Horn",
        FilePathGroup::new(vec![anchor.clone(), dir.path().join("clips").join("b.wav")]),
        Vec::new(),
    ));
    service.add_counter(Counter::new("Deaths", dir.path().join("deaths.txt")));

    // Act
    service.save().expect("save");

    // Assert
    let text = std::fs::read_to_string(&path).expect("read file");
    assert!(!text.contains(&anchor.display().to_string()));
    assert!(text.contains("Log1=Horn\t |horn.wav |b.wav\t"));
    assert!(text.contains("Log1=Deaths\tdeaths.txt"));
}

#[test]
fn test_volume_change_is_persisted_without_explicit_save() {
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let mut service = open_service(&path, false);

    service.set_volume(75).expect("set volume");

    let reopened = IniFileStore::open(StoreLocation::explicit(&path, false)).expect("reopen");
    assert_eq!(reopened.read_value("Sounds", "volume").as_deref(), Some("75"));
}

#[test]
fn test_shrinking_counter_list_leaves_no_orphans_on_disk() {
    // Arrange: three counters on disk
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let mut service = open_service(&path, false);
    for name in ["A", "B", "C"] {
        service.add_counter(Counter::new(name, format!("{name}.txt")));
    }
    service.save().expect("save three");

    // Act
    let mut service = open_service(&path, false);
    service.remove_counter(2).expect("remove");
    service.remove_counter(1).expect("remove");
    service.save().expect("save one");

    // Assert
    let text = std::fs::read_to_string(&path).expect("read file");
    assert!(text.contains("Log1=A\tA.txt"));
    assert!(!text.contains("Log2="));
    assert!(!text.contains("Log3="));
}

#[test]
fn test_hand_edited_file_with_bad_values_loads_defaults() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    std::fs::write(
        &path,
        "; edited by hand\n\
         [Size]\nform=big\nsplit=?\n\
         [Sounds]\nvolume=loud\nplayer=7\ndevice=Nowhere\n\
         [Settings]\nNext=NOT_A_KEY\nUp=ADD + BOGUS\nPause=F9\n",
    )
    .expect("write file");

    // Act
    let service = open_service(&path, false);

    // Assert
    let settings = service.settings();
    assert_eq!(settings.geometry().width(), 500.0);
    assert_eq!(settings.geometry().height(), 350.0);
    assert_eq!(settings.geometry().splitter_position(), 0.0);
    assert_eq!(settings.volume(), 30);
    assert_eq!(settings.player_backend(), PlayerBackend::Native);
    assert_eq!(settings.device(), 0);
    assert_eq!(settings.key_binding("Next").expect("Next").keys(), &[VKey::Multiply]);
    assert_eq!(settings.key_binding("Up").expect("Up").keys(), &[VKey::Add]);
    assert_eq!(settings.key_binding("Pause").expect("Pause").keys(), &[VKey::F9]);
}

// ── Legacy migration ──────────────────────────────────────────────────────────

#[test]
fn test_legacy_file_is_read_then_saved_to_default_location() {
    // Arrange
    let base = TempDir::new();
    let legacy = base.path().join("tallyboard.ini");
    std::fs::write(&legacy, "[Sounds]\nvolume=12\n").expect("write legacy");
    let location = StoreLocation::resolve(None, base.path());
    let store = IniFileStore::open(location).expect("open");

    // Act
    let mut service =
        SettingsService::load(store, &directory(), Box::new(NullBackendFactory::new(false)));
    service.save().expect("save");

    // Assert
    assert_eq!(service.settings().volume(), 12);
    let default = base.path().join("tallyboard").join("config.ini");
    assert_eq!(service.store().path(), default.as_path());
    let text = std::fs::read_to_string(&default).expect("default written");
    assert!(text.contains("volume=12"));
}

// ── Change propagation ────────────────────────────────────────────────────────

#[test]
fn test_subscriber_and_backend_follow_a_dialog_commit() {
    // Arrange
    let factory = RecordingBackendFactory::new(true);
    let mut service = SettingsService::load(
        IniDocument::default(),
        &directory(),
        Box::new(factory.clone()),
    );
    let rx = service.subscribe();
    let mut draft = service.draft();
    draft.set_device(1).expect("device");
    draft.set_volume(90);
    factory.clear();

    // Act
    let changed = service.commit(&draft).expect("commit");

    // Assert: volume is not part of a commit
    assert_eq!(changed, vec![SettingField::Device]);
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![SettingField::Device]);
    assert_eq!(factory.calls(), vec![BackendCall::SetDevice(1)]);
    assert_eq!(service.settings().volume(), 30);
    assert_eq!(service.store().read_value("Sounds", "device").as_deref(), Some("Headphones"));
}

// ── Command line ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_mutations_persist_and_show_reports_them() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let config = path.to_str().expect("utf-8 temp path");
    let with = |extra: &[&'static str]| cli_args(config, extra);

    // Act
    run(&with(&["set-volume", "64"]));
    run(&with(&["set-device", "Headphones"]));
    run(&with(&["toggle", "sounds", "off"]));
    run(&with(&["bind", "Next", "CONTROL + KEY_N"]));
    run(&with(&["add-counter", "Deaths", "deaths.txt"]));
    run(&with(&["add-sound", "Horn", "--file", "horn.wav", "--keys", "F5"]));
    let shown = run(&with(&["show", "--format", "json"])).expect("show prints");

    // Assert
    let json: serde_json::Value = serde_json::from_str(&shown).expect("valid json");
    assert_eq!(json["volume"], 64);
    assert_eq!(json["device_name"], "Headphones");
    assert_eq!(json["sounds_disabled"], true);
    assert_eq!(json["counter_keys"][0]["keys"], "CONTROL + KEY_N");
    assert_eq!(json["counters"][0]["name"], "Deaths");
    assert_eq!(json["sounds"][0]["keys"], "F5");
}

#[test]
fn test_cli_cleared_slot_with_builtin_default_reloads_as_default() {
    // Arrange
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let config = path.to_str().expect("utf-8 temp path");

    // Act
    run(&cli_args(config, &["bind", "Next", ""]));
    run(&cli_args(config, &["bind", "Reset", ""]));
    let shown = run(&cli_args(config, &["show", "--format", "json"])).expect("show prints");

    // Assert: the empty chord is stored, but only Reset stays empty
    let text = std::fs::read_to_string(&path).expect("read file");
    assert!(text.contains("Next=\n"));
    let json: serde_json::Value = serde_json::from_str(&shown).expect("valid json");
    assert_eq!(json["counter_keys"][0]["slot"], "Next");
    assert_eq!(json["counter_keys"][0]["keys"], "MULTIPLY");
    assert_eq!(json["counter_keys"][4]["slot"], "Reset");
    assert_eq!(json["counter_keys"][4]["keys"], "");
}

#[test]
fn test_cli_rejects_unknown_slot_and_bad_position() {
    let dir = TempDir::new();
    let path = dir.path().join("config.ini");
    let config = path.to_str().expect("utf-8 temp path");

    let bind = Cli::try_parse_from(["tallyboard", "--config", config, "bind", "Jump", "SPACE"])
        .expect("parses");
    let remove = Cli::try_parse_from(["tallyboard", "--config", config, "remove-sound", "1"])
        .expect("parses");

    assert!(execute(bind).is_err());
    assert!(execute(remove).is_err());
}

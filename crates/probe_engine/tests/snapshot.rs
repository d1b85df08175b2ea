use std::fs;

use probe_engine::{icon_filename, sanitize_name, snapshot_filename, SnapshotSink, SnapshotStore};
use tempfile::TempDir;

#[test]
fn writes_under_a_category_directory() {
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path().to_path_buf());

    let path = store.write("video", "acme", "<html>hi</html>").unwrap();

    assert_eq!(path, temp.path().join("video").join("acme.html"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "<html>hi</html>");
}

#[test]
fn overwrites_earlier_attempts_silently() {
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path().to_path_buf());

    let first = store.write("video", "acme", "first").unwrap();
    let second = store.write("video", "acme", "second").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "second");
}

#[test]
fn same_name_in_different_categories_stays_distinct() {
    let temp = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp.path().to_path_buf());

    let video = store.write("video", "acme", "video body").unwrap();
    let music = store.write("music", "acme", "music body").unwrap();

    assert_ne!(video, music);
    assert_eq!(fs::read_to_string(&video).unwrap(), "video body");
    assert_eq!(fs::read_to_string(&music).unwrap(), "music body");
}

#[test]
fn refuses_a_root_that_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("video");
    fs::write(&blocker, "not a directory").unwrap();

    let store = SnapshotStore::new(temp.path().to_path_buf());
    assert!(store.write("video", "acme", "body").is_err());
}

#[test]
fn sanitize_strips_unsafe_characters_and_spaces() {
    assert_eq!(sanitize_name("A/B: C?"), "AB_C");
    assert_eq!(sanitize_name("  spaced  name  "), "spaced__name");
    assert_eq!(sanitize_name("<>:\"|?*"), "unnamed");
    assert_eq!(snapshot_filename("My Engine"), "My_Engine.html");
}

#[test]
fn icon_filenames_are_lowercased() {
    assert_eq!(icon_filename("My Engine!"), "my_engine.png");
    assert_eq!(icon_filename("Quark-Station"), "quark-station.png");
    assert_eq!(icon_filename("???"), "unnamed.png");
}

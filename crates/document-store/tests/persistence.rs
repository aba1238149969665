use std::fs;

use conftree_document_store::{resolve_path, DocumentStore, StoreError, StoreOptions, Tree};
use serde_json::json;

fn sample() -> Tree {
    serde_yaml::to_value(json!({
        "settings": {
            "login": [{"picgo": "https://picgo.github.io"}],
            "theme": "暗色",
            "enabled": true,
            "retries": 2,
            "proxy": null
        }
    }))
    .unwrap()
}

#[test]
fn save_then_load_returns_equal_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let store = DocumentStore::default();

    let written = store.save(&sample(), &path).unwrap();
    assert_eq!(written, path);
    let loaded = store.load(&path).unwrap();
    assert_eq!(loaded, sample());

    store.save(&loaded, &path).unwrap();
    assert_eq!(store.load(&path).unwrap(), sample());
}

#[test]
fn save_truncates_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "a: 1\nb: 2\nc: 3\nd: 4\n").unwrap();

    let store = DocumentStore::default();
    let small: Tree = serde_yaml::from_str("a: 1\n").unwrap();
    store.save(&small, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
}

#[test]
fn missing_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = DocumentStore::default()
        .load(dir.path().join("absent.yaml"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }), "{err:?}");
}

#[test]
fn malformed_source_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "settings: [unterminated\n").unwrap();
    let err = DocumentStore::default().load(&path).unwrap_err();
    assert!(err.is_decode(), "{err:?}");
}

#[test]
fn non_utf8_source_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.yaml");
    fs::write(&path, b"\xff\xfe\x00A").unwrap();
    let err = DocumentStore::default().load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }), "{err:?}");
}

#[test]
fn missing_parent_directory_fails_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let err = DocumentStore::default().save(&sample(), &path).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "{err:?}");
    assert!(!path.exists());
}

#[test]
fn parent_directories_created_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.yaml");
    let store = DocumentStore::new(StoreOptions {
        create_parent_dirs: true,
        ..StoreOptions::default()
    });
    store.save(&sample(), &path).unwrap();
    assert_eq!(store.load(&path).unwrap(), sample());
}

#[test]
fn relative_paths_resolve_to_absolute() {
    let resolved = resolve_path("data/config.yaml").unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("data/config.yaml"));
}

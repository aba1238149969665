use serde_json::json;
use serde_yaml::Value;

use crate::{render_tree, sort_mapping_keys, DocumentStore, StoreError, StoreOptions, Tree};

fn tree(value: serde_json::Value) -> Tree {
    serde_yaml::to_value(value).unwrap()
}

#[test]
fn parse_accepts_plain_nodes() {
    let store = DocumentStore::default();
    let parsed = store
        .parse_str("settings:\n  login:\n    - picgo: old\n  retries: 3\n")
        .unwrap();
    assert_eq!(
        parsed,
        tree(json!({"settings": {"login": [{"picgo": "old"}], "retries": 3}}))
    );
}

#[test]
fn parse_rejects_tagged_nodes() {
    let store = DocumentStore::default();
    let err = store
        .parse_str("run: !python/object/apply:os.system [\"ls\"]\n")
        .unwrap_err();
    assert!(matches!(err, StoreError::UnsafeTag { .. }), "{err:?}");
    assert!(err.is_decode());
}

#[test]
fn parse_reports_malformed_content() {
    let store = DocumentStore::default();
    let err = store.parse_str("a: [1, 2\nb: }").unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }), "{err:?}");
}

#[test]
fn blank_document_is_null() {
    let store = DocumentStore::default();
    assert_eq!(store.parse_str("  \n").unwrap(), Value::Null);
}

#[test]
fn render_keeps_unicode_and_two_space_indent() {
    let rendered = render_tree(&tree(json!({"设置": {"名称": "中文"}})), false).unwrap();
    assert_eq!(rendered, "设置:\n  名称: 中文\n");
}

#[test]
fn render_keeps_insertion_order_by_default() {
    let parsed: Tree = serde_yaml::from_str("zeta: 1\nalpha: 2\n").unwrap();
    assert_eq!(render_tree(&parsed, false).unwrap(), "zeta: 1\nalpha: 2\n");
    assert_eq!(render_tree(&parsed, true).unwrap(), "alpha: 2\nzeta: 1\n");
}

#[test]
fn sorting_reaches_nested_mappings() {
    let parsed: Tree = serde_yaml::from_str("b:\n  y: 1\n  x: 2\na:\n- d: 1\n  c: 2\n").unwrap();
    let sorted = sort_mapping_keys(parsed);
    let keys: Vec<&str> = sorted
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
    let nested: Vec<&str> = sorted["a"][0]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(nested, vec!["c", "d"]);
}

#[test]
fn render_refuses_tagged_trees() {
    let tagged: Tree = serde_yaml::from_str("value: !custom 1\n").unwrap();
    let store = DocumentStore::new(StoreOptions::default());
    assert!(matches!(
        store.render(&tagged),
        Err(StoreError::UnsafeTag { .. })
    ));
}

//! Key lookup over a whole tree.
//!
//! Finds every scalar stored under a given key name, at any depth, in the
//! order the walk discovers them. Keys whose value is a mapping or sequence
//! never match themselves, but their contents are still searched.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use conftree_document_store::Tree;

/// Collect the scalar values of every `target_key` entry in `tree`.
pub fn find_values<'a>(tree: &'a Tree, target_key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    walk(tree, target_key, &mut found);
    debug!(key = target_key, matches = found.len(), "key lookup finished");
    found
}

/// First value [`find_values`] would report.
pub fn find_first<'a>(tree: &'a Tree, target_key: &str) -> Option<&'a Value> {
    find_values(tree, target_key).into_iter().next()
}

fn walk<'a>(node: &'a Value, target_key: &str, found: &mut Vec<&'a Value>) {
    match node {
        Value::Mapping(map) => walk_mapping(map, target_key, found),
        Value::Sequence(items) => {
            // bare scalars in a sequence have no key and never match
            for item in items {
                walk(item, target_key, found);
            }
        }
        _ => {}
    }
}

fn walk_mapping<'a>(map: &'a Mapping, target_key: &str, found: &mut Vec<&'a Value>) {
    for (key, value) in map {
        if is_container(value) {
            walk(value, target_key, found);
        } else if is_scalar(value) && key.as_str() == Some(target_key) {
            found.push(value);
        }
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Mapping(_) | Value::Sequence(_))
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

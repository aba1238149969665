use serde_yaml::Value;

use crate::errors::StoreError;
use crate::Tree;

/// Serialize `tree` as YAML text.
///
/// Output uses two-space indentation and keeps non-ASCII characters as
/// they are. Mapping keys stay in insertion order unless `sort_keys` is set.
pub fn render_tree(tree: &Tree, sort_keys: bool) -> Result<String, StoreError> {
    screen_tags(tree, "document")?;
    let rendered = if sort_keys {
        serde_yaml::to_string(&sort_mapping_keys(tree.clone()))
    } else {
        serde_yaml::to_string(tree)
    };
    rendered.map_err(|err| StoreError::Encode(err.to_string()))
}

/// Rebuild every mapping in `tree` with its keys in ascending order.
pub fn sort_mapping_keys(tree: Tree) -> Tree {
    match tree {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> = map
                .into_iter()
                .map(|(key, value)| (key, sort_mapping_keys(value)))
                .collect();
            entries.sort_by_cached_key(|(key, _)| key_text(key));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(sort_mapping_keys).collect())
        }
        other => other,
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Reject any explicitly tagged node. Only plain scalars, sequences and
/// mappings may pass through the store.
pub(crate) fn screen_tags(node: &Tree, origin: &str) -> Result<(), StoreError> {
    match node {
        Value::Tagged(tagged) => Err(StoreError::UnsafeTag {
            origin: origin.to_string(),
            tag: tagged.tag.to_string(),
        }),
        Value::Sequence(items) => items.iter().try_for_each(|item| screen_tags(item, origin)),
        Value::Mapping(map) => map.iter().try_for_each(|(key, value)| {
            screen_tags(key, origin)?;
            screen_tags(value, origin)
        }),
        _ => Ok(()),
    }
}

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use conftree_document_store::{DocumentStore, Tree};

use crate::errors::ConfTreeError;
use crate::lookup::find_values;
use crate::mutator::{Mode, PathMutator};

pub fn load_document(source: impl AsRef<Path>) -> Result<Tree, ConfTreeError> {
    Ok(DocumentStore::default().load(source)?)
}

pub fn save_document(tree: &Tree, destination: impl AsRef<Path>) -> Result<PathBuf, ConfTreeError> {
    Ok(DocumentStore::default().save(tree, destination)?)
}

/// Load `source` and return every scalar stored under `key`.
pub fn settings_get(source: impl AsRef<Path>, key: &str) -> Result<Vec<Value>, ConfTreeError> {
    lookup_in(&DocumentStore::default(), source, key)
}

pub fn lookup_in(
    store: &DocumentStore,
    source: impl AsRef<Path>,
    key: &str,
) -> Result<Vec<Value>, ConfTreeError> {
    let tree = store.load(source)?;
    Ok(find_values(&tree, key).into_iter().cloned().collect())
}

/// Mutate `tree` along the dotted `path` and persist it to `destination`.
pub fn write_at_path(
    tree: Tree,
    destination: impl AsRef<Path>,
    path: &str,
    element: &Value,
    mode: Mode,
) -> Result<Tree, ConfTreeError> {
    PathMutator::default().write(tree, destination, path, element, mode)
}

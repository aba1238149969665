use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::render::{render_tree, screen_tags};
use crate::Tree;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Emit mapping keys in sorted order instead of insertion order.
    pub sort_keys: bool,
    /// Create missing parent directories before writing.
    pub create_parent_dirs: bool,
}

/// Reads and writes whole documents. Holds no open handles between calls.
#[derive(Clone, Debug, Default)]
pub struct DocumentStore {
    options: StoreOptions,
}

impl DocumentStore {
    pub fn new(options: StoreOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn load(&self, source: impl AsRef<Path>) -> Result<Tree, StoreError> {
        let source = source.as_ref();
        let path = resolve_path(source).map_err(|err| StoreError::Read {
            path: source.to_path_buf(),
            source: err,
        })?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path });
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(StoreError::Decode {
                    origin: path.display().to_string(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(StoreError::Read { path, source: err }),
        };
        let tree = parse_document(&raw, &path.display().to_string())?;
        debug!(path = %path.display(), bytes = raw.len(), "loaded document");
        Ok(tree)
    }

    pub fn parse_str(&self, raw: &str) -> Result<Tree, StoreError> {
        parse_document(raw, "<inline>")
    }

    pub fn render(&self, tree: &Tree) -> Result<String, StoreError> {
        render_tree(tree, self.options.sort_keys)
    }

    /// Truncate `destination` and write `tree` to it. Returns the absolute
    /// path that was written.
    pub fn save(&self, tree: &Tree, destination: impl AsRef<Path>) -> Result<PathBuf, StoreError> {
        let destination = destination.as_ref();
        let path = resolve_path(destination).map_err(|err| StoreError::Write {
            path: destination.to_path_buf(),
            source: err,
        })?;
        let rendered = self.render(tree)?;
        if self.options.create_parent_dirs {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| StoreError::Write {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
            }
        }
        fs::write(&path, rendered.as_bytes()).map_err(|err| StoreError::Write {
            path: path.clone(),
            source: err,
        })?;
        info!(path = %path.display(), bytes = rendered.len(), "saved document");
        Ok(path)
    }
}

/// Resolve `path` against the current working directory when relative.
pub fn resolve_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

fn parse_document(raw: &str, origin: &str) -> Result<Tree, StoreError> {
    if raw.trim().is_empty() {
        return Ok(Tree::Null);
    }
    let tree: Tree = serde_yaml::from_str(raw).map_err(|err| StoreError::Decode {
        origin: origin.to_string(),
        message: err.to_string(),
    })?;
    screen_tags(&tree, origin)?;
    Ok(tree)
}

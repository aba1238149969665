//! Path-guided mutation of a document tree.
//!
//! A [`KeyPath`] picks the sequence to change. Every mapping level is walked
//! in order; only entries whose key appears somewhere in the path take part.
//! The terminal segment must name a sequence, which receives the insert or
//! removal. Each step hands back the rebuilt subtree and the caller puts it
//! back into its slot.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Sequence, Value};
use tracing::{debug, info, warn};

use conftree_document_store::{DocumentStore, Tree};

use crate::errors::ConfTreeError;
use crate::key_path::KeyPath;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Append the element to the target sequence.
    Insert,
    /// Drop every member mapping sharing a key with the element.
    Remove,
}

impl FromStr for Mode {
    type Err = ConfTreeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(Mode::Insert),
            "remove" => Ok(Mode::Remove),
            other => Err(ConfTreeError::InvalidOption(format!(
                "unknown mode `{other}`, expected insert or remove"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Insert => f.write_str("insert"),
            Mode::Remove => f.write_str("remove"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorOptions {
    /// Fail with [`ConfTreeError::PathNotResolved`] instead of leaving the
    /// tree untouched when no sequence is reached.
    pub strict_paths: bool,
}

/// Result of [`PathMutator::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub tree: Tree,
    /// Terminal sequences the path reached, changed or not.
    pub reached: usize,
    /// Whether any sequence actually changed.
    pub changed: bool,
    /// Whether the document should be written back.
    pub persist: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Reach {
    reached: usize,
    changed: bool,
}

impl Reach {
    fn record(&mut self, changed: bool) {
        self.reached += 1;
        self.changed |= changed;
    }

    fn merge(&mut self, other: Reach) {
        self.reached += other.reached;
        self.changed |= other.changed;
    }
}

#[derive(Clone, Debug, Default)]
pub struct PathMutator {
    store: DocumentStore,
    options: MutatorOptions,
}

impl PathMutator {
    pub fn new(store: DocumentStore, options: MutatorOptions) -> Self {
        Self { store, options }
    }

    /// Apply one mutation to `tree` without touching the filesystem.
    ///
    /// Mapping roots are always marked for persistence. Sequence roots skip
    /// the path: insert appends `element` unless an equal member exists.
    /// Remove on a sequence root does not append; it drops the members
    /// sharing a key with `element`, the same keyed removal a terminal
    /// sequence gets. Scalar roots are left alone.
    pub fn apply(
        &self,
        tree: Tree,
        path: &KeyPath,
        element: &Value,
        mode: Mode,
    ) -> Result<Applied, ConfTreeError> {
        if mode == Mode::Remove && !element.is_mapping() {
            return Err(ConfTreeError::InvalidElement(
                "removal element must be a mapping of field names".into(),
            ));
        }

        let applied = match tree {
            Value::Mapping(map) => {
                let (map, reach) = self.descend(map, path, element, mode, 0)?;
                if reach.reached == 0 {
                    if self.options.strict_paths {
                        return Err(ConfTreeError::PathNotResolved(path.to_string()));
                    }
                    warn!(path = %path, "path reached no sequence; tree left unchanged");
                }
                Applied {
                    tree: Value::Mapping(map),
                    reached: reach.reached,
                    changed: reach.changed,
                    persist: true,
                }
            }
            Value::Sequence(items) => {
                let (items, changed) = match mode {
                    Mode::Insert => append_unique(items, element),
                    Mode::Remove => remove_matching(items, element),
                };
                Applied {
                    tree: Value::Sequence(items),
                    reached: 1,
                    changed,
                    persist: changed,
                }
            }
            other => {
                if self.options.strict_paths {
                    return Err(ConfTreeError::PathNotResolved(path.to_string()));
                }
                warn!(path = %path, "document root is a scalar; nothing to mutate");
                Applied {
                    tree: other,
                    reached: 0,
                    changed: false,
                    persist: false,
                }
            }
        };
        Ok(applied)
    }

    /// Parse `path`, apply the mutation and write the result to
    /// `destination` when the root calls for it. Returns the new tree.
    pub fn write(
        &self,
        tree: Tree,
        destination: impl AsRef<Path>,
        path: &str,
        element: &Value,
        mode: Mode,
    ) -> Result<Tree, ConfTreeError> {
        let path = KeyPath::parse(path)?;
        let applied = self.apply(tree, &path, element, mode)?;
        if applied.persist {
            let written = self.store.save(&applied.tree, destination)?;
            info!(
                path = %path,
                %mode,
                reached = applied.reached,
                changed = applied.changed,
                file = %written.display(),
                "persisted mutated document"
            );
        }
        Ok(applied.tree)
    }

    fn descend(
        &self,
        map: Mapping,
        path: &KeyPath,
        element: &Value,
        mode: Mode,
        depth: usize,
    ) -> Result<(Mapping, Reach), ConfTreeError> {
        let mut reach = Reach::default();
        let mut rebuilt = Mapping::new();
        for (key, value) in map {
            let name = key
                .as_str()
                .filter(|name| path.contains(name))
                .map(str::to_owned);
            let Some(name) = name else {
                rebuilt.insert(key, value);
                continue;
            };

            let value = match value {
                Value::Sequence(items) if path.is_terminal(&name) => {
                    let (items, changed) = match mode {
                        Mode::Insert => append(items, element),
                        Mode::Remove => remove_matching(items, element),
                    };
                    debug!(depth, key = %name, %mode, changed, "mutated sequence");
                    reach.record(changed);
                    Value::Sequence(items)
                }
                Value::Mapping(_) if path.is_target(depth, &name) => {
                    return Err(ConfTreeError::UnsupportedTarget { key: name });
                }
                // a same-named mapping off the target position is left as is
                Value::Mapping(child)
                    if path.is_terminal(&name) && path.segment(depth) != Some(name.as_str()) =>
                {
                    Value::Mapping(child)
                }
                Value::Mapping(child) => {
                    debug!(depth, key = %name, "descending into mapping");
                    let (child, child_reach) =
                        self.descend(child, path, element, mode, depth + 1)?;
                    reach.merge(child_reach);
                    Value::Mapping(child)
                }
                other => other,
            };
            rebuilt.insert(key, value);
        }
        Ok((rebuilt, reach))
    }
}

fn append(mut items: Sequence, element: &Value) -> (Sequence, bool) {
    items.push(element.clone());
    (items, true)
}

fn append_unique(items: Sequence, element: &Value) -> (Sequence, bool) {
    if items.contains(element) {
        (items, false)
    } else {
        append(items, element)
    }
}

fn remove_matching(mut items: Sequence, element: &Value) -> (Sequence, bool) {
    let before = items.len();
    items.retain(|member| !shares_key(member, element));
    let changed = items.len() != before;
    (items, changed)
}

fn shares_key(member: &Value, element: &Value) -> bool {
    match (member.as_mapping(), element.as_mapping()) {
        (Some(member), Some(element)) => element.keys().any(|key| member.contains_key(key)),
        _ => false,
    }
}

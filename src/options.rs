use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use conftree_document_store::{DocumentStore, StoreOptions};

use crate::errors::ConfTreeError;
use crate::mutator::{MutatorOptions, PathMutator};

const ENV_PREFIX: &str = "CONFTREE__";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfTreeOptions {
    pub store: StoreOptions,
    pub mutator: MutatorOptions,
}

impl ConfTreeOptions {
    /// Defaults, then the options file when it exists, then `CONFTREE__*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfTreeError> {
        let mut options = match path {
            Some(path) if path.exists() => Self::from_yaml_file(path)?,
            _ => Self::default(),
        };
        options.apply_overrides(env::vars())?;
        Ok(options)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfTreeError> {
        let tree = DocumentStore::default().load(path.as_ref())?;
        if tree.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(tree).map_err(|err| {
            ConfTreeError::InvalidOption(format!("{}: {err}", path.as_ref().display()))
        })
    }

    /// Apply `CONFTREE__SECTION__FIELD=value` pairs. Names without the
    /// prefix are ignored.
    pub fn apply_overrides<I>(&mut self, vars: I) -> Result<(), ConfTreeError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, raw) in vars {
            let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let path = stripped
                .split("__")
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join(".");
            if path.is_empty() {
                continue;
            }
            self.set(&path, &raw)?;
        }
        Ok(())
    }

    pub fn set(&mut self, path: &str, raw: &str) -> Result<(), ConfTreeError> {
        let target = match path {
            "store.sort_keys" => &mut self.store.sort_keys,
            "store.create_parent_dirs" => &mut self.store.create_parent_dirs,
            "mutator.strict_paths" => &mut self.mutator.strict_paths,
            other => {
                return Err(ConfTreeError::InvalidOption(format!(
                    "unsupported option `{other}`"
                )))
            }
        };
        *target = parse_flag(raw)?;
        debug!(option = path, value = *target, "applied option override");
        Ok(())
    }

    pub fn document_store(&self) -> DocumentStore {
        DocumentStore::new(self.store.clone())
    }

    pub fn path_mutator(&self) -> PathMutator {
        PathMutator::new(self.document_store(), self.mutator.clone())
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfTreeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfTreeError::InvalidOption(format!(
            "expected a boolean, got `{other}`"
        ))),
    }
}

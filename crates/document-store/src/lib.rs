//! Document store for conftree.
//!
//! Converts between YAML files on disk and the in-memory [`Tree`]. Loading
//! only admits plain scalars, sequences and mappings; anything carrying an
//! explicit tag is refused.

pub mod errors;
pub mod render;
pub mod store;

pub use errors::StoreError;
pub use render::{render_tree, sort_mapping_keys};
pub use store::{resolve_path, DocumentStore, StoreOptions};

/// In-memory document tree.
pub type Tree = serde_yaml::Value;

#[cfg(test)]
mod tests;

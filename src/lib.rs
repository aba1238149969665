//! conftree
//!
//! Reads a YAML configuration document, finds values by key anywhere in
//! it, and applies path-guided inserts and removals that are written back
//! to disk.

pub mod api;
pub mod errors;
pub mod key_path;
pub mod logging;
pub mod lookup;
pub mod mutator;
pub mod options;

pub use api::{load_document, lookup_in, save_document, settings_get, write_at_path};
pub use conftree_document_store::{DocumentStore, StoreError, StoreOptions, Tree};
pub use errors::ConfTreeError;
pub use key_path::KeyPath;
pub use logging::init_logging;
pub use lookup::{find_first, find_values};
pub use mutator::{Applied, Mode, MutatorOptions, PathMutator};
pub use options::ConfTreeOptions;

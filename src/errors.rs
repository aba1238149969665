use conftree_document_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfTreeError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("invalid element: {0}")]
    InvalidElement(String),
    #[error("unsupported target: `{key}` holds a mapping, only sequences can be mutated")]
    UnsupportedTarget { key: String },
    #[error("path `{0}` did not resolve to a sequence")]
    PathNotResolved(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

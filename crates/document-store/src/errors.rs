use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {origin}: {message}")]
    Decode { origin: String, message: String },
    #[error("unsafe tag `{tag}` in {origin}")]
    UnsafeTag { origin: String, tag: String },
    #[error("failed to encode document: {0}")]
    Encode(String),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True for every error raised because the content itself is unusable.
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Decode { .. } | StoreError::UnsafeTag { .. })
    }
}

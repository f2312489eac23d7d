//! Error types for snapshot persistence

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a snapshot backend.
///
/// The [`Store`](super::Store) never surfaces these to its callers; they are
/// logged and the operation degrades to "no data" or "not saved".
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the blob failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The blob could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory could be determined
    #[error("Failed to determine data directory")]
    NoDataDir,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Check if this error means the stored data itself is unreadable
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StoreError::Json(_))
    }
}

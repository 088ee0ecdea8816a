use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by statistics stores regardless of where the record lives.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing or replacing the record failed.
    #[error("failed to {action} statistics record `{}`", path.display())]
    Io {
        /// Operation that failed, such as `read` or `replace`.
        action: &'static str,
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The record exists but does not hold valid statistics.
    #[error("statistics record `{}` is corrupt", path.display())]
    Corrupt {
        /// Location of the unreadable record.
        path: PathBuf,
        /// Parse or encoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an I/O error for the given action on `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

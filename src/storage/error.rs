//! Storage Errors
//!
//! Error types for the flat-file stores.

use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// Errors that can occur in the record store and event ledger
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Input was rejected or the addressed record is missing
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but its rows cannot be decoded
    #[error("Corrupt data in {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, message: impl ToString) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

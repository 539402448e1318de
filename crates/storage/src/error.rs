//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
///
/// Absence and failure are distinct: callers map `NotFound` to 404 and `Io`
/// to 500 without interpreting the underlying cause themselves.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

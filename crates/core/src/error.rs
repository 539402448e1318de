//! Error types for the core domain.

use std::path::PathBuf;
use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid store path hash: {0}")]
    InvalidStorePathHash(String),

    #[error("invalid NAR object key: {0}")]
    InvalidNarKey(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("couldn't read password file {path}: {source}")]
    PasswordFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

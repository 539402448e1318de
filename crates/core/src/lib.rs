//! Core domain types for the silo binary cache.
//!
//! This crate defines the data model shared by the storage and server crates:
//! - Object keys (NAR archives and narinfo manifests)
//! - Basic-auth credential pairs
//! - Configuration types and defaults

pub mod config;
pub mod credentials;
pub mod error;
pub mod key;

pub use config::{AppConfig, AuthConfig, CredentialConfig, ServerConfig, StoreConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use key::{Compression, NarKey, ObjectKey, StorePathHash};

/// Default capacity of the data-path I/O limiter.
pub const DEFAULT_IO_CONCURRENCY: usize = 32;

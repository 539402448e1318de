//! Object storage for the silo binary cache.
//!
//! This crate provides:
//! - Deterministic key-to-path mapping under a configured root
//! - Existence checks, streaming reads and streaming writes
//! - A fixed-capacity limiter bounding concurrent data-path I/O

pub mod error;
pub mod limiter;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use limiter::{AcquireInterrupted, IoLimiter, IoPermit};
pub use store::{ByteStream, FsStore, ObjectReader, ObjectStore};

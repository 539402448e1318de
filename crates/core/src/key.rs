//! Object key model.
//!
//! A binary cache stores exactly two kinds of objects, both addressed by
//! content hash:
//! - NAR archives, keyed by `(file_hash, compression)`
//! - narinfo manifests, keyed by the store path hash
//!
//! Keys are validated at construction, so a key can always be turned into a
//! relative storage path without further checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length accepted for a compression label (`.nar.<label>`).
const MAX_COMPRESSION_LEN: usize = 16;

/// A Nix store path hash (the 32-character base32 portion of a store path).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorePathHash(String);

impl StorePathHash {
    /// Create from a string, validating format.
    pub fn new(hash: impl Into<String>) -> crate::Result<Self> {
        let hash = hash.into();
        if hash.len() != 32 {
            return Err(crate::Error::InvalidStorePathHash(format!(
                "store path hash must be 32 chars, got {}",
                hash.len()
            )));
        }
        if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(crate::Error::InvalidStorePathHash(format!(
                "non-alphanumeric character in store path hash: {hash}"
            )));
        }
        Ok(Self(hash))
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StorePathHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorePathHash({self})")
    }
}

impl fmt::Display for StorePathHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A compression label, as it appears in `<fileHash>.nar.<compression>`.
///
/// Kept as an opaque validated string rather than an enum of known
/// algorithms: the server stores and serves archives byte-for-byte, so any
/// label a client uses round-trips unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compression(String);

impl Compression {
    /// Create from a string, validating format.
    pub fn new(label: impl Into<String>) -> crate::Result<Self> {
        let label = label.into();
        if label.is_empty() || label.len() > MAX_COMPRESSION_LEN {
            return Err(crate::Error::InvalidNarKey(format!(
                "compression label must be 1..={MAX_COMPRESSION_LEN} chars"
            )));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(crate::Error::InvalidNarKey(format!(
                "non-alphanumeric compression label: {label}"
            )));
        }
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a NAR archive object: `(file_hash, compression)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarKey {
    file_hash: String,
    compression: Compression,
}

impl NarKey {
    /// Create from parts, validating the file hash.
    pub fn new(file_hash: impl Into<String>, compression: Compression) -> crate::Result<Self> {
        let file_hash = file_hash.into();
        if file_hash.is_empty() || !file_hash.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(crate::Error::InvalidNarKey(format!(
                "invalid file hash: {file_hash}"
            )));
        }
        Ok(Self {
            file_hash,
            compression,
        })
    }

    /// Parse a request path segment of the form `<fileHash>.nar.<compression>`.
    pub fn parse(file_name: &str) -> crate::Result<Self> {
        let (file_hash, compression) = file_name.split_once(".nar.").ok_or_else(|| {
            crate::Error::InvalidNarKey(format!(
                "expected <fileHash>.nar.<compression>, got {file_name}"
            ))
        })?;
        Ok(Self::new(file_hash, Compression::new(compression)?)?)
    }

    pub fn file_hash(&self) -> &str {
        &self.file_hash
    }

    pub fn compression(&self) -> &Compression {
        &self.compression
    }
}

impl fmt::Display for NarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.nar.{}", self.file_hash, self.compression)
    }
}

/// A logical object key, fully determining the object's storage location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    /// A NAR archive under `nar/`.
    Nar(NarKey),
    /// A narinfo manifest at the store root.
    NarInfo(StorePathHash),
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nar(key) => write!(f, "nar/{key}"),
            Self::NarInfo(hash) => write!(f, "{hash}.narinfo"),
        }
    }
}

//! Filesystem object store.
//!
//! Maps logical object keys to paths under a configured root directory:
//! - NAR archive: `<root>/nar/<fileHash>.nar.<compression>`
//! - narinfo manifest: `<root>/<storePathHash>.narinfo`
//!
//! Writes go straight to the final path (truncate-or-create, no staging
//! rename): an interrupted transfer leaves a partial object, and a later
//! write to the same key overwrites it. Content is stored exactly as
//! received, with no hash verification against the key.

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use silo_core::ObjectKey;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::instrument;

/// A boxed stream of bytes for streaming reads and writes.
pub type ByteStream = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send>>;

/// Chunk size for streaming reads (64 KiB).
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// A readable object: its content stream and byte length.
pub struct ObjectReader {
    pub stream: ByteStream,
    pub len: u64,
}

/// Object store abstraction for the binary cache.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Check if an object exists. Metadata-only, never touches content.
    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool>;

    /// Open an object for reading.
    async fn read(&self, key: &ObjectKey) -> StorageResult<ObjectReader>;

    /// Create or overwrite an object from a body stream. Returns the number
    /// of bytes written.
    async fn write(&self, key: &ObjectKey, body: ByteStream) -> StorageResult<u64>;
}

/// Local filesystem object store.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`, creating `<root>/nar` if missing.
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("nar")).await?;
        Ok(Self { root })
    }

    /// Derive the storage path for a key.
    ///
    /// Keys are validated at construction, so joining their display form
    /// under the root cannot escape it.
    fn object_path(&self, key: &ObjectKey) -> PathBuf {
        match key {
            ObjectKey::Nar(nar) => self
                .root
                .join("nar")
                .join(format!("{}.nar.{}", nar.file_hash(), nar.compression())),
            ObjectKey::NarInfo(hash) => self.root.join(format!("{hash}.narinfo")),
        }
    }
}

/// Record a filesystem failure with its path and cause, then map it into
/// the storage taxonomy. Absence goes through `open_error` instead and is
/// never logged as a failure.
fn io_failure(path: &Path, err: std::io::Error) -> StorageError {
    tracing::error!(path = %path.display(), error = %err, "object I/O failed");
    StorageError::Io(err)
}

/// Map an open/stat failure: absence is `NotFound`, anything else is an
/// I/O failure.
fn open_error(key: &ObjectKey, path: &Path, err: std::io::Error) -> StorageError {
    if err.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound(key.to_string())
    } else {
        io_failure(path, err)
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    #[instrument(skip(self), fields(key = %key))]
    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let path = self.object_path(key);
        fs::try_exists(&path).await.map_err(|e| io_failure(&path, e))
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn read(&self, key: &ObjectKey) -> StorageResult<ObjectReader> {
        let path = self.object_path(key);
        let file = fs::File::open(&path)
            .await
            .map_err(|e| open_error(key, &path, e))?;
        let len = file.metadata().await.map_err(|e| io_failure(&path, e))?.len();

        // Stream the file in chunks instead of loading it into memory.
        let stream = async_stream::try_stream! {
            let mut file = file;
            let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
            loop {
                let n = file.read(&mut buf).await.map_err(|e| io_failure(&path, e))?;
                if n == 0 {
                    break;
                }
                yield Bytes::copy_from_slice(&buf[..n]);
            }
        };

        Ok(ObjectReader {
            stream: Box::pin(stream),
            len,
        })
    }

    #[instrument(skip(self, body), fields(key = %key))]
    async fn write(&self, key: &ObjectKey, mut body: ByteStream) -> StorageResult<u64> {
        let path = self.object_path(key);
        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| io_failure(&path, e))?;

        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| io_failure(&path, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| io_failure(&path, e))?;

        Ok(written)
    }
}

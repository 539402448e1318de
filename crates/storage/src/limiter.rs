//! Bounded concurrency limiter for data-path file I/O.
//!
//! One process-wide counting semaphore is shared across every NAR and
//! narinfo read and write, bounding open file descriptors and disk
//! throughput independent of how many HTTP requests are in flight.
//! Metadata-only existence checks bypass it.

use crate::store::ByteStream;
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Acquisition failed before a permit was granted.
///
/// Acquisition is a fallible suspension point: the caller must abort its
/// operation instead of proceeding without a permit.
#[derive(Debug, Error)]
#[error("I/O limiter unavailable: acquisition interrupted")]
pub struct AcquireInterrupted;

/// A shared fixed-capacity limiter guarding object data transfers.
#[derive(Clone)]
pub struct IoLimiter {
    permits: Arc<Semaphore>,
}

impl IoLimiter {
    /// Create a limiter with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
        }
    }

    /// Wait for a permit. Suspends until one frees or the request future is
    /// dropped by cancellation.
    pub async fn acquire(&self) -> Result<IoPermit, AcquireInterrupted> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AcquireInterrupted)?;
        Ok(IoPermit { _permit: permit })
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// A held permit. Released exactly once, on drop, on every exit path.
pub struct IoPermit {
    _permit: OwnedSemaphorePermit,
}

impl IoPermit {
    /// Tie this permit to the lifetime of a byte stream.
    ///
    /// The permit frees when the returned stream is fully consumed or
    /// dropped, which keeps streamed response bodies counted against the
    /// limiter for the whole transfer.
    pub fn attach(self, stream: ByteStream) -> ByteStream {
        let permit = self;
        Box::pin(stream.map(move |item| {
            let _ = &permit;
            item
        }))
    }
}

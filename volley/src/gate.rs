//! Admission control for in-flight requests.
//!
//! The gate is a counting semaphore: at most `limit` holders are admitted at once, and excess
//! callers wait in FIFO order until a holder releases its slot. Nobody is ever turned away.
use std::num::NonZeroUsize;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("Concurrency gate was closed")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    limit: NonZeroUsize,
    holders: Arc<AtomicUsize>,
    high_water: Arc<AtomicUsize>,
}

impl ConcurrencyGate {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(limit.get())),
            limit,
            holders: Arc::new(AtomicUsize::new(0)),
            high_water: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for a free slot and take it. The slot is returned when the permit is dropped.
    pub async fn acquire(&self) -> Result<GatePermit, GateError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| GateError::Closed)?;

        let holders = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(holders, Ordering::SeqCst);
        trace!("Admitted request, {holders}/{} slots held.", self.limit);

        Ok(GatePermit {
            _permit: permit,
            holders: self.holders.clone(),
        })
    }

    pub fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    /// Number of slots currently held.
    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }

    /// The largest number of slots that were ever held at the same time.
    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }

    /// Stop admitting. Waiters and later callers receive [`GateError::Closed`].
    pub fn close(&self) {
        self.semaphore.close();
    }
}

/// An admitted slot in a [`ConcurrencyGate`].
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
    holders: Arc<AtomicUsize>,
}

impl GatePermit {
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        // NOTE: Decrement before the semaphore permit is returned so the next holder never
        // observes a stale count.
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

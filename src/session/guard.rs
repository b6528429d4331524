//! Single-slot in-flight guard.

use crate::{Error, Result};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Allows at most one send at a time.
///
/// Unlike a waiting semaphore, a second caller is turned away immediately with
/// [`Error::Busy`]; nothing is queued.
#[derive(Debug, Clone)]
pub struct SendGuard {
    slot: Arc<Semaphore>,
}

/// Proof that the slot is held. Dropping it frees the slot.
#[derive(Debug)]
pub struct SendPermit {
    _permit: OwnedSemaphorePermit,
}

impl SendGuard {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the slot, or fail with `Busy` if a send is pending.
    pub fn try_acquire(&self) -> Result<SendPermit> {
        self.slot
            .clone()
            .try_acquire_owned()
            .map(|permit| SendPermit { _permit: permit })
            .map_err(|_| Error::Busy)
    }

    /// The loading flag: true while a permit is outstanding.
    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for SendGuard {
    fn default() -> Self {
        Self::new()
    }
}

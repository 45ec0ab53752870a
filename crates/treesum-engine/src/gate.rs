use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A bounded-concurrency gate.
///
/// At most `max` [`Slot`]s are outstanding at a time; further callers of
/// [`admit`](Gate::admit) queue in FIFO order (tokio's semaphore is fair)
/// and are released one at a time as earlier holders finish. A slot is
/// returned by dropping it, which happens on every exit path — success,
/// error, or panic — so a failing operation can never leak its slot.
///
/// The engine runs two independent gates, one for directory listings and
/// one for blob content reads, so the two kinds of work cannot starve
/// each other. Both exist to bound open file descriptors, so a slot
/// should be held exactly for the section that keeps a descriptor open.
#[derive(Debug, Clone)]
pub struct Gate {
    slots: Arc<Semaphore>,
}

/// An admission token. Dropping it frees the slot.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl Gate {
    /// Create a gate admitting at most `max` concurrent holders.
    pub fn new(max: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max)),
        }
    }

    /// Wait for a free slot.
    pub async fn admit(&self) -> Slot {
        // The semaphore lives as long as the gate and is never closed,
        // so acquisition can only fail if that invariant is broken.
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .expect("gate semaphore closed");
        Slot { _permit: permit }
    }

    /// Number of currently free slots.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }
}

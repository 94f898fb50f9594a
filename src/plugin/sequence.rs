//! Per-path sequencing of hot updates.
//!
//! Every update takes a ticket for its path before it starts reading. Only
//! the holder of the latest ticket may apply its result, so a slow read that
//! finishes after a newer one is dropped instead of overwriting it. A path is
//! tracked only while one of its updates is in flight.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Ticket for one update of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Latest issued ticket per path.
///
/// Sequence numbers are never reused, not even across [`Sequencer::reset`].
#[derive(Debug, Default)]
pub struct Sequencer {
    next: AtomicU64,
    latest: Mutex<FxHashMap<String, u64>>,
}

impl Sequencer {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket for `key`, invalidating earlier ones.
    pub fn begin(&self, key: &str) -> Ticket {
        let mut latest = self.latest.lock();
        let seq = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        latest.insert(key.to_string(), seq);
        Ticket {
            key: key.to_string(),
            seq,
        }
    }

    /// Whether `ticket` is still the latest for its path.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.lock().get(&ticket.key) == Some(&ticket.seq)
    }

    /// Release a finished ticket. A newer ticket for the path stays.
    pub fn finish(&self, ticket: &Ticket) {
        let mut latest = self.latest.lock();
        if latest.get(&ticket.key) == Some(&ticket.seq) {
            latest.remove(&ticket.key);
        }
    }

    /// Make every outstanding ticket of `key` stale.
    pub fn invalidate(&self, key: &str) {
        self.latest.lock().remove(key);
    }

    #[cfg(test)]
    pub(super) fn tracked(&self) -> usize {
        self.latest.lock().len()
    }

    /// Forget all paths (build end).
    pub fn reset(&self) {
        self.latest.lock().clear();
    }
}

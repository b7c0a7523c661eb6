use std::sync::atomic::{AtomicU64, Ordering};

use crate::args::PositiveU64;

/// Hands out at most `limit` attempt slots across all workers.
#[derive(Debug)]
pub struct QuotaGate {
    limit: u64,
    reserved: AtomicU64,
}

impl QuotaGate {
    #[must_use]
    pub const fn new(limit: PositiveU64) -> Self {
        Self {
            limit: limit.get(),
            reserved: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Claims one slot; `false` once every slot has been handed out.
    pub fn try_reserve(&self) -> bool {
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < self.limit).then(|| current.saturating_add(1))
            })
            .is_ok()
    }

    /// Returns a slot whose attempt was abandoned before it was sent.
    pub fn release(&self) {
        drop(
            self.reserved
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                    current.checked_sub(1)
                }),
        );
    }

    #[must_use]
    pub const fn is_reached(&self, finished: u64) -> bool {
        finished >= self.limit
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free outcome counters shared by every worker of one run.
///
/// `issued` counts round trips that produced a response; transport errors
/// bump `failed` only.
#[derive(Debug, Default)]
pub struct Counters {
    issued: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Records a completed round trip and returns its 1-based attempt index.
    pub fn record_success(&self) -> u64 {
        let index = self.issued.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        index
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Attempts that finished either way. Only approximate while workers run.
    #[must_use]
    pub fn finished(&self) -> u64 {
        self.succeeded
            .load(Ordering::Relaxed)
            .saturating_add(self.failed.load(Ordering::Relaxed))
    }

    /// Final read; exact once the pool has been joined.
    #[must_use]
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            issued: self.issued.load(Ordering::Acquire),
            succeeded: self.succeeded.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub issued: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl CountersSnapshot {
    /// Report total: succeeded plus failed, not `issued`.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.succeeded.saturating_add(self.failed)
    }
}

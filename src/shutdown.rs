//! Fire-once stop signal shared by the worker pool and its triggers.
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::broadcast;

/// Broadcast channel size for stop notifications (single signal fan-out).
const STOP_CHANNEL_CAPACITY: usize = 1;
const RUNNING: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StopReason {
    TimeLimit = 1,
    Interrupt = 2,
    Quota = 3,
    /// Every worker exited without any trigger firing.
    Drained = 4,
}

impl StopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StopReason::TimeLimit => "time limit reached",
            StopReason::Interrupt => "interrupted",
            StopReason::Quota => "request quota reached",
            StopReason::Drained => "all workers exited",
        }
    }

    const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(StopReason::TimeLimit),
            2 => Some(StopReason::Interrupt),
            3 => Some(StopReason::Quota),
            4 => Some(StopReason::Drained),
            _ => None,
        }
    }
}

/// A false-to-true flag that flips exactly once. The compare-and-swap on
/// `state` is the only gate; the broadcast only wakes async waiters.
#[derive(Debug)]
pub struct StopSignal {
    state: AtomicU8,
    notify: broadcast::Sender<StopReason>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(STOP_CHANNEL_CAPACITY);
        Self {
            state: AtomicU8::new(RUNNING),
            notify,
        }
    }

    /// Requests stop. Safe to call concurrently from any trigger; returns
    /// `true` only for the call that actually flipped the signal.
    pub fn request_stop(&self, reason: StopReason) -> bool {
        let won = self
            .state
            .compare_exchange(RUNNING, reason as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            tracing::debug!("Stop requested: {}", reason.as_str());
            drop(self.notify.send(reason));
        }
        won
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state.load(Ordering::Acquire) != RUNNING
    }

    /// The trigger that won, if any has fired.
    #[must_use]
    pub fn reason(&self) -> Option<StopReason> {
        StopReason::from_code(self.state.load(Ordering::Acquire))
    }

    /// Subscribes to the stop broadcast. Subscribe before checking
    /// `is_stopped` so a concurrent stop cannot be missed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StopReason> {
        self.notify.subscribe()
    }

    /// Resolves once the signal has fired (immediately if it already has).
    pub async fn stopped(&self) {
        let mut rx = self.subscribe();
        if self.is_stopped() {
            return;
        }
        // Any outcome (value, lag, or closed sender) means stop was sent.
        drop(rx.recv().await);
    }
}

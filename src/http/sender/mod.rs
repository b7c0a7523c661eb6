mod worker;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::args::PositiveU64;
use crate::metrics::{Counters, QuotaGate};
use crate::shutdown::{StopReason, StopSignal};

use super::workload::Attempt;
use worker::{WorkerContext, run_worker};

pub use worker::WorkerExit;

/// Pool shape for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub workers: usize,
    pub quota: Option<PositiveU64>,
    pub pacing_delay: Option<Duration>,
}

/// How the pool's workers ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolExits {
    pub stopped: usize,
    pub quota_reached: usize,
    pub build_failed: usize,
    pub panicked: usize,
}

impl PoolExits {
    const fn record(&mut self, exit: WorkerExit) {
        match exit {
            WorkerExit::Stopped => self.stopped = self.stopped.saturating_add(1),
            WorkerExit::QuotaReached => self.quota_reached = self.quota_reached.saturating_add(1),
            WorkerExit::BuildFailed => self.build_failed = self.build_failed.saturating_add(1),
        }
    }
}

/// Runs `settings.workers` independent workers until each of them exits,
/// then fires [`StopReason::Drained`] so nothing waiting on `stop` is left
/// behind.
pub async fn run_pool<A>(
    attempt: Arc<A>,
    settings: PoolSettings,
    counters: Arc<Counters>,
    stop: Arc<StopSignal>,
) -> PoolExits
where
    A: Attempt + 'static,
{
    let quota = settings.quota.map(QuotaGate::new).map(Arc::new);
    let mut worker_handles = Vec::with_capacity(settings.workers);

    for worker_id in 0..settings.workers {
        let attempt = Arc::clone(&attempt);
        let counters = Arc::clone(&counters);
        let stop = Arc::clone(&stop);
        let quota = quota.clone();
        let pacing_delay = settings.pacing_delay;

        worker_handles.push(tokio::spawn(async move {
            let exit = run_worker(WorkerContext {
                attempt: attempt.as_ref(),
                counters: &counters,
                stop: &stop,
                quota: quota.as_deref(),
                pacing_delay,
            })
            .await;
            debug!("Worker {} exited: {:?}", worker_id, exit);
            exit
        }));
    }

    let mut exits = PoolExits::default();
    for handle in worker_handles {
        match handle.await {
            Ok(exit) => exits.record(exit),
            Err(err) => {
                error!("Worker task failed: {}", err);
                exits.panicked = exits.panicked.saturating_add(1);
            }
        }
    }

    stop.request_stop(StopReason::Drained);
    exits
}

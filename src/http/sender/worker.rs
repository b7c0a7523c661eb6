use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::http::workload::{Attempt, AttemptOutcome};
use crate::metrics::{Counters, QuotaGate};
use crate::shutdown::{StopReason, StopSignal};

/// Why a worker left its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    Stopped,
    QuotaReached,
    BuildFailed,
}

pub(super) struct WorkerContext<'ctx, A: ?Sized> {
    pub(super) attempt: &'ctx A,
    pub(super) counters: &'ctx Counters,
    pub(super) stop: &'ctx StopSignal,
    pub(super) quota: Option<&'ctx QuotaGate>,
    pub(super) pacing_delay: Option<Duration>,
}

enum Step {
    Continue,
    Exit(WorkerExit),
}

pub(super) async fn run_worker<A>(ctx: WorkerContext<'_, A>) -> WorkerExit
where
    A: Attempt + ?Sized,
{
    loop {
        if let Step::Exit(exit) = run_iteration(&ctx).await {
            return exit;
        }
    }
}

async fn run_iteration<A>(ctx: &WorkerContext<'_, A>) -> Step
where
    A: Attempt + ?Sized,
{
    if ctx.stop.is_stopped() {
        return Step::Exit(WorkerExit::Stopped);
    }

    if let Some(quota) = ctx.quota
        && !quota.try_reserve()
    {
        ctx.stop.request_stop(StopReason::Quota);
        return Step::Exit(WorkerExit::QuotaReached);
    }

    let request = match ctx.attempt.build().await {
        Ok(request) => request,
        Err(err) => {
            // The worker stays down; the rest of the pool keeps going.
            error!("Failed to build request: {}", err);
            if let Some(quota) = ctx.quota {
                quota.release();
            }
            return Step::Exit(WorkerExit::BuildFailed);
        }
    };

    match ctx.attempt.execute(request).await {
        AttemptOutcome::Success { status } => {
            let index = ctx.counters.record_success();
            info!("{:>6}: {} {}", index, ctx.attempt.label(), status);
        }
        AttemptOutcome::Failure(cause) => {
            ctx.counters.record_failure();
            warn!("Error making request: {}", cause);
        }
    }

    if let Some(delay) = ctx.pacing_delay {
        tokio::select! {
            () = ctx.stop.stopped() => return Step::Exit(WorkerExit::Stopped),
            () = sleep(delay) => {}
        }
    }

    if let Some(quota) = ctx.quota
        && quota.is_reached(ctx.counters.finished())
    {
        ctx.stop.request_stop(StopReason::Quota);
        return Step::Exit(WorkerExit::QuotaReached);
    }

    Step::Continue
}

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::run::RunConfig;
use crate::error::AppResult;
use crate::http::{HttpAttempt, PoolExits, PoolSettings, build_client, run_pool};
use crate::metrics::{Counters, CountersSnapshot};
use crate::shutdown::{StopReason, StopSignal};
use crate::shutdown_handlers::{setup_interrupt_handler, setup_time_limit_handler};

/// What a finished dispatch reports back to the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub counters: CountersSnapshot,
    pub stop_reason: Option<StopReason>,
    pub exits: PoolExits,
}

/// Runs one dispatch to completion: every worker has exited and every
/// in-flight attempt has been counted when this returns. `interrupt`
/// resolving stops the run the same way the time limit does.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built or a stop handler
/// task fails to join.
pub async fn run_local<F>(config: RunConfig, interrupt: F) -> AppResult<RunOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let workers = config.worker_count()?;
    let client = build_client(config.request_timeout, config.insecure)?;
    let settings = PoolSettings {
        workers,
        quota: config.quota,
        pacing_delay: config.pacing_delay,
    };

    let stop = Arc::new(StopSignal::new());
    let counters = Arc::new(Counters::new());
    let run_start = Instant::now();

    let time_limit_handle = config
        .time_limit
        .map(|limit| setup_time_limit_handler(&stop, limit));
    let interrupt_handle = setup_interrupt_handler(&stop, interrupt);

    debug!(
        "Dispatching {} {} with {} workers",
        config.method, config.url, workers
    );
    let attempt = Arc::new(HttpAttempt::new(client, Arc::new(config)));
    let exits = run_pool(attempt, settings, Arc::clone(&counters), Arc::clone(&stop)).await;

    // The pool fires Drained on exit, so both handlers are already finishing.
    if let Some(handle) = time_limit_handle {
        handle.await?;
    }
    interrupt_handle.await?;

    let stop_reason = stop.reason();
    info!(
        "Run finished after {:?} ({})",
        run_start.elapsed(),
        stop_reason.map_or("unknown", StopReason::as_str)
    );

    Ok(RunOutcome {
        counters: counters.snapshot(),
        stop_reason,
        exits,
    })
}

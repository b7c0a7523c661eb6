use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::shutdown::{StopReason, StopSignal};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Fires `TimeLimit` once `limit` has elapsed, unless the signal fires first.
pub fn setup_time_limit_handler(
    stop: &Arc<StopSignal>,
    limit: Duration,
) -> tokio::task::JoinHandle<()> {
    let stop = Arc::clone(stop);
    tokio::spawn(async move {
        tokio::select! {
            () = stop.stopped() => {}
            () = sleep(limit) => {
                stop.request_stop(StopReason::TimeLimit);
            }
        }
    })
}

/// Fires `Interrupt` when `interrupt` resolves, unless the signal fires first.
pub fn setup_interrupt_handler<F>(stop: &Arc<StopSignal>, interrupt: F) -> tokio::task::JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stop = Arc::clone(stop);
    tokio::spawn(async move {
        tokio::select! {
            () = stop.stopped() => {}
            () = interrupt => {
                stop.request_stop(StopReason::Interrupt);
            }
        }
    })
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn os_interrupt() {
    #[cfg(unix)]
    let mut term_signal = match signal(SignalKind::terminate()) {
        Ok(signal) => Some(signal),
        Err(err) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", err);
            None
        }
    };

    #[cfg(unix)]
    {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    tracing::warn!("Failed to listen for Ctrl+C: {}", err);
                    std::future::pending::<()>().await;
                }
            }
            () = async {
                if let Some(signal) = term_signal.as_mut() {
                    signal.recv().await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => {}
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

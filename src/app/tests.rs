use std::time::Duration;

use bytes::Bytes;
use reqwest::{Method, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use super::{run_local, summary_line};
use crate::args::{PositiveU64, PositiveUsize};
use crate::domain::run::{Payload, RunConfig};
use crate::error::{AppError, AppResult};
use crate::metrics::CountersSnapshot;
use crate::shutdown::StopReason;

const TEST_TIMEOUT: Duration = Duration::from_secs(10);
const HEAD_END: &[u8] = b"\r\n\r\n";
const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn run_config(url: &str, workers: usize, quota: Option<u64>) -> AppResult<RunConfig> {
    Ok(RunConfig {
        url: Url::parse(url)
            .map_err(|err| AppError::validation(format!("Bad test url: {}", err)))?,
        target: url.to_owned(),
        concurrency: PositiveUsize::try_from(workers)?,
        cpu_multiplier: PositiveUsize::try_from(1)?,
        time_limit: None,
        quota: quota.map(PositiveU64::try_from).transpose()?,
        pacing_delay: None,
        method: Method::GET,
        header_spec: String::new(),
        payload: Payload::Body(Bytes::new()),
        request_timeout: Duration::from_secs(2),
        insecure: false,
    })
}

/// Answers every bodiless request with 200 over keep-alive connections.
async fn spawn_ok_server() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/", listener.local_addr()?);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_connection(stream));
        }
    });
    Ok(url)
}

async fn serve_connection(mut stream: TcpStream) -> std::io::Result<()> {
    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = [0_u8; 2048];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        pending.extend_from_slice(chunk.get(..read).unwrap_or_default());
        while let Some(position) = pending
            .windows(HEAD_END.len())
            .position(|window| window == HEAD_END)
        {
            pending.drain(..position.saturating_add(HEAD_END.len()));
            stream.write_all(OK_RESPONSE).await?;
        }
    }
}

#[test]
fn summary_line_matches_format() -> AppResult<()> {
    let checks = [
        (
            CountersSnapshot {
                issued: 10,
                succeeded: 10,
                failed: 0,
            },
            "Total: 10, Success: 10, Errors: 0",
        ),
        (
            CountersSnapshot {
                issued: 0,
                succeeded: 0,
                failed: 5,
            },
            "Total: 5, Success: 0, Errors: 5",
        ),
        (CountersSnapshot::default(), "Total: 0, Success: 0, Errors: 0"),
    ];
    for (snapshot, expected) in checks {
        let line = summary_line(&snapshot);
        if line != expected {
            return Err(AppError::validation(format!(
                "Expected '{}', got '{}'",
                expected, line
            )));
        }
    }
    Ok(())
}

#[test]
fn run_local_stops_at_quota() -> AppResult<()> {
    run_async_test(async {
        let url = spawn_ok_server().await?;
        let config = run_config(&url, 4, Some(10))?;
        let outcome = tokio::time::timeout(
            TEST_TIMEOUT,
            run_local(config, std::future::pending::<()>()),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))??;

        let expected = CountersSnapshot {
            issued: 10,
            succeeded: 10,
            failed: 0,
        };
        if outcome.counters != expected {
            return Err(AppError::validation(format!(
                "Unexpected counters: {:?}",
                outcome.counters
            )));
        }
        if outcome.stop_reason != Some(StopReason::Quota) {
            return Err(AppError::validation(format!(
                "Unexpected stop reason: {:?}",
                outcome.stop_reason
            )));
        }
        Ok(())
    })
}

#[test]
fn run_local_counts_refused_connections_as_errors() -> AppResult<()> {
    run_async_test(async {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        drop(listener);

        let config = run_config(&url, 2, Some(5))?;
        let outcome = tokio::time::timeout(
            TEST_TIMEOUT,
            run_local(config, std::future::pending::<()>()),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))??;

        if summary_line(&outcome.counters) != "Total: 5, Success: 0, Errors: 5" {
            return Err(AppError::validation(format!(
                "Unexpected counters: {:?}",
                outcome.counters
            )));
        }
        Ok(())
    })
}

#[test]
fn run_local_stops_on_interrupt() -> AppResult<()> {
    run_async_test(async {
        let url = spawn_ok_server().await?;
        let mut config = run_config(&url, 2, None)?;
        config.pacing_delay = Some(Duration::from_millis(5));
        let (interrupt_tx, interrupt_rx) = oneshot::channel::<()>();
        let interrupt = async move {
            drop(interrupt_rx.await);
        };

        let run = tokio::spawn(run_local(config, interrupt));
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(interrupt_tx.send(()));

        let outcome = tokio::time::timeout(TEST_TIMEOUT, run)
            .await
            .map_err(|err| AppError::validation(format!("Run did not stop: {}", err)))???;
        if outcome.stop_reason != Some(StopReason::Interrupt) {
            return Err(AppError::validation(format!(
                "Unexpected stop reason: {:?}",
                outcome.stop_reason
            )));
        }
        if outcome.counters.succeeded == 0 || outcome.exits.stopped != 2 {
            return Err(AppError::validation(format!("Unexpected outcome: {:?}", outcome)));
        }
        Ok(())
    })
}

#[test]
fn run_local_honors_time_limit() -> AppResult<()> {
    run_async_test(async {
        let url = spawn_ok_server().await?;
        let mut config = run_config(&url, 2, None)?;
        config.time_limit = Some(Duration::from_millis(150));
        config.pacing_delay = Some(Duration::from_millis(10));

        let outcome = tokio::time::timeout(
            TEST_TIMEOUT,
            run_local(config, std::future::pending::<()>()),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not stop: {}", err)))??;
        if outcome.stop_reason != Some(StopReason::TimeLimit) {
            return Err(AppError::validation(format!(
                "Unexpected stop reason: {:?}",
                outcome.stop_reason
            )));
        }
        if outcome.counters.succeeded == 0 || outcome.counters.failed != 0 {
            return Err(AppError::validation(format!(
                "Unexpected counters: {:?}",
                outcome.counters
            )));
        }
        Ok(())
    })
}

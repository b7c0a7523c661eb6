use futures_util::StreamExt;
use reqwest::{Client, Request};
use tracing::debug;

use super::data::{AttemptOutcome, FailureCause};

/// Sends one request. Any status is a success; only transport errors fail.
pub(crate) async fn execute_request(client: &Client, request: Request) -> AttemptOutcome {
    match client.execute(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            if let Err(err) = drain_response_body(response).await {
                debug!("Failed to drain response body: {}", err);
            }
            AttemptOutcome::Success { status }
        }
        Err(err) => AttemptOutcome::Failure(FailureCause::from_reqwest(&err)),
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

mod builders;
mod data;
mod execution;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Request};

use crate::domain::run::RunConfig;
use crate::error::AppResult;

pub use data::{AttemptOutcome, FailureCause, FailureKind};

pub(crate) use builders::build_request;
pub(crate) use execution::execute_request;

/// One request/response cycle as a worker sees it: build a fresh request,
/// then send it.
#[async_trait]
pub trait Attempt: Send + Sync {
    type Request: Send;

    /// `METHOD url`, used in per-attempt log lines.
    fn label(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error when the request cannot be assembled (for example an
    /// unreadable multipart file). The worker abandons the attempt.
    async fn build(&self) -> AppResult<Self::Request>;

    async fn execute(&self, request: Self::Request) -> AttemptOutcome;
}

/// Attempts against the configured target through a shared client.
#[derive(Debug, Clone)]
pub struct HttpAttempt {
    client: Client,
    config: Arc<RunConfig>,
    label: String,
}

impl HttpAttempt {
    #[must_use]
    pub fn new(client: Client, config: Arc<RunConfig>) -> Self {
        let label = format!("{} {}", config.method, config.target);
        Self {
            client,
            config,
            label,
        }
    }
}

#[async_trait]
impl Attempt for HttpAttempt {
    type Request = Request;

    fn label(&self) -> &str {
        &self.label
    }

    async fn build(&self) -> AppResult<Request> {
        build_request(&self.client, &self.config).await
    }

    async fn execute(&self, request: Request) -> AttemptOutcome {
        execute_request(&self.client, request).await
    }
}

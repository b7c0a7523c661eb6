use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("cannon/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by every worker. `timeout` bounds each attempt,
/// not the run, and zero disables it; `insecure` skips certificate chain and
/// hostname verification.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration, insecure: bool) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if !timeout.is_zero() {
        client_builder = client_builder.timeout(timeout);
    }

    if insecure {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

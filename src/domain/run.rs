//! The resolved, immutable settings a dispatch runs with.
use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Method, Url};

use crate::args::{CannonArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// Prefix marking `-d` as a path to load the body from.
const BODY_FILE_PREFIX: char = '@';

/// What each attempt sends. Exactly one variant is active for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Body(Bytes),
    Multipart { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: Url,
    /// The URL exactly as given, for log lines.
    pub target: String,
    pub concurrency: PositiveUsize,
    pub cpu_multiplier: PositiveUsize,
    pub time_limit: Option<Duration>,
    pub quota: Option<PositiveU64>,
    pub pacing_delay: Option<Duration>,
    pub method: Method,
    pub header_spec: String,
    pub payload: Payload,
    pub request_timeout: Duration,
    pub insecure: bool,
}

impl RunConfig {
    /// Resolves CLI/config arguments into a run configuration. A `@path`
    /// body is read here, before any client or worker exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, the worker count
    /// overflows, or the body file cannot be read.
    pub fn from_args(args: &CannonArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = Url::parse(raw_url).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: raw_url.to_owned(),
                source: err,
            })
        })?;

        let config = Self {
            url,
            target: raw_url.to_owned(),
            concurrency: args.concurrency,
            cpu_multiplier: args.cpu_multiplier,
            time_limit: args.time_limit(),
            quota: args.request_quota(),
            pacing_delay: args.pacing_delay(),
            method: args.method.clone(),
            header_spec: args.headers.clone(),
            payload: resolve_payload(args)?,
            request_timeout: args.request_timeout,
            insecure: args.insecure,
        };
        config.worker_count()?;
        Ok(config)
    }

    /// Pool size: concurrency factor times the CPU multiplier.
    ///
    /// # Errors
    ///
    /// Returns an error when the product overflows `usize`.
    pub fn worker_count(&self) -> AppResult<usize> {
        let concurrency = self.concurrency.get();
        let multiplier = self.cpu_multiplier.get();
        concurrency.checked_mul(multiplier).ok_or_else(|| {
            AppError::validation(ValidationError::WorkerCountOverflow {
                concurrency,
                multiplier,
            })
        })
    }
}

/// The `-d` body is always resolved, so an unreadable `@path` is fatal even
/// when a multipart upload replaces it.
fn resolve_payload(args: &CannonArgs) -> AppResult<Payload> {
    let body = load_body(&args.data)?;
    if args.multipart && !args.multipart_file.is_empty() {
        return Ok(Payload::Multipart {
            path: PathBuf::from(&args.multipart_file),
        });
    }
    Ok(Payload::Body(body))
}

/// Returns the literal body, or the contents of the file for `@path`.
///
/// # Errors
///
/// Returns an error when an `@path` file cannot be read.
pub fn load_body(data: &str) -> AppResult<Bytes> {
    match data.strip_prefix(BODY_FILE_PREFIX) {
        Some(path) => std::fs::read(path).map(Bytes::from).map_err(|err| {
            AppError::http(HttpError::ReadBodyFile {
                path: PathBuf::from(path),
                source: err,
            })
        }),
        None => Ok(Bytes::copy_from_slice(data.as_bytes())),
    }
}

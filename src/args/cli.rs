use clap::Parser;
use reqwest::Method;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_method, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "cannon",
    version,
    about = "Fire repeated HTTP requests at a URL from many concurrent workers and report success/error totals."
)]
pub struct CannonArgs {
    /// Target URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Number of parallel requests
    #[arg(short = 'c', long = "concurrency", default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Multiplier for number of CPUs used for concurrency
    #[arg(short = 'x', long = "cpus", default_value = "1", value_parser = parse_positive_usize)]
    pub cpu_multiplier: PositiveUsize,

    /// Test duration in seconds (0 = until quota or interrupt)
    #[arg(short = 't', long = "time", default_value_t = 0)]
    pub time_limit_secs: u64,

    /// Total number of requests (0 = unbounded)
    #[arg(short = 'n', long = "requests", default_value_t = 0)]
    pub requests: u64,

    /// Waiting time between requests in ms
    #[arg(short = 'w', long = "wait", default_value_t = 0)]
    pub wait_ms: u64,

    /// HTTP method (any method token, sent uppercased)
    #[arg(short = 'X', long = "method", default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// HTTP headers separated by ';' (e.g. "Accept: text/plain; X-Trace: 1")
    #[arg(short = 'H', long = "headers", default_value = "")]
    pub headers: String,

    /// Data to send in the request body (or '@<file>' to load from file)
    #[arg(short = 'd', long = "data", default_value = "", allow_hyphen_values = true)]
    pub data: String,

    /// Timeout for each HTTP request, e.g. 500ms, 1.5s, 1m30s (0 = no timeout)
    #[arg(long = "timeout", default_value = "1s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Ignore SSL certificate validation
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Send request as multipart/form-data
    #[arg(long = "multipart")]
    pub multipart: bool,

    /// File to upload as multipart/form-data (field 'file')
    #[arg(short = 'F', long = "form-file", default_value = "")]
    pub multipart_file: String,

    /// Path to a TOML or JSON config file (defaults to ./cannon.toml or ./cannon.json)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl CannonArgs {
    /// Quota as an optional positive count; zero means unbounded.
    #[must_use]
    pub fn request_quota(&self) -> Option<PositiveU64> {
        PositiveU64::try_from(self.requests).ok()
    }

    #[must_use]
    pub const fn time_limit(&self) -> Option<Duration> {
        if self.time_limit_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.time_limit_secs))
        }
    }

    #[must_use]
    pub const fn pacing_delay(&self) -> Option<Duration> {
        if self.wait_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.wait_ms))
        }
    }
}

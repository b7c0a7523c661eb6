use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::AppResult;

/// Run settings read from `cannon.toml` / `cannon.json`. Every key is
/// optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub concurrency: Option<usize>,
    pub cpu_multiplier: Option<usize>,
    pub time_limit: Option<u64>,
    pub requests: Option<u64>,
    pub wait_ms: Option<u64>,
    pub method: Option<String>,
    pub headers: Option<String>,
    pub data: Option<String>,
    pub timeout: Option<DurationValue>,
    pub insecure: Option<bool>,
    pub multipart: Option<bool>,
    pub multipart_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}

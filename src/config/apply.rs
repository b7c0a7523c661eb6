use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CannonArgs, PositiveUsize, parse_method};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies config file values to any argument not set on the command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut CannonArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "concurrency")
        && let Some(value) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(value, "concurrency")?;
    }

    if !is_cli(matches, "cpu_multiplier")
        && let Some(value) = config.cpu_multiplier
    {
        args.cpu_multiplier = ensure_positive_usize(value, "cpu_multiplier")?;
    }

    if !is_cli(matches, "time_limit_secs")
        && let Some(value) = config.time_limit
    {
        args.time_limit_secs = value;
    }

    if !is_cli(matches, "requests")
        && let Some(value) = config.requests
    {
        args.requests = value;
    }

    if !is_cli(matches, "wait_ms")
        && let Some(value) = config.wait_ms
    {
        args.wait_ms = value;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.as_deref()
    {
        args.method = parse_method(method)?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.clone()
    {
        args.headers = headers;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration()?;
    }

    if !is_cli(matches, "insecure")
        && let Some(value) = config.insecure
    {
        args.insecure = value;
    }

    if !is_cli(matches, "multipart")
        && let Some(value) = config.multipart
    {
        args.multipart = value;
    }

    if !is_cli(matches, "multipart_file")
        && let Some(path) = config.multipart_file.clone()
    {
        args.multipart_file = path;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
}

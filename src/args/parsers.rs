use std::ffi::OsString;
use std::time::Duration;

use reqwest::Method;

use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

/// Long flags that may also be spelled with a single dash (`-timeout 2s`).
const SINGLE_DASH_LONG_FLAGS: [&str; 6] = [
    "timeout",
    "multipart",
    "config",
    "verbose",
    "no-color",
    "help",
];

const DURATION_UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];
const MAX_FRACTION_DIGITS: usize = 18;

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses a method token (`-X`). Any RFC 9110 token is accepted and sent
/// uppercased.
pub(crate) fn parse_method(s: &str) -> AppResult<Method> {
    let token = s.trim().to_ascii_uppercase();
    if token.is_empty() {
        return Err(AppError::validation(ValidationError::InvalidMethod {
            value: s.to_owned(),
        }));
    }
    Method::from_bytes(token.as_bytes()).map_err(|err| {
        AppError::validation(ValidationError::InvalidMethodToken {
            value: s.to_owned(),
            source: err,
        })
    })
}

/// Parses a Go-style duration: a sequence of decimal numbers, each with an
/// optional fraction and a unit (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`), such
/// as `1.5s` or `1m30s`. `0` is zero and a bare integer is seconds.
///
/// # Errors
///
/// Returns an error when the value is empty, negative, malformed, uses an
/// unknown unit, or overflows.
pub fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }
    if value.starts_with('-') {
        return Err(AppError::validation(ValidationError::DurationNegative {
            value: value.to_owned(),
        }));
    }
    let unsigned = value.strip_prefix('+').unwrap_or(value);
    if unsigned.bytes().all(|byte| byte.is_ascii_digit()) {
        let secs: u64 = unsigned.parse().map_err(|err| {
            AppError::validation(ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })
        })?;
        return Ok(Duration::from_secs(secs));
    }

    let mut total_nanos: u64 = 0;
    let mut rest = unsigned;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(AppError::validation(
                ValidationError::InvalidDurationFormat {
                    value: value.to_owned(),
                },
            ));
        }

        let unit_len = after_fraction
            .find(|ch: char| ch.is_ascii_digit() || ch == '.')
            .unwrap_or(after_fraction.len());
        let (unit, next) = after_fraction.split_at(unit_len);
        if unit.is_empty() {
            return Err(AppError::validation(
                ValidationError::MissingDurationUnit {
                    value: value.to_owned(),
                },
            ));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| {
            AppError::validation(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            })
        })?;

        total_nanos = component_nanos(whole, fraction, per_unit)
            .and_then(|component| total_nanos.checked_add(component))
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
        rest = next;
    }

    Ok(Duration::from_nanos(total_nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u64> {
    DURATION_UNITS
        .iter()
        .find_map(|(name, nanos)| (*name == unit).then_some(*nanos))
}

/// `whole.fraction` units in nanoseconds; fraction digits past
/// `MAX_FRACTION_DIGITS` are dropped.
fn component_nanos(whole: &str, fraction: &str, per_unit: u64) -> Option<u64> {
    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut nanos = whole_value.checked_mul(per_unit)?;

    let digits = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if !digits.is_empty() {
        let numerator: u128 = digits.parse().ok()?;
        let scale = 10_u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
        let fractional = numerator
            .checked_mul(u128::from(per_unit))?
            .checked_div(scale)?;
        nanos = nanos.checked_add(u64::try_from(fractional).ok()?)?;
    }
    Some(nanos)
}

/// Rewrites Go-style single-dash long flags (`-timeout`, `-multipart=true`)
/// into their `--` form so clap can parse them. Everything after a bare `--`
/// is left untouched.
#[must_use]
pub fn normalize_single_dash_flags(raw_args: Vec<OsString>) -> Vec<OsString> {
    let mut normalized = Vec::with_capacity(raw_args.len());
    let mut passthrough = false;
    for (index, arg) in raw_args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(rewrite_single_dash_flag);
        normalized.push(rewritten.map_or(arg, OsString::from));
    }
    normalized
}

fn rewrite_single_dash_flag(arg: &str) -> Option<String> {
    let body = arg.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS
        .contains(&name)
        .then(|| format!("-{}", arg))
}

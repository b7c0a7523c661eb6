use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration '{value}' must not be negative.")]
    DurationNegative { value: String },
    #[error("Missing unit in duration '{value}'.")]
    MissingDurationUnit { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid HTTP method '{value}'.")]
    InvalidMethod { value: String },
    #[error("Invalid HTTP method '{value}': {source}")]
    InvalidMethodToken {
        value: String,
        #[source]
        source: http::method::InvalidMethod,
    },
    #[error("Worker count overflow: {concurrency} x {multiplier}.")]
    WorkerCountOverflow { concurrency: usize, multiplier: usize },
    #[error("Missing URL (pass it as the positional argument or set url in config).")]
    MissingUrl,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::CannonArgs;
pub use parsers::{normalize_single_dash_flags, parse_duration_arg};
pub(crate) use parsers::parse_method;
pub use types::{PositiveU64, PositiveUsize};

//! HTTP request construction, execution, and the worker pool that drives them.
mod client;
mod headers;
mod sender;
mod workload;


pub use client::build_client;
pub use headers::{header_map_from_spec, parse_header_spec};
pub use sender::{PoolExits, PoolSettings, WorkerExit, run_pool};
pub use workload::{Attempt, AttemptOutcome, FailureCause, FailureKind, HttpAttempt};

//! Run-wide counters and quota accounting.
mod counters;
mod quota;


pub use counters::{Counters, CountersSnapshot};
pub use quota::QuotaGate;

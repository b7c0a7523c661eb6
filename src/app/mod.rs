mod runner;
pub(crate) mod summary;

#[cfg(test)]
mod tests;

pub use runner::{RunOutcome, run_local};
pub use summary::{print_summary, summary_line};

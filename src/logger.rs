use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variables consulted for a filter directive, in order.
const FILTER_ENV_VARS: [&str; 2] = ["CANNON_LOG", "RUST_LOG"];

/// Installs the global subscriber. Output goes to stderr so stdout carries
/// only usage and the final summary line. A second call keeps the first
/// subscriber.
pub fn init_logging(verbose: bool, no_color: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(verbose))
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn resolve_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    FILTER_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

//! Tracing setup: structured JSON logging and span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "ARBOR_LOG";

/// Install the global subscriber with structured JSON output.
///
/// `ARBOR_LOG` wins over `log_level` when set. Calling this twice is a no-op.
pub fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Human-readable output with an explicit filter (for tests and local runs).
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init();
}

//! Log setup for the binary. Tests never call this.

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
const DEFAULT_FILTER: &str = "info";

/// Installs the global `tracing` subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_telemetry() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

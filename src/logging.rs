//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: `RUST_LOG` when set, `info` otherwise.
/// Output is compact for CI logs (no timestamps, no targets).
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
}

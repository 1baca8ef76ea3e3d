//! Logging initialization for the finlit client.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the client.
///
/// The default level comes from configuration; `RUST_LOG` overrides it.
/// Safe to call once per process; later calls are ignored.
///
/// # Example
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("client started");
/// ```
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

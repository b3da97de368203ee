//! Telemetry bootstrap for hosts without their own subscriber.

use tracing_subscriber::EnvFilter;

/// Initialize a simple stdout tracing subscriber for development.
///
/// `RUST_LOG` wins when set; `default_filter` (typically
/// `EngineConfig::env_filter`) is the fallback.
pub fn init_stdout_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

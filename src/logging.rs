//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout carries only the stage confirmations.
//! The default filter is `tabclean=info`; override it with `RUST_LOG`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "tabclean=info";

/// Install the global subscriber. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // Only fails when a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

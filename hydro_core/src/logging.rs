//! Tracing setup for the `hydro` binary.
//!
//! Everything goes to stderr; stdout belongs to the chat transcript.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when RUST_LOG is unset: our crates at INFO, dependencies
/// (reqwest, hyper) only when they warn
pub const DEFAULT_DIRECTIVES: &str = "warn,hydro_core=info,hydro_cli=info";

/// Install the global subscriber
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Debug-level logging routed through the test harness
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("hydro_core=debug"))
        .try_init();
}

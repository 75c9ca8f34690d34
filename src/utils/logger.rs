//! Logging utilities
//!
//! Verbosity maps to the default filter level; `RUST_LOG` overrides it.

use tracing_subscriber::EnvFilter;

/// Initialize the logger; call once per parent process
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "gradekit=info" } else { "gradekit=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

//! Diagnostic logging via `tracing`.
//!
//! Events go to stderr so that `--format json|csv` output on stdout stays
//! machine-readable. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else `default_level`.
pub fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Diagnostic logging setup.
//!
//! User-facing progress goes through `colored` console lines; `tracing` carries
//! the diagnostics underneath, filtered by `RUST_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
/// `verbose` raises the default level to `debug` for this crate.
/// Calling it more than once is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "warn,api_runner_step=debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

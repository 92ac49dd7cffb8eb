//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`; the audit report itself is
//! printed on stdout by the output module. `RUST_LOG` overrides the default
//! filter.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pcheck=debug"
    } else {
        "pcheck=warn"
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

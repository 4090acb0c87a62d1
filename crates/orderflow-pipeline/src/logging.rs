//! # Logging Setup
//!
//! Installs the global `tracing` subscriber for binaries and tests that
//! embed the pipeline. Library code only emits events.
//!
//! `RUST_LOG` wins when set; otherwise [`DEFAULT_FILTER`] applies.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is absent or unparseable.
pub const DEFAULT_FILTER: &str = "warn,orderflow=info";

/// Initializes the fmt subscriber.
///
/// Safe to call more than once: later calls are no-ops and return `false`.
pub fn init_tracing() -> bool {
    init_tracing_with(DEFAULT_FILTER)
}

/// Like [`init_tracing`] with a caller-supplied fallback filter.
pub fn init_tracing_with(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

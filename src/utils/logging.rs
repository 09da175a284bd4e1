//! Logging setup for the report engine
//!
//! Hosts embedding the engine usually install their own subscriber; this
//! helper exists for binaries and integration tests that want the default
//! `tracing` stack with env-filter control (`RUST_LOG`).

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global `tracing` subscriber with an env-derived filter.
///
/// Falls back to `info` when `RUST_LOG` is unset. Safe to call more than
/// once; subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

//! Tracing/logging initialization.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). Events go to stderr; stdout is
/// reserved for command output. Subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

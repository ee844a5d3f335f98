//! Logging setup
//!
//! Structured `tracing` output for binaries and tests embedding the client.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logger.
///
/// `RUST_LOG` wins over `level`; `level` defaults to `info`. Safe to call
/// more than once, later calls are ignored.
pub fn init_logger(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true)
        .try_init();
}

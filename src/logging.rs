//! Tracing subscriber setup (requires the `tracing` feature).
//!
//! The crate logs through the `log` facade. With the `tracing` feature,
//! [`Table::compose`](crate::table::Table::compose) additionally opens a
//! `debug` span carrying the column and row counts. [`init`] installs a plain
//! formatting subscriber for binaries that have none of their own.

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;

/// Install a global `fmt` subscriber that records events up to `max_level`
/// on stderr.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(max_level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

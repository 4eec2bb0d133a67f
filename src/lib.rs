//! Asynchronous JSON file logging core
//!
//! A single-writer, multi-producer log pipeline:
//! - producers submit structured records through `Logger::add_log`
//! - a bounded queue applies backpressure instead of dropping records
//! - one writer task appends newline-delimited JSON to a timestamped file,
//!   rotating it once it outlives the configured lifetime
//!
//! `Logger::start` launches the pipeline and `Logger::stop` drains it;
//! every record accepted before `stop` returns is on disk by then.

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod logger;

mod sink;
mod writer;

pub use config::{Config, ManageFileConfig};
pub use entry::{Level, LogEntry, Source, Speed};
pub use error::{LoggerError, Result};
pub use logger::Logger;

/// Initialize internal tracing for pipeline diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}

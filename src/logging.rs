//! Dual-sink logging setup.
//!
//! Two layers share one subscriber: a persistent file sink at DEBUG with full
//! detail (timestamps, targets, spawned command lines) and a concise console
//! sink at the level chosen by `-v`/`-q`, overridable via `RUST_LOG`.
//!
//! Initialized exactly once at process start from explicit configuration.
//! The file sink writes through to the file per event, so there is no buffer
//! to flush at exit.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber with both sinks.
///
/// `console_level` is the default console directive (`error`, `info`, `debug`,
/// `trace`); `RUST_LOG` takes precedence when set.
///
/// # Errors
///
/// Returns an [`io::Error`] if the log file cannot be opened for append.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(log_file: &Path, console_level: &str) -> io::Result<()> {
    let file = File::options().create(true).append(true).open(log_file)?;

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .with_filter(LevelFilter::DEBUG);

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level));
    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

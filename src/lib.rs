//! fetchq core library
//!
//! A persistent download queue: jobs (URL + destination directory) are stored
//! in SQLite and processed one at a time by a dispatcher that runs an external
//! downloader and records each job's outcome.
//!
//! # Architecture
//!
//! - [`db`] - Database connection and schema management
//! - [`queue`] - Durable job store and lifecycle types
//! - [`dispatch`] - Worker loop and external downloader invocation
//! - [`logging`] - Dual-sink tracing setup (detail log file + console)
//! - [`validate`] - Destination directory checks for enqueue

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod db;
pub mod dispatch;
pub mod logging;
pub mod queue;
pub mod validate;

// Re-export commonly used types
pub use db::{Database, DbError};
pub use dispatch::{
    CommandInvoker, DEFAULT_DOWNLOADER, DispatchError, DispatchStats, Dispatcher, InvokeError,
    Invoker, POLL_INTERVAL,
};
pub use queue::{Job, JobStatus, Queue, QueueError};
pub use validate::{ValidationError, resolve_destdir};

//! Dispatcher: pulls queued jobs and drives them through the downloader.
//!
//! Jobs are processed strictly one at a time in creation order. Each job's
//! outcome is committed to the store before the next job starts, so a process
//! killed mid-run leaves earlier jobs correctly recorded and later ones still
//! queued for the next run. Failed jobs are never retried automatically.
//!
//! # Example
//!
//! ```ignore
//! use fetchq::{CommandInvoker, Database, Dispatcher, Queue, POLL_INTERVAL};
//!
//! let db = Database::new(Path::new("fetchq.db")).await?;
//! let dispatcher = Dispatcher::new(Queue::new(db), CommandInvoker::new("yle-dl"));
//!
//! // One pass over everything currently queued:
//! let stats = dispatcher.run_once(-1).await?;
//!
//! // Or poll forever:
//! dispatcher.run_polling(-1, POLL_INTERVAL).await?;
//! ```

mod invoker;

pub use invoker::{CommandInvoker, DEFAULT_DOWNLOADER, InvokeError, Invoker};

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::queue::{JobStatus, Queue, QueueError};

/// Fixed backoff between polls in continuous mode.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Errors that abort a dispatch run.
///
/// Only store failures are fatal; downloader failures are recorded per job
/// and processing continues.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A store operation failed.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Outcome counts from one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    /// Jobs whose downloader exited 0.
    pub ready: usize,
    /// Jobs whose downloader exited non-zero or failed to launch.
    pub failed: usize,
}

impl DispatchStats {
    /// Total jobs processed in the pass.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ready + self.failed
    }
}

/// Single-worker dispatch loop over the job store.
#[derive(Debug)]
pub struct Dispatcher<I> {
    queue: Queue,
    invoker: I,
}

impl<I: Invoker> Dispatcher<I> {
    /// Creates a dispatcher over `queue` using `invoker` for downloads.
    #[must_use]
    pub fn new(queue: Queue, invoker: I) -> Self {
        Self { queue, invoker }
    }

    /// Processes up to `limit` queued jobs in creation order, oldest first.
    ///
    /// A `limit` of zero or less processes everything queued. An empty queue
    /// is reported and leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Queue`] if a store operation fails. Individual
    /// downloader failures do NOT error; they are recorded as failed jobs and
    /// counted in the stats.
    #[instrument(skip(self))]
    pub async fn run_once(&self, limit: i64) -> Result<DispatchStats, DispatchError> {
        let jobs = self.queue.list_by_status(JobStatus::Queued, limit).await?;
        let mut stats = DispatchStats::default();

        if jobs.is_empty() {
            info!("queue is empty");
            return Ok(stats);
        }

        for job in jobs {
            info!(job_id = job.id, url = %job.url, "starting download");

            let succeeded = match self.invoker.run(&job.url, Path::new(&job.destdir)).await {
                Ok(0) => true,
                Ok(code) => {
                    warn!(job_id = job.id, url = %job.url, code, "downloader exited non-zero");
                    false
                }
                Err(error) => {
                    warn!(job_id = job.id, url = %job.url, error = %error, "downloader launch failed");
                    false
                }
            };

            // Commit this job's outcome before touching the next one.
            if succeeded {
                self.queue.mark_ready(job.id).await?;
                stats.ready += 1;
                info!(job_id = job.id, url = %job.url, "download finished");
            } else {
                self.queue.mark_failed(job.id).await?;
                stats.failed += 1;
            }
        }

        info!(
            ready = stats.ready,
            failed = stats.failed,
            total = stats.total(),
            "dispatch pass complete"
        );

        Ok(stats)
    }

    /// Polls the queue forever: one pass, then sleep `interval`, then repeat.
    ///
    /// Never returns normally; the loop is stopped by process termination.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Queue`] if a store operation fails.
    #[instrument(skip(self))]
    pub async fn run_polling(&self, limit: i64, interval: Duration) -> Result<(), DispatchError> {
        loop {
            self.run_once(limit).await?;
            debug!(secs = interval.as_secs(), "sleeping before next poll");
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    // Full scenarios against a real store live in tests/dispatch_integration.rs.

    use super::*;
    use crate::Database;

    use async_trait::async_trait;

    struct StaticInvoker(i32);

    #[async_trait]
    impl Invoker for StaticInvoker {
        async fn run(&self, _url: &str, _destdir: &Path) -> Result<i32, InvokeError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_dispatch_stats_total() {
        let stats = DispatchStats { ready: 2, failed: 1 };
        assert_eq!(stats.total(), 3);
    }

    #[tokio::test]
    async fn test_run_once_empty_queue_processes_nothing() {
        let db = Database::new_in_memory().await.unwrap();
        let dispatcher = Dispatcher::new(Queue::new(db), StaticInvoker(0));

        let stats = dispatcher.run_once(-1).await.unwrap();

        assert_eq!(stats, DispatchStats::default());
    }

    #[tokio::test]
    async fn test_run_once_zero_exit_marks_ready() {
        let db = Database::new_in_memory().await.unwrap();
        let queue = Queue::new(db);
        let id = queue
            .enqueue("https://example.com/show/1", "/tmp")
            .await
            .unwrap();

        let dispatcher = Dispatcher::new(queue, StaticInvoker(0));
        let stats = dispatcher.run_once(-1).await.unwrap();

        assert_eq!(stats.ready, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            dispatcher.queue.get(id).await.unwrap().unwrap().status(),
            JobStatus::Ready
        );
    }

    #[tokio::test]
    async fn test_run_once_nonzero_exit_marks_failed() {
        let db = Database::new_in_memory().await.unwrap();
        let queue = Queue::new(db);
        let id = queue
            .enqueue("https://example.com/show/1", "/tmp")
            .await
            .unwrap();

        let dispatcher = Dispatcher::new(queue, StaticInvoker(2));
        let stats = dispatcher.run_once(-1).await.unwrap();

        assert_eq!(stats.ready, 0);
        assert_eq!(stats.failed, 1);
        assert_eq!(
            dispatcher.queue.get(id).await.unwrap().unwrap().status(),
            JobStatus::Failed
        );
    }
}

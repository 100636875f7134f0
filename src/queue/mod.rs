//! Durable job store for the download queue.
//!
//! SQLite-backed persistence for jobs through their lifecycle
//! (queued → ready/failed).
//!
//! # Durability model
//!
//! Every statement runs on its own pooled connection in auto-commit mode:
//! each insert and each status update is independently durable before the
//! next begins. A multi-URL enqueue interrupted midway leaves the earlier
//! rows committed, and a dispatcher killed mid-run leaves finished jobs
//! recorded and unfinished ones still queued. This deliberately trades
//! cross-row atomicity for crash-safety of completed work.
//!
//! # Example
//!
//! ```ignore
//! use fetchq::{Database, JobStatus, Queue};
//!
//! let db = Database::new(Path::new("fetchq.db")).await?;
//! let queue = Queue::new(db);
//!
//! let id = queue.enqueue("https://example.com/show/1", "/tmp/videos").await?;
//! for job in queue.list_by_status(JobStatus::Queued, -1).await? {
//!     // ... process the job ...
//!     queue.mark_ready(job.id).await?;
//! }
//! ```

mod error;
mod job;

pub use error::QueueError;
pub use job::{Job, JobStatus};

use sqlx::Row;
use tracing::instrument;

use crate::db::Database;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Returns `Ok(())` if at least one row was affected; otherwise
/// [`QueueError::JobNotFound`].
fn check_affected(id: i64, rows_affected: u64) -> Result<()> {
    if rows_affected == 0 {
        Err(QueueError::JobNotFound(id))
    } else {
        Ok(())
    }
}

/// Maps the caller-facing limit convention onto SQLite's: zero or negative
/// means unbounded, which SQLite expresses as a negative LIMIT.
fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 { -1 } else { limit }
}

/// Store of download jobs.
#[derive(Debug, Clone)]
pub struct Queue {
    db: Database,
}

impl Queue {
    /// Creates a store handle over the given database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a new queued job and returns its id.
    ///
    /// `created_at` is stamped by the database; `handled_at` starts null.
    /// The insert commits on its own, so enqueuing several URLs in a row
    /// leaves each committed row durable even if a later insert fails.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Database`] if the insert fails.
    #[instrument(skip(self), fields(url = %url, destdir = %destdir))]
    pub async fn enqueue(&self, url: &str, destdir: &str) -> Result<i64> {
        let result = sqlx::query(
            r"INSERT INTO jobs (url, destdir, status, created_at)
              VALUES (?, ?, ?, datetime('now'))
              RETURNING id",
        )
        .bind(url)
        .bind(destdir)
        .bind(JobStatus::Queued.as_str())
        .fetch_one(self.db.pool())
        .await?;

        Ok(result.get("id"))
    }

    /// Gets a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(r"SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(job)
    }

    /// Lists jobs in a status, oldest first.
    ///
    /// Order is ascending creation time with id as a deterministic tie-break
    /// for same-second inserts. A `limit` of zero or less lists everything.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: JobStatus, limit: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r"SELECT * FROM jobs
              WHERE status = ?
              ORDER BY created_at ASC, id ASC
              LIMIT ?",
        )
        .bind(status.as_str())
        .bind(effective_limit(limit))
        .fetch_all(self.db.pool())
        .await?;

        Ok(jobs)
    }

    /// Lists failed jobs, most recently handled first.
    ///
    /// A `limit` of zero or less lists everything.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn recent_failures(&self, limit: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r"SELECT * FROM jobs
              WHERE status = ?
              ORDER BY handled_at DESC, id DESC
              LIMIT ?",
        )
        .bind(JobStatus::Failed.as_str())
        .bind(effective_limit(limit))
        .fetch_all(self.db.pool())
        .await?;

        Ok(jobs)
    }

    /// Marks a job ready, stamping `handled_at`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::JobNotFound`] if no job exists with the given id.
    /// Returns [`QueueError::Database`] if the update fails.
    #[instrument(skip(self))]
    pub async fn mark_ready(&self, id: i64) -> Result<()> {
        self.set_handled(id, JobStatus::Ready).await
    }

    /// Marks a job failed, stamping `handled_at`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::JobNotFound`] if no job exists with the given id.
    /// Returns [`QueueError::Database`] if the update fails.
    #[instrument(skip(self))]
    pub async fn mark_failed(&self, id: i64) -> Result<()> {
        self.set_handled(id, JobStatus::Failed).await
    }

    /// Counts jobs in a status.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn count_by_status(&self, status: JobStatus) -> Result<i64> {
        let result = sqlx::query(r"SELECT COUNT(*) as count FROM jobs WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(result.get("count"))
    }

    /// Records a terminal status and `handled_at` for exactly one job.
    async fn set_handled(&self, id: i64, status: JobStatus) -> Result<()> {
        let result = sqlx::query(
            r"UPDATE jobs
              SET status = ?, handled_at = datetime('now')
              WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(self.db.pool())
        .await?;

        check_affected(id, result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    // Lifecycle coverage against a real database lives in
    // tests/queue_integration.rs; these cover the small helpers.

    use super::*;

    #[test]
    fn test_check_affected_zero_rows_is_not_found() {
        let result = check_affected(9, 0);
        assert!(matches!(result, Err(QueueError::JobNotFound(9))));
    }

    #[test]
    fn test_check_affected_one_row_is_ok() {
        assert!(check_affected(9, 1).is_ok());
    }

    #[test]
    fn test_effective_limit_passes_positive_through() {
        assert_eq!(effective_limit(3), 3);
    }

    #[test]
    fn test_effective_limit_maps_zero_and_negative_to_unbounded() {
        assert_eq!(effective_limit(0), -1);
        assert_eq!(effective_limit(-5), -1);
    }

    #[tokio::test]
    async fn test_mark_ready_missing_id_returns_job_not_found() {
        let db = crate::Database::new_in_memory().await.unwrap();
        let queue = Queue::new(db);

        let result = queue.mark_ready(999).await;
        assert!(matches!(result, Err(QueueError::JobNotFound(999))));
    }
}

//! Job entity and lifecycle status definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of a job.
///
/// The only valid transitions are `Queued` → `Ready` and `Queued` → `Failed`,
/// both performed by the store's update operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for the dispatcher.
    Queued,
    /// Downloader exited with code 0.
    Ready,
    /// Downloader exited non-zero or could not be launched.
    Failed,
}

impl JobStatus {
    /// Returns the database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "ready" => Ok(Self::Ready),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid job status: {s}")),
        }
    }
}

/// One download task tracked through the queue.
///
/// `url` and `destdir` are immutable after creation; `handled_at` is `None`
/// exactly while the job is queued.
#[derive(Debug, Clone, FromRow)]
pub struct Job {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Resource to download.
    pub url: String,
    /// Directory the downloader writes into, absolute at enqueue time.
    pub destdir: String,
    /// Current lifecycle state (stored as text, parsed via `status()`).
    #[sqlx(rename = "status")]
    pub status_str: String,
    /// Creation timestamp, the sole processing-order key.
    pub created_at: String,
    /// Set exactly once when the job leaves the queue.
    pub handled_at: Option<String>,
}

impl Job {
    /// Returns the parsed status, falling back to `Queued` if the stored text
    /// is unrecognized.
    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status_str.parse().unwrap_or(JobStatus::Queued)
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job {{ id: {}, url: {}, status: {} }}",
            self.id,
            self.url,
            self.status()
        )
    }
}

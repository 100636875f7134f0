//! Error types for job store operations.

use thiserror::Error;

/// Errors that can occur while reading or mutating the job store.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The database is unreachable, locked past its busy timeout, or rejected
    /// the statement. Fatal to the current command.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An update targeted an id with no matching row. Surfaced deliberately
    /// rather than treated as a silent no-op.
    #[error("job not found: id {0}")]
    JobNotFound(i64),
}

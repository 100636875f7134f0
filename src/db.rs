//! Database connection and schema management.
//!
//! SQLite connectivity for the job store: a small connection pool, WAL mode
//! so a concurrent `enqueue` from another process does not block readers, and
//! embedded migrations that make schema creation idempotent.
//!
//! # Example
//!
//! ```no_run
//! use fetchq::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(Path::new("fetchq.db")).await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::instrument;

/// Maximum connections in the pool. Kept small since SQLite serializes writes
/// at the file level anyway.
const MAX_CONNECTIONS: u32 = 5;

/// How long a connection waits on a locked database before returning
/// `SQLITE_BUSY`, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Database-level errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open or talk to the database.
    #[error("failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),

    /// Failed to apply schema migrations.
    #[error("failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connection pool wrapper for the job database.
///
/// Opening a database creates the file if needed, enables WAL mode, and runs
/// any pending migrations. Running migrations is idempotent, so `db-create`
/// can be invoked any number of times without error.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if necessary) the job database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the file cannot be opened or the
    /// pragmas fail, [`DbError::Migration`] if migrations fail.
    #[instrument(skip(db_path), fields(path = %db_path.display()))]
    pub async fn new(db_path: &Path) -> Result<Self, DbError> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(&db_url)
            .await?;

        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;
        sqlx::query(&format!("PRAGMA busy_timeout={BUSY_TIMEOUT_MS}"))
            .execute(&pool)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Opens an in-memory database for tests.
    ///
    /// A single connection is used because each `:memory:` connection is its
    /// own database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] or [`DbError::Migration`] on failure.
    #[instrument]
    pub async fn new_in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes all pool connections. The instance must not be used afterwards.
    #[instrument(skip(self))]
    pub async fn close(self) {
        self.pool.close().await;
    }
}

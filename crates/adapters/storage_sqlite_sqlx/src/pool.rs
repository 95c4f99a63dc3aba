//! Opening the event log database.
//!
//! File databases run in WAL mode with a busy timeout so that readers never
//! block the single appending writer. An in-memory database lives on exactly
//! one connection that is never recycled.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;
use crate::event_store::SqliteEventStore;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A migrated `SQLite` database holding location event streams.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` (e.g. `sqlite:wirelessmesh.db` or
    /// `sqlite::memory:`), creating the file if missing, and run pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid or the connection or
    /// migrations fail.
    #[tracing::instrument]
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let in_memory = database_url.contains(":memory:");
        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database ready");

        Ok(Self { pool })
    }

    /// An event store backed by this database.
    #[must_use]
    pub fn event_store(&self) -> SqliteEventStore {
        SqliteEventStore::new(self.pool.clone())
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

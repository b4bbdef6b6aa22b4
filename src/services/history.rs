use crate::core::Operation;
use crate::models::HistoryEntry;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the history store
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

/// PostgreSQL-backed store for the calculation history
///
/// The pool is the process-wide persistence handle: it is created once at
/// startup, shared by `Arc` across all workers, and sqlx handles the
/// safety of concurrent inserts. Entries are append-only; the only read
/// path is the bounded newest-first listing.
pub struct HistoryStore {
    pool: PgPool,
}

impl HistoryStore {
    /// Connect to PostgreSQL and run pending migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, HistoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Connect using the database section of the application settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, HistoryError> {
        tracing::info!("Connecting to PostgreSQL history store");

        Self::connect(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Append one history entry
    ///
    /// Called only after a calculation has succeeded; the caller awaits
    /// the result before writing its HTTP response.
    pub async fn record(&self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let query = r#"
            INSERT INTO calculations (operation, operand1, operand2, result, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(entry.operation.name())
            .bind(entry.operand1)
            .bind(entry.operand2)
            .bind(entry.result)
            .bind(entry.timestamp)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded calculation: {}({}, {:?}) = {}",
            entry.operation,
            entry.operand1,
            entry.operand2,
            entry.result
        );

        Ok(())
    }

    /// Fetch the most recent entries, newest first
    ///
    /// Ordering is by stored timestamp descending; the listing endpoint
    /// passes a limit of 50.
    pub async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let query = r#"
            SELECT operation, operand1, operand2, result, created_at
            FROM calculations
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let entries: Result<Vec<HistoryEntry>, HistoryError> = rows
            .iter()
            .map(|row| {
                let name: String = row.get("operation");
                let operation: Operation = name
                    .parse()
                    .map_err(|_| HistoryError::CorruptRecord(name.clone()))?;

                Ok(HistoryEntry {
                    operation,
                    operand1: row.get("operand1"),
                    operand2: row.get("operand2"),
                    result: row.get("result"),
                    timestamp: row.get("created_at"),
                })
            })
            .collect();

        entries
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, HistoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

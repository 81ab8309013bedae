//! # Database Error Types
//!
//! What can go wrong between the services and the SQLite file.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  sqlx::Error → DbError → ServiceError                   │
//! │                                                                         │
//! │  no row for the id          NotFound     (delete, update, checkout)    │
//! │  CHECK / FOREIGN KEY        Constraint   (negative price, bad order id)│
//! │  pool timed out             PoolExhausted                              │
//! │  pool closed, bad path      ConnectionFailed                           │
//! │  begin / commit             TransactionFailed                          │
//! │  embedded migrator          MigrationFailed                            │
//! │  anything else              QueryFailed                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row carries this id.
    ///
    /// ## When This Occurs
    /// - Deleting or updating a product that is not stored
    /// - Placing an order for a product that was deleted meanwhile
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A schema constraint rejected the write.
    #[error("Constraint failed: {0}")]
    Constraint(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Runtime SQL error, or a row that could not be decoded.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Every pooled connection stayed busy past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DbError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }

    /// Whether this is a missing-record error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.is_check_violation() || db_err.is_foreign_key_violation() =>
            {
                DbError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            other => DbError::QueryFailed(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

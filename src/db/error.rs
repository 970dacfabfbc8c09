use deadpool_postgres::{BuildError, PoolError};
use thiserror::Error;
use tokio_postgres::error::SqlState;

// DbError is the lowest level error type, wrapping errors from the database layer. It does not wrap
// any higher level errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Record not found
    #[error("not found")]
    NotFound,

    /// Unique constraint violation
    #[error("unique violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("foreign key violation: {0}")]
    ForeignKey(String),

    /// Check or not-null constraint violation
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Pg(#[from] tokio_postgres::Error),

    #[error(transparent)]
    Migrate(#[from] refinery::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl DbError {
    /// Turns a postgres error into one of the constraint variants when the server reported one,
    /// otherwise keeps the original error.
    pub fn from_pg(e: tokio_postgres::Error) -> Self {
        let classified = e
            .as_db_error()
            .and_then(|db| Self::from_sqlstate(db.code(), db.message()));

        classified.unwrap_or(DbError::Pg(e))
    }

    pub(crate) fn from_sqlstate(code: &SqlState, message: &str) -> Option<Self> {
        if *code == SqlState::UNIQUE_VIOLATION {
            Some(DbError::UniqueViolation(message.to_string()))
        } else if *code == SqlState::FOREIGN_KEY_VIOLATION {
            Some(DbError::ForeignKey(message.to_string()))
        } else if *code == SqlState::CHECK_VIOLATION || *code == SqlState::NOT_NULL_VIOLATION {
            Some(DbError::Constraint(message.to_string()))
        } else {
            None
        }
    }
}

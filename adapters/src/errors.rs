//! Custom error types specific to the `adapters` crate.
//!
//! Every repository implementation reports failures through `AdapterError`, so
//! services above never see a backend-specific error type.

use thiserror::Error;

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write referenced a row that does not exist.
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl AdapterError {
    /// Maps SQLite constraint violations onto the backend-neutral variants.
    pub(crate) fn from_constraint(err: rusqlite::Error, what: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                let detail = message.clone().unwrap_or_default();
                if detail.contains("FOREIGN KEY") {
                    return AdapterError::MissingReference(what.to_string());
                }
                return AdapterError::Conflict(format!("{what}: {detail}"));
            }
        }
        AdapterError::Sqlite(err)
    }
}

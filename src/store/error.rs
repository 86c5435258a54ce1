use thiserror::Error;

use crate::error::EngineError;
use crate::models::PayrollRecordId;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors.
///
/// These never reach a caller as-is: converting into [`EngineError`] keeps
/// the kind and replaces backend detail with a generic message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No payroll record with this id.
    #[error("payroll record {id} not found")]
    RecordNotFound {
        /// The id that was looked up.
        id: PayrollRecordId,
    },

    /// A uniqueness constraint was violated.
    #[error("conflict on {field}: {message}")]
    Conflict {
        /// The column whose value already exists.
        field: String,
        /// What collided.
        message: String,
    },

    /// The backend failed.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn poisoned(what: &str) -> Self {
        StoreError::Backend(format!("{} lock poisoned", what))
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound { id } => EngineError::NotFound { id },
            StoreError::Conflict { field, message } => EngineError::Validation { field, message },
            StoreError::Backend(_) => EngineError::PersistenceFailure {
                message: "the storage backend is unavailable".to_string(),
            },
        }
    }
}

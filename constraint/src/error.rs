//! Dependency check error types.

use rdfg_query::QueryError;
use thiserror::Error;

/// Result type for dependency checks.
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that stop a dependency check. Blockers are not errors.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("Dependency check unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Dependency query failed: {message}")]
    QueryFailed { message: String },
}

impl CheckError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<QueryError> for CheckError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::QueryFailed {
                message: other.to_string(),
            },
        }
    }
}

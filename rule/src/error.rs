//! Rule error types.

use rdfg_core::StoreError;
use rdfg_query::QueryError;
use thiserror::Error;

/// Result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Errors that abort a derivation operation.
///
/// A rule failing for one graph is not an error of this type; it is
/// recorded in the pass report instead.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid graph name pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Derivation engine unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Store operation failed: {message}")]
    StoreFailed { message: String },
}

impl RuleError {
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns true if the store or query engine is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RuleError::Unavailable { .. })
    }
}

impl From<QueryError> for RuleError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::QueryFailed {
                message: other.to_string(),
            },
        }
    }
}

impl From<StoreError> for RuleError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::StoreFailed {
                message: other.to_string(),
            },
        }
    }
}

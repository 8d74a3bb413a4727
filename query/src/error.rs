//! Query error types.

use rdfg_core::StoreError;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while answering a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The store or the query engine cannot be reached.
    #[error("Query engine unavailable: {reason}")]
    Unavailable { reason: String },

    /// The query itself raised.
    #[error("Query {query} failed: {message}")]
    Failed { query: String, message: String },
}

impl QueryError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn failed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Returns true if the engine itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, QueryError::Unavailable { .. })
    }
}

impl From<StoreError> for QueryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::Failed {
                query: "store access".to_string(),
                message: other.to_string(),
            },
        }
    }
}

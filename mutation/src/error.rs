//! Planning error types.

use crate::TargetKind;
use rdfg_constraint::CheckError;
use rdfg_core::{Quad, StoreError, Term};
use rdfg_query::QueryError;
use thiserror::Error;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that stop a deletion request. Blockers are not errors.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid deletion request: {message}")]
    Validation { message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: TargetKind, id: Term },

    #[error("Engine unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Store operation failed: {message}")]
    StoreFailed { message: String },

    /// A failed mutation could not be fully undone. The store is left
    /// without `unrestored`.
    #[error("Rollback incomplete after '{cause}': {} quad(s) not restored", .unrestored.len())]
    RollbackIncomplete { cause: String, unrestored: Vec<Quad> },
}

impl PlanError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(kind: TargetKind, id: Term) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn rollback_incomplete(cause: impl Into<String>, unrestored: Vec<Quad>) -> Self {
        Self::RollbackIncomplete {
            cause: cause.into(),
            unrestored,
        }
    }

    /// Returns true if the store or query engine is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PlanError::Unavailable { .. })
    }
}

impl From<QueryError> for PlanError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::QueryFailed {
                message: other.to_string(),
            },
        }
    }
}

impl From<CheckError> for PlanError {
    fn from(e: CheckError) -> Self {
        match e {
            CheckError::Validation { message } => Self::Validation { message },
            CheckError::Unavailable { reason } => Self::Unavailable { reason },
            CheckError::QueryFailed { message } => Self::QueryFailed { message },
        }
    }
}

impl From<StoreError> for PlanError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable { reason } => Self::Unavailable { reason },
            other => Self::StoreFailed {
                message: other.to_string(),
            },
        }
    }
}

//! Session error types.

use rdfg_core::ConfigError;
use rdfg_mutation::PlanError;
use rdfg_rule::RuleError;
use rdfg_text::TextError;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Planning or applying a deletion failed.
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// Recomputing or cascading virtual graphs failed.
    #[error("derivation error: {0}")]
    Rule(#[from] RuleError),

    /// Editing the text buffer failed.
    #[error("text error: {0}")]
    Text(#[from] TextError),
}

impl SessionError {
    /// Returns true if the store or query engine could not be reached.
    pub fn is_unavailable(&self) -> bool {
        match self {
            SessionError::Plan(e) => e.is_unavailable(),
            SessionError::Rule(e) => e.is_unavailable(),
            _ => false,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

//! Common error types.

use crate::GraphName;
use thiserror::Error;

/// Errors raised by a quad store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Graph not found.
    #[error("Graph not found: {0}")]
    GraphNotFound(GraphName),

    /// The quad cannot be stored (for example a literal in subject position).
    #[error("Invalid quad: {0}")]
    InvalidQuad(String),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn invalid_quad(message: impl Into<String>) -> Self {
        Self::InvalidQuad(message.into())
    }

    /// Returns true if the store itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or has unknown keys.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An IRI was configured as an empty string.
    #[error("Configuration key '{field}' must not be empty")]
    EmptyIri { field: String },
}

impl ConfigError {
    pub fn empty_iri(field: impl Into<String>) -> Self {
        Self::EmptyIri {
            field: field.into(),
        }
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

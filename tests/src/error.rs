//! Error types for the scenario framework.

use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Failed to parse an operations source.
    #[error("failed to parse operations at line {line}: {message}")]
    OperationsParse { line: usize, message: String },

    /// Failed to build the fixture store.
    #[error("invalid fixture: {message}")]
    Fixture { message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// Step not found in the operations.
    #[error("step '{step}' not found in operations")]
    StepNotFound { step: String },

    /// No operations were given.
    #[error("operations not specified for scenario '{scenario}'")]
    MissingOperations { scenario: String },

    /// Session error.
    #[error("session error: {0}")]
    Session(#[from] rdfg_session::SessionError),
}

impl ScenarioError {
    pub fn operations_parse(line: usize, message: impl Into<String>) -> Self {
        Self::OperationsParse {
            line,
            message: message.into(),
        }
    }

    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn step_not_found(step: impl Into<String>) -> Self {
        Self::StepNotFound { step: step.into() }
    }

    pub fn missing_operations(scenario: impl Into<String>) -> Self {
        Self::MissingOperations {
            scenario: scenario.into(),
        }
    }
}

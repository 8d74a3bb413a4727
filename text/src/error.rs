//! Text editing error types.

use thiserror::Error;

/// Result type for text editing.
pub type TextResult<T> = Result<T, TextError>;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("Subject token is empty")]
    EmptySubject,

    #[error("Subject token '{subject}' contains whitespace")]
    InvalidSubject { subject: String },

    #[error("Cannot build subject pattern: {message}")]
    Pattern { message: String },
}

impl TextError {
    pub fn invalid_subject(subject: impl Into<String>) -> Self {
        Self::InvalidSubject {
            subject: subject.into(),
        }
    }
}

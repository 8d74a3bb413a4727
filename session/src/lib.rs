//! Editing session
//!
//! Embedded interface used by the diagram editor.
//!
//! Responsibilities:
//! - Own the quad store for the duration of an edit
//! - Run check, plan, apply and recompute as one operation
//! - Roll back a partially applied mutation
//! - Keep the text buffer in step with structural deletions

mod error;
mod result;
mod session;

pub use error::{SessionError, SessionResult};
pub use result::{DeleteOutcome, DeleteSummary};
pub use session::Session;

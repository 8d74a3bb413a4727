//! Deletion dependency checks.
//!
//! Responsibilities:
//! - Find the references that keep a concept alive
//! - Report them as structured blockers, never as errors
//! - Distinguish an unreachable engine from a blocked target

mod blocker;
mod checker;
mod error;

pub use blocker::{Blocker, BlockerKind, Blockers};
pub use checker::{DependencyChecker, DependencyReport};
pub use error::{CheckError, CheckResult};

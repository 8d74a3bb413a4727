//! Derived ("virtual") graphs.
//!
//! Responsibilities:
//! - Name the virtual graph of a parent graph
//! - Evaluate the derivation rules for every triggered graph
//! - Replace virtual graph contents as a whole
//! - Remove virtual graphs whose parent is gone

mod engine;
mod error;
mod naming;
mod rules;

pub use engine::{DerivationEngine, DerivationFailure, RecomputeReport, VirtualGraphInfo};
pub use error::{RuleError, RuleResult};
pub use naming::VirtualNaming;
pub use rules::{aggregate_label, process_subtype, Derivation, GraphNamePattern, Rule, Triple};

//! Deletion planning.
//!
//! Responsibilities:
//! - Validate deletion targets
//! - Run dependency checks and return blockers as data
//! - Build complete removal plans, never partial ones
//! - Render plans as SPARQL for preview and apply them to a store
//!
//! # Module Structure
//!
//! - `planner` - `DeletionPlanner` dispatching on the target kind
//! - `ops/` - One plan builder per kind (concept, individual, diagram)
//! - `request` - The `MutationRequest` a plan produces
//! - `catalog` - Listings used to pick deletion targets

mod catalog;
mod error;
mod ops;
mod planner;
mod request;
mod result;
mod target;

pub use catalog::{Catalog, ConceptInfo, DiagramInfo, IndividualInfo};
pub use error::{PlanError, PlanResult};
pub use planner::DeletionPlanner;
pub use request::{AppliedMutation, MutationRequest};
pub use result::PlanOutcome;
pub use target::{DeletionTarget, Scope, TargetKind};

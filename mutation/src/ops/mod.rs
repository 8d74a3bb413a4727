//! Plan builders.
//!
//! Each target kind is planned in its own module. Builders read the
//! store but never modify it.

mod concept;
mod diagram;
mod individual;

pub use concept::plan_concept;
pub use diagram::plan_diagram;
pub use individual::{plan_executor_individual, plan_process_individual};

//! Plan outcomes.

use crate::MutationRequest;
use rdfg_constraint::Blockers;

/// What planning a deletion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// A complete plan, ready to apply.
    Ready(MutationRequest),
    /// References prevent the deletion.
    Blocked(Blockers),
}

impl PlanOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlanOutcome::Ready(_))
    }

    pub fn request(&self) -> Option<&MutationRequest> {
        match self {
            PlanOutcome::Ready(request) => Some(request),
            PlanOutcome::Blocked(_) => None,
        }
    }

    pub fn blockers(&self) -> Option<&Blockers> {
        match self {
            PlanOutcome::Blocked(blockers) => Some(blockers),
            PlanOutcome::Ready(_) => None,
        }
    }

    pub fn into_request(self) -> Option<MutationRequest> {
        match self {
            PlanOutcome::Ready(request) => Some(request),
            PlanOutcome::Blocked(_) => None,
        }
    }
}

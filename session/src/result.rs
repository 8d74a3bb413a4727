//! Session result types.

use rdfg_constraint::Blockers;
use rdfg_rule::RecomputeReport;

/// Result of a delete operation.
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    /// The target was removed and virtual graphs recomputed.
    Deleted(DeleteSummary),
    /// The target is still referenced. Nothing was changed.
    Blocked(Blockers),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }

    pub fn summary(&self) -> Option<&DeleteSummary> {
        match self {
            DeleteOutcome::Deleted(summary) => Some(summary),
            DeleteOutcome::Blocked(_) => None,
        }
    }

    pub fn blockers(&self) -> Option<&Blockers> {
        match self {
            DeleteOutcome::Blocked(blockers) => Some(blockers),
            DeleteOutcome::Deleted(_) => None,
        }
    }
}

/// Counts for an applied deletion.
#[derive(Debug, Clone, Default)]
pub struct DeleteSummary {
    /// Quads removed by the plan itself.
    pub removed: usize,
    /// Quads removed from the cascaded virtual graph.
    pub cascaded: usize,
    /// The recompute pass that followed.
    pub recompute: RecomputeReport,
}

//! Concept deletion.

use rdfg_constraint::DependencyChecker;
use rdfg_core::{QuadPattern, Term, Vocabulary};
use rdfg_query::QueryFacade;
use rdfg_store::QuadStore;

use crate::error::{PlanError, PlanResult};
use crate::{MutationRequest, PlanOutcome, TargetKind};

/// Plan deleting a process or executor concept.
///
/// The concept must be typed in its taxonomy graph. When nothing blocks,
/// every quad about it in that graph is removed.
pub fn plan_concept(
    vocab: &Vocabulary,
    facade: &dyn QueryFacade,
    store: &dyn QuadStore,
    kind: TargetKind,
    concept: &Term,
) -> PlanResult<PlanOutcome> {
    let executor = kind == TargetKind::ConceptExecutor;
    let taxonomy = vocab.taxonomy_graph(executor);
    let concept_type = if executor {
        vocab.type_executor()
    } else {
        vocab.type_process()
    };

    // Check the concept exists
    let typed = store.quads(
        &QuadPattern::any()
            .subject(concept.clone())
            .predicate(vocab.rdf_type())
            .object(concept_type)
            .graph(taxonomy.clone()),
    )?;
    if typed.is_empty() {
        return Err(PlanError::not_found(kind, concept.clone()));
    }

    let checker = DependencyChecker::new(vocab, facade);
    let report = if executor {
        checker.check_executor_deletable(store, concept)?
    } else {
        checker.check_concept_deletable(store, concept)?
    };
    if !report.deletable {
        return Ok(PlanOutcome::Blocked(report.blockers));
    }

    let removals = store.quads(&QuadPattern::any().subject(concept.clone()).graph(taxonomy))?;
    Ok(PlanOutcome::Ready(MutationRequest::removing(removals)))
}

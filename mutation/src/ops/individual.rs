//! Individual deletion.
//!
//! Only quads whose subject is the individual are removed. Quads that
//! merely point at it are left in place. A process individual takes its
//! executor group along, unless another process in the same diagram
//! still names that group.

use rdfg_core::{GraphName, Quad, QuadPattern, Term, Vocabulary};
use rdfg_store::QuadStore;

use crate::error::{PlanError, PlanResult};
use crate::{MutationRequest, TargetKind};

/// Plan deleting a process individual from the given diagrams.
///
/// The individual must be placed (`isSubprocessTrig`) in at least one of
/// them; nothing outside those placements is touched.
pub fn plan_process_individual(
    vocab: &Vocabulary,
    store: &dyn QuadStore,
    individual: &Term,
    diagrams: &[GraphName],
) -> PlanResult<MutationRequest> {
    let mut removals = Vec::new();
    let mut placed = false;

    for diagram in diagrams {
        let Some(trig) = diagram.to_term() else {
            continue;
        };
        let membership = QuadPattern::any()
            .subject(individual.clone())
            .predicate(vocab.is_subprocess_trig())
            .object(trig)
            .graph(diagram.clone());
        if store.quads(&membership)?.is_empty() {
            continue;
        }
        placed = true;

        removals.extend(subject_quads(store, individual, diagram)?);
        for group in owned_groups(vocab, store, individual, diagram)? {
            removals.extend(subject_quads(store, &group, diagram)?);
        }
    }

    if !placed {
        return Err(PlanError::not_found(
            TargetKind::IndividualProcess,
            individual.clone(),
        ));
    }
    Ok(MutationRequest::removing(removals))
}

/// Plan deleting an executor individual from the given diagrams.
///
/// An executor is placed in a diagram by the `includes` link of an
/// executor group, so those links go too. At least one link must exist.
pub fn plan_executor_individual(
    vocab: &Vocabulary,
    store: &dyn QuadStore,
    executor: &Term,
    diagrams: &[GraphName],
) -> PlanResult<MutationRequest> {
    let mut removals = Vec::new();
    let mut placed = false;

    for diagram in diagrams {
        let links = store.quads(
            &QuadPattern::any()
                .predicate(vocab.includes())
                .object(executor.clone())
                .graph(diagram.clone()),
        )?;
        if links.is_empty() {
            continue;
        }
        placed = true;
        removals.extend(links);
        removals.extend(subject_quads(store, executor, diagram)?);
    }

    if !placed {
        return Err(PlanError::not_found(
            TargetKind::IndividualExecutor,
            executor.clone(),
        ));
    }
    Ok(MutationRequest::removing(removals))
}

fn subject_quads(store: &dyn QuadStore, subject: &Term, diagram: &GraphName) -> PlanResult<Vec<Quad>> {
    Ok(store.quads(
        &QuadPattern::any()
            .subject(subject.clone())
            .graph(diagram.clone()),
    )?)
}

/// Executor groups the individual names through `hasExecutor` in this
/// diagram and no other subject there names.
fn owned_groups(
    vocab: &Vocabulary,
    store: &dyn QuadStore,
    individual: &Term,
    diagram: &GraphName,
) -> PlanResult<Vec<Term>> {
    let named = store.quads(
        &QuadPattern::any()
            .subject(individual.clone())
            .predicate(vocab.has_executor())
            .graph(diagram.clone()),
    )?;

    let mut groups = Vec::new();
    for quad in named {
        let shared = store
            .quads(
                &QuadPattern::any()
                    .predicate(vocab.has_executor())
                    .object(quad.object.clone())
                    .graph(diagram.clone()),
            )?
            .iter()
            .any(|q| &q.subject != individual);
        if !shared {
            groups.push(quad.object);
        }
    }
    Ok(groups)
}

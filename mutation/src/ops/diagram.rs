//! Diagram deletion.

use log::debug;
use rdfg_core::{GraphName, Quad, QuadPattern, Term, Vocabulary};
use rdfg_query::{var, Query, QueryFacade};
use rdfg_store::QuadStore;

use crate::error::{PlanError, PlanResult};
use crate::{MutationRequest, TargetKind};

/// Plan deleting a diagram: its whole graph, the reverse link from the
/// owning concept and, by cascade, its virtual graph.
pub fn plan_diagram(
    vocab: &Vocabulary,
    facade: &dyn QueryFacade,
    store: &dyn QuadStore,
    diagram: &Term,
) -> PlanResult<MutationRequest> {
    let not_found = || PlanError::not_found(TargetKind::Diagram, diagram.clone());
    let graph = GraphName::from_term(diagram).ok_or_else(not_found)?;

    let self_typed = store.quads(
        &QuadPattern::any()
            .subject(diagram.clone())
            .predicate(vocab.rdf_type())
            .object(vocab.diagram_type())
            .graph(graph.clone()),
    )?;
    if self_typed.is_empty() {
        return Err(not_found());
    }

    let owners = facade.execute(
        store,
        &Query::OwningConcept {
            diagram: graph.clone(),
        },
    )?;
    let removals: Vec<Quad> = owners
        .iter()
        .filter_map(|row| row.get(var::CONCEPT))
        .map(|concept| {
            Quad::new(
                concept.clone(),
                vocab.has_trig(),
                diagram.clone(),
                vocab.taxonomy_graph(false),
            )
        })
        .collect();
    if removals.is_empty() {
        debug!("{} has no owning concept", diagram);
    }

    let mut request = MutationRequest::removing(removals);
    request.graph_removals.push(graph);
    request.cascade_virtual_graph = true;
    Ok(request)
}

//! Deletion planner.

use log::{debug, info, warn};
use rdfg_constraint::{Blockers, DependencyChecker, DependencyReport};
use rdfg_core::{GraphName, Term, Vocabulary};
use rdfg_query::{var, Query, QueryFacade};
use rdfg_store::QuadStore;

use crate::error::{PlanError, PlanResult};
use crate::ops;
use crate::{DeletionTarget, MutationRequest, PlanOutcome, Scope, TargetKind};

/// Turns deletion targets into complete removal plans.
///
/// The planner only reads the store. A plan is either complete or not
/// returned at all.
pub struct DeletionPlanner<'a> {
    vocab: &'a Vocabulary,
    facade: &'a dyn QueryFacade,
}

impl<'a> DeletionPlanner<'a> {
    pub fn new(vocab: &'a Vocabulary, facade: &'a dyn QueryFacade) -> Self {
        Self { vocab, facade }
    }

    /// Plan a deletion.
    pub fn plan(&self, store: &dyn QuadStore, target: &DeletionTarget) -> PlanResult<PlanOutcome> {
        target.validate()?;
        debug!("planning {} {}", target.kind, target.id);

        let outcome = match target.kind {
            TargetKind::ConceptProcess | TargetKind::ConceptExecutor => {
                ops::plan_concept(self.vocab, self.facade, store, target.kind, &target.id)?
            }
            TargetKind::IndividualProcess => PlanOutcome::Ready(self.plan_individual_deletion(
                store,
                &target.id,
                &target.scope,
            )?),
            TargetKind::IndividualExecutor => {
                let diagrams = self.scoped_diagrams(store, &target.scope)?;
                PlanOutcome::Ready(ops::plan_executor_individual(
                    self.vocab, store, &target.id, &diagrams,
                )?)
            }
            TargetKind::Diagram => {
                PlanOutcome::Ready(self.plan_diagram_deletion(store, &target.id)?)
            }
        };

        match &outcome {
            PlanOutcome::Ready(request) => info!(
                "planned {} {}: {} quad(s), {} graph(s)",
                target.kind,
                target.id,
                request.removals.len(),
                request.graph_removals.len()
            ),
            PlanOutcome::Blocked(blockers) => warn!(
                "{} {} blocked by {} reference(s)",
                target.kind,
                target.id,
                blockers.len()
            ),
        }
        Ok(outcome)
    }

    /// Run the dependency check for a target. Only concepts can be
    /// blocked; other kinds always report deletable.
    pub fn check(&self, store: &dyn QuadStore, target: &DeletionTarget) -> PlanResult<DependencyReport> {
        target.validate()?;
        let checker = DependencyChecker::new(self.vocab, self.facade);
        Ok(match target.kind {
            TargetKind::ConceptProcess => checker.check_concept_deletable(store, &target.id)?,
            TargetKind::ConceptExecutor => checker.check_executor_deletable(store, &target.id)?,
            _ => DependencyReport::from_blockers(Blockers::new()),
        })
    }

    /// Remove every quad whose subject is the individual in the scoped
    /// diagrams that place it, together with the executor group it owns
    /// there. An individual placed in none of them is not found.
    pub fn plan_individual_deletion(
        &self,
        store: &dyn QuadStore,
        individual: &Term,
        scope: &Scope,
    ) -> PlanResult<MutationRequest> {
        let diagrams = self.scoped_diagrams(store, scope)?;
        ops::plan_process_individual(self.vocab, store, individual, &diagrams)
    }

    /// Remove a diagram graph and its reverse link, cascading to its
    /// virtual graph.
    pub fn plan_diagram_deletion(
        &self,
        store: &dyn QuadStore,
        diagram: &Term,
    ) -> PlanResult<MutationRequest> {
        ops::plan_diagram(self.vocab, self.facade, store, diagram)
    }

    /// The diagram graphs a scope covers.
    fn scoped_diagrams(&self, store: &dyn QuadStore, scope: &Scope) -> PlanResult<Vec<GraphName>> {
        let rows = self.facade.execute(store, &Query::DiagramGraphs)?;
        let diagrams: Vec<GraphName> = rows
            .iter()
            .filter_map(|r| r.get(var::TRIG).and_then(GraphName::from_term))
            .collect();

        match scope {
            Scope::AllDiagrams => Ok(diagrams),
            Scope::Diagram(graph) if diagrams.contains(graph) => Ok(vec![graph.clone()]),
            Scope::Diagram(graph) => Err(PlanError::validation(format!(
                "scope {} is not a diagram",
                graph
            ))),
        }
    }
}

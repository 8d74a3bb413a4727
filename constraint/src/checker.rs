//! Dependency checker.

use crate::{Blocker, Blockers, CheckError, CheckResult};
use log::{debug, warn};
use rdfg_core::{GraphName, Term, Vocabulary};
use rdfg_query::{var, Query, QueryFacade};
use rdfg_store::QuadStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// True only when there are no blockers.
    pub deletable: bool,
    pub blockers: Blockers,
}

impl DependencyReport {
    pub fn from_blockers(mut blockers: Blockers) -> Self {
        blockers.sort();
        Self {
            deletable: blockers.is_empty(),
            blockers,
        }
    }
}

/// Finds references that prevent deleting a concept.
pub struct DependencyChecker<'a> {
    vocab: &'a Vocabulary,
    facade: &'a dyn QueryFacade,
}

impl<'a> DependencyChecker<'a> {
    pub fn new(vocab: &'a Vocabulary, facade: &'a dyn QueryFacade) -> Self {
        Self { vocab, facade }
    }

    /// Check a process concept: live individuals, detailing diagrams and
    /// child concepts all block.
    pub fn check_concept_deletable(
        &self,
        store: &dyn QuadStore,
        concept: &Term,
    ) -> CheckResult<DependencyReport> {
        validate_concept(concept)?;
        let labels = self.diagram_labels(store)?;
        let mut blockers = Blockers::new();

        // Instances
        let rows = self.facade.execute(
            store,
            &Query::ProcessIndividuals {
                concept: Some(concept.clone()),
                diagram: None,
            },
        )?;
        for row in &rows {
            let (Some(process), Some(trig)) = (row.get(var::PROCESS), row.get(var::TRIG)) else {
                continue;
            };
            let Some(graph) = GraphName::from_term(trig) else {
                continue;
            };
            blockers.push(labelled(
                Blocker::instance(process.clone(), graph),
                labels.get(trig),
            ));
        }

        // Diagrams
        let rows = self.facade.execute(
            store,
            &Query::ConceptDiagrams {
                concept: concept.clone(),
            },
        )?;
        for trig in rows.iter().filter_map(|r| r.get(var::TRIG)) {
            blockers.push(labelled(Blocker::diagram(trig.clone()), labels.get(trig)));
        }

        // Children
        blockers.merge(self.children(store, concept, false)?);

        Ok(self.report(concept, blockers))
    }

    /// Check an executor concept: every diagram whose executor groups
    /// include it blocks, and so do child concepts.
    pub fn check_executor_deletable(
        &self,
        store: &dyn QuadStore,
        executor: &Term,
    ) -> CheckResult<DependencyReport> {
        validate_concept(executor)?;
        let labels = self.diagram_labels(store)?;
        let mut blockers = Blockers::new();

        let rows = self.facade.execute(
            store,
            &Query::ExecutorUsage {
                executor: executor.clone(),
                diagram: None,
            },
        )?;
        for row in &rows {
            let (Some(group), Some(trig)) = (row.get(var::GROUP), row.get(var::TRIG)) else {
                continue;
            };
            let Some(graph) = GraphName::from_term(trig) else {
                continue;
            };
            blockers.push(labelled(
                Blocker::used_in_diagram(group.clone(), graph),
                labels.get(trig),
            ));
        }

        blockers.merge(self.children(store, executor, true)?);

        Ok(self.report(executor, blockers))
    }

    fn children(&self, store: &dyn QuadStore, concept: &Term, executor: bool) -> CheckResult<Blockers> {
        let rows = self.facade.execute(
            store,
            &Query::ConceptChildren {
                concept: concept.clone(),
                taxonomy: self.vocab.taxonomy_graph(executor),
            },
        )?;
        Ok(rows
            .iter()
            .filter_map(|r| r.get(var::CHILD))
            .map(|child| Blocker::child(child.clone()))
            .collect())
    }

    /// Diagram name -> label, for readable blockers.
    fn diagram_labels(&self, store: &dyn QuadStore) -> CheckResult<BTreeMap<Term, String>> {
        let rows = self.facade.execute(store, &Query::DiagramGraphs)?;
        Ok(rows
            .iter()
            .filter_map(|r| {
                let trig = r.get(var::TRIG)?;
                let label = r.get(var::LABEL)?;
                Some((trig.clone(), label.value().to_string()))
            })
            .collect())
    }

    fn report(&self, target: &Term, blockers: Blockers) -> DependencyReport {
        let report = DependencyReport::from_blockers(blockers);
        if report.deletable {
            debug!("{} has no dependents", target);
        } else {
            warn!("{} is blocked by {} reference(s)", target, report.blockers.len());
        }
        report
    }
}

fn labelled(blocker: Blocker, label: Option<&String>) -> Blocker {
    match label {
        Some(label) => blocker.with_label(label.clone()),
        None => blocker,
    }
}

fn validate_concept(concept: &Term) -> CheckResult<()> {
    match concept {
        Term::Iri(iri) if !iri.trim().is_empty() => Ok(()),
        Term::Iri(_) => Err(CheckError::validation("empty concept identifier")),
        other => Err(CheckError::validation(format!(
            "concept must be an IRI, got {}",
            other
        ))),
    }
}

//! Listings used to pick deletion targets.

use rdfg_core::{GraphName, Term, Vocabulary};
use rdfg_query::{var, Binding, Query, QueryFacade};
use rdfg_store::QuadStore;
use serde::Serialize;

use crate::PlanResult;

/// A concept in a taxonomy graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptInfo {
    pub concept: Term,
    pub label: Option<String>,
    pub parent: Option<Term>,
}

/// A diagram graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramInfo {
    pub graph: GraphName,
    pub label: Option<String>,
    pub defines_process: Option<Term>,
}

/// An individual and the diagram it is placed in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct IndividualInfo {
    pub individual: Term,
    pub diagram: GraphName,
}

/// Read-only listings over a store.
pub struct Catalog<'a> {
    vocab: &'a Vocabulary,
    facade: &'a dyn QueryFacade,
}

impl<'a> Catalog<'a> {
    pub fn new(vocab: &'a Vocabulary, facade: &'a dyn QueryFacade) -> Self {
        Self { vocab, facade }
    }

    /// Process or executor concepts with their labels and parents.
    pub fn concepts(&self, store: &dyn QuadStore, executor: bool) -> PlanResult<Vec<ConceptInfo>> {
        let concept_type = if executor {
            self.vocab.type_executor()
        } else {
            self.vocab.type_process()
        };
        let rows = self.facade.execute(
            store,
            &Query::Concepts {
                taxonomy: self.vocab.taxonomy_graph(executor),
                concept_type,
            },
        )?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ConceptInfo {
                    concept: row.get(var::CONCEPT)?.clone(),
                    label: text(row, var::LABEL),
                    parent: row.get(var::PARENT).cloned(),
                })
            })
            .collect())
    }

    /// Every diagram graph.
    pub fn diagrams(&self, store: &dyn QuadStore) -> PlanResult<Vec<DiagramInfo>> {
        let rows = self.facade.execute(store, &Query::DiagramGraphs)?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(DiagramInfo {
                    graph: GraphName::from_term(row.get(var::TRIG)?)?,
                    label: text(row, var::LABEL),
                    defines_process: row.get(var::DEFINES_PROCESS).cloned(),
                })
            })
            .collect())
    }

    /// Where a process concept is placed, or where an executor concept is
    /// included.
    pub fn individuals_of(
        &self,
        store: &dyn QuadStore,
        concept: &Term,
        executor: bool,
    ) -> PlanResult<Vec<IndividualInfo>> {
        let query = if executor {
            Query::ExecutorUsage {
                executor: concept.clone(),
                diagram: None,
            }
        } else {
            Query::ProcessIndividuals {
                concept: Some(concept.clone()),
                diagram: None,
            }
        };
        let rows = self.facade.execute(store, &query)?;

        let mut infos: Vec<IndividualInfo> = rows
            .iter()
            .filter_map(|row| {
                Some(IndividualInfo {
                    individual: concept.clone(),
                    diagram: GraphName::from_term(row.get(var::TRIG)?)?,
                })
            })
            .collect();
        // Several groups of one diagram count once
        infos.sort();
        infos.dedup();
        Ok(infos)
    }

    /// The concept a diagram details.
    pub fn owning_concept(&self, store: &dyn QuadStore, diagram: &GraphName) -> PlanResult<Option<Term>> {
        let rows = self.facade.execute(
            store,
            &Query::OwningConcept {
                diagram: diagram.clone(),
            },
        )?;
        Ok(rows.iter().find_map(|row| row.get(var::CONCEPT).cloned()))
    }
}

fn text(row: &Binding, name: &str) -> Option<String> {
    row.get(name).map(|t| t.value().to_string())
}

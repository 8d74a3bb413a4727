//! Query execution against a store.

use crate::binding::var;
use crate::{Binding, Query, QueryResult};
use log::{debug, trace};
use rdfg_core::{GraphName, QuadPattern, StoreResult, Term, Vocabulary};
use rdfg_store::QuadStore;

/// Answers [`Query`] templates.
///
/// Implementations must return rows in a stable order; callers rely on
/// it for deterministic output.
pub trait QueryFacade {
    fn execute(&self, store: &dyn QuadStore, query: &Query) -> QueryResult<Vec<Binding>>;
}

/// Evaluates query templates with quad-pattern lookups.
#[derive(Debug, Clone, Default)]
pub struct StoreQueryFacade {
    vocab: Vocabulary,
}

impl StoreQueryFacade {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }
}

impl QueryFacade for StoreQueryFacade {
    fn execute(&self, store: &dyn QuadStore, query: &Query) -> QueryResult<Vec<Binding>> {
        trace!("{}:\n{}", query.name(), query.to_sparql(&self.vocab));
        let eval = Evaluator {
            store,
            vocab: &self.vocab,
        };

        let mut rows = match query {
            Query::DiagramGraphs => eval.diagram_graphs()?,
            Query::VirtualGraphs => eval.virtual_graphs()?,
            Query::ProcessIndividuals { concept, diagram } => {
                eval.process_individuals(concept.as_ref(), diagram.as_ref())?
            }
            Query::ConceptDiagrams { concept } => eval.concept_diagrams(concept)?,
            Query::ConceptChildren { concept, taxonomy } => {
                eval.concept_children(concept, taxonomy)?
            }
            Query::ExecutorUsage { executor, diagram } => {
                eval.executor_usage(executor, diagram.as_ref())?
            }
            Query::ProcessSubtypeFacts { diagram } => eval.process_subtype_facts(diagram)?,
            Query::ExecutorGroupMembers { diagram } => eval.executor_group_members(diagram)?,
            Query::OwningConcept { diagram } => eval.owning_concept(diagram)?,
            Query::Concepts {
                taxonomy,
                concept_type,
            } => eval.concepts(taxonomy, concept_type)?,
        };

        rows.sort();
        rows.dedup();
        debug!("{} -> {} row(s)", query.name(), rows.len());
        Ok(rows)
    }
}

/// Borrowed state for evaluating one query.
struct Evaluator<'a> {
    store: &'a dyn QuadStore,
    vocab: &'a Vocabulary,
}

impl<'a> Evaluator<'a> {
    /// The smallest object of `(subject, predicate, ?o)` in `graph`.
    fn first_object(
        &self,
        subject: &Term,
        predicate: Term,
        graph: &GraphName,
    ) -> StoreResult<Option<Term>> {
        let pattern = QuadPattern::any()
            .subject(subject.clone())
            .predicate(predicate)
            .graph(graph.clone());
        Ok(self.store.quads(&pattern)?.into_iter().next().map(|q| q.object))
    }

    /// Returns true if `graph` carries the diagram self-typing quad.
    fn is_diagram(&self, graph: &GraphName) -> StoreResult<bool> {
        let Some(name) = graph.to_term() else {
            return Ok(false);
        };
        let pattern = QuadPattern::any()
            .subject(name)
            .predicate(self.vocab.rdf_type())
            .object(self.vocab.diagram_type())
            .graph(graph.clone());
        Ok(!self.store.quads(&pattern)?.is_empty())
    }

    /// Graphs self-typed with `class`, paired with their name term.
    fn self_typed(&self, class: Term) -> StoreResult<Vec<(GraphName, Term)>> {
        let pattern = QuadPattern::any()
            .predicate(self.vocab.rdf_type())
            .object(class);
        Ok(self
            .store
            .quads(&pattern)?
            .into_iter()
            .filter(|q| q.graph.is_named_by(&q.subject))
            .map(|q| (q.graph, q.subject))
            .collect())
    }

    fn diagram_graphs(&self) -> QueryResult<Vec<Binding>> {
        let mut rows = Vec::new();
        for (graph, trig) in self.self_typed(self.vocab.diagram_type())? {
            let label = self.first_object(&trig, self.vocab.rdfs_label(), &graph)?;
            let defines = self.first_object(&trig, self.vocab.defines_process(), &graph)?;
            rows.push(
                Binding::new()
                    .with(var::TRIG, trig)
                    .with_opt(var::LABEL, label)
                    .with_opt(var::DEFINES_PROCESS, defines),
            );
        }
        Ok(rows)
    }

    fn virtual_graphs(&self) -> QueryResult<Vec<Binding>> {
        let mut rows = Vec::new();
        for (graph, vg) in self.self_typed(self.vocab.virtual_type())? {
            let parent = self.first_object(&vg, self.vocab.has_parent_obj(), &graph)?;
            rows.push(
                Binding::new()
                    .with(var::VIRTUAL_TRIG, vg)
                    .with_opt(var::PARENT_TRIG, parent),
            );
        }
        Ok(rows)
    }

    fn process_individuals(
        &self,
        concept: Option<&Term>,
        diagram: Option<&GraphName>,
    ) -> QueryResult<Vec<Binding>> {
        let mut pattern = QuadPattern::any().predicate(self.vocab.is_subprocess_trig());
        if let Some(concept) = concept {
            pattern = pattern.subject(concept.clone());
        }
        if let Some(diagram) = diagram {
            pattern = pattern.graph(diagram.clone());
        }

        // Membership is only asserted inside the diagram it points at
        Ok(self
            .store
            .quads(&pattern)?
            .into_iter()
            .filter(|q| q.graph.is_named_by(&q.object))
            .map(|q| {
                Binding::new()
                    .with(var::PROCESS, q.subject)
                    .with(var::TRIG, q.object)
            })
            .collect())
    }

    fn concept_diagrams(&self, concept: &Term) -> QueryResult<Vec<Binding>> {
        let pattern = QuadPattern::any()
            .subject(concept.clone())
            .predicate(self.vocab.has_trig())
            .graph(self.vocab.taxonomy_graph(false));
        Ok(self
            .store
            .quads(&pattern)?
            .into_iter()
            .map(|q| Binding::new().with(var::TRIG, q.object))
            .collect())
    }

    fn concept_children(&self, concept: &Term, taxonomy: &GraphName) -> QueryResult<Vec<Binding>> {
        let pattern = QuadPattern::any()
            .predicate(self.vocab.has_parent_obj())
            .object(concept.clone())
            .graph(taxonomy.clone());
        Ok(self
            .store
            .quads(&pattern)?
            .into_iter()
            .filter(|q| &q.subject != concept)
            .map(|q| Binding::new().with(var::CHILD, q.subject))
            .collect())
    }

    fn executor_usage(
        &self,
        executor: &Term,
        diagram: Option<&GraphName>,
    ) -> QueryResult<Vec<Binding>> {
        let mut pattern = QuadPattern::any()
            .predicate(self.vocab.includes())
            .object(executor.clone());
        if let Some(diagram) = diagram {
            pattern = pattern.graph(diagram.clone());
        }

        let mut rows = Vec::new();
        for quad in self.store.quads(&pattern)? {
            if !self.is_diagram(&quad.graph)? {
                continue;
            }
            if let Some(trig) = quad.graph.to_term() {
                rows.push(
                    Binding::new()
                        .with(var::GROUP, quad.subject)
                        .with(var::TRIG, trig),
                );
            }
        }
        Ok(rows)
    }

    fn process_subtype_facts(&self, diagram: &GraphName) -> QueryResult<Vec<Binding>> {
        let Some(trig) = diagram.to_term() else {
            return Ok(Vec::new());
        };
        let ptree = self.vocab.taxonomy_graph(false);
        let defines = self.first_object(&trig, self.vocab.defines_process(), diagram)?;

        let mut rows = Vec::new();
        for row in self.process_individuals(None, Some(diagram))? {
            let Some(process) = row.get(var::PROCESS).cloned() else {
                continue;
            };
            let parent = self.first_object(&process, self.vocab.has_parent_obj(), &ptree)?;
            let has_trig = self.first_object(&process, self.vocab.has_trig(), &ptree)?;
            rows.push(
                Binding::new()
                    .with(var::PROCESS, process)
                    .with_opt(var::PARENT, parent)
                    .with_opt(var::HAS_TRIG, has_trig)
                    .with_opt(var::DEFINES_PROCESS, defines.clone()),
            );
        }
        Ok(rows)
    }

    fn executor_group_members(&self, diagram: &GraphName) -> QueryResult<Vec<Binding>> {
        let rtree = self.vocab.taxonomy_graph(true);
        let groups = self.store.quads(
            &QuadPattern::any()
                .predicate(self.vocab.rdf_type())
                .object(self.vocab.executor_group())
                .graph(diagram.clone()),
        )?;

        let mut rows = Vec::new();
        for group in groups.into_iter().map(|q| q.subject) {
            let members = self.store.quads(
                &QuadPattern::any()
                    .subject(group.clone())
                    .predicate(self.vocab.includes())
                    .graph(diagram.clone()),
            )?;
            if members.is_empty() {
                rows.push(Binding::new().with(var::GROUP, group.clone()));
                continue;
            }
            for executor in members.into_iter().map(|q| q.object) {
                // The executor tree is authoritative for labels
                let label = match self.first_object(&executor, self.vocab.rdfs_label(), &rtree)? {
                    Some(label) => Some(label),
                    None => self.first_object(&executor, self.vocab.rdfs_label(), diagram)?,
                };
                rows.push(
                    Binding::new()
                        .with(var::GROUP, group.clone())
                        .with(var::EXECUTOR, executor)
                        .with_opt(var::LABEL, label),
                );
            }
        }
        Ok(rows)
    }

    fn owning_concept(&self, diagram: &GraphName) -> QueryResult<Vec<Binding>> {
        let Some(trig) = diagram.to_term() else {
            return Ok(Vec::new());
        };
        let pattern = QuadPattern::any()
            .predicate(self.vocab.has_trig())
            .object(trig)
            .graph(self.vocab.taxonomy_graph(false));
        Ok(self
            .store
            .quads(&pattern)?
            .into_iter()
            .map(|q| Binding::new().with(var::CONCEPT, q.subject))
            .collect())
    }

    fn concepts(&self, taxonomy: &GraphName, concept_type: &Term) -> QueryResult<Vec<Binding>> {
        let pattern = QuadPattern::any()
            .predicate(self.vocab.rdf_type())
            .object(concept_type.clone())
            .graph(taxonomy.clone());

        let mut rows = Vec::new();
        for concept in self.store.quads(&pattern)?.into_iter().map(|q| q.subject) {
            let label = self.first_object(&concept, self.vocab.rdfs_label(), taxonomy)?;
            let parent = self.first_object(&concept, self.vocab.has_parent_obj(), taxonomy)?;
            rows.push(
                Binding::new()
                    .with(var::CONCEPT, concept)
                    .with_opt(var::LABEL, label)
                    .with_opt(var::PARENT, parent),
            );
        }
        Ok(rows)
    }
}

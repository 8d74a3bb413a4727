//! Fixture builder for diagram data.

use rdfg_core::{GraphName, Quad, Term, Vocabulary};
use rdfg_session::Session;
use rdfg_store::MemoryStore;

use crate::error::{ScenarioError, ScenarioResult};

/// Builds the starting quads of a scenario.
///
/// Every name is a local name in the vocabulary namespace; `"t_p1"` as a
/// diagram means the graph `vad:t_p1`.
#[derive(Debug, Clone)]
pub struct Fixture {
    vocab: Vocabulary,
    quads: Vec<Quad>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::default())
    }

    pub fn with_vocabulary(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            quads: Vec::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The IRI term for a local name.
    pub fn term(&self, local: &str) -> Term {
        self.vocab.ns(local)
    }

    /// The graph named by a local name.
    pub fn graph(&self, local: &str) -> GraphName {
        GraphName::iri(format!("{}{}", self.vocab.namespace, local))
    }

    /// Add a raw quad.
    pub fn quad(mut self, quad: Quad) -> Self {
        self.quads.push(quad);
        self
    }

    /// A process concept in the process taxonomy.
    pub fn concept(self, local: &str, label: Option<&str>) -> Self {
        self.typed_concept(false, local, label)
    }

    /// An executor concept in the executor taxonomy.
    pub fn executor(self, local: &str, label: Option<&str>) -> Self {
        self.typed_concept(true, local, label)
    }

    fn typed_concept(mut self, executor: bool, local: &str, label: Option<&str>) -> Self {
        let graph = self.vocab.taxonomy_graph(executor);
        let concept_type = if executor {
            self.vocab.type_executor()
        } else {
            self.vocab.type_process()
        };
        let id = self.term(local);
        self.quads.push(Quad::new(id.clone(), self.vocab.rdf_type(), concept_type, graph.clone()));
        if let Some(label) = label {
            self.quads.push(Quad::new(id, self.vocab.rdfs_label(), Term::literal(label), graph));
        }
        self
    }

    /// Place a process concept under a parent in the process taxonomy.
    pub fn child_of(self, child: &str, parent: &str) -> Self {
        self.parent_link(false, child, parent)
    }

    /// Place an executor concept under a parent in the executor taxonomy.
    pub fn executor_child_of(self, child: &str, parent: &str) -> Self {
        self.parent_link(true, child, parent)
    }

    fn parent_link(mut self, executor: bool, child: &str, parent: &str) -> Self {
        let quad = Quad::new(
            self.term(child),
            self.vocab.has_parent_obj(),
            self.term(parent),
            self.vocab.taxonomy_graph(executor),
        );
        self.quads.push(quad);
        self
    }

    /// A diagram graph detailing `concept`.
    pub fn diagram(mut self, trig: &str, concept: &str) -> Self {
        self = self.bare_diagram(trig);
        let graph = self.graph(trig);
        let (trig_term, concept_term) = (self.term(trig), self.term(concept));
        self.quads.push(Quad::new(
            trig_term.clone(),
            self.vocab.defines_process(),
            concept_term.clone(),
            graph,
        ));
        self.quads.push(Quad::new(
            concept_term,
            self.vocab.has_trig(),
            trig_term,
            self.vocab.taxonomy_graph(false),
        ));
        self
    }

    /// A diagram graph with no owning concept.
    pub fn bare_diagram(mut self, trig: &str) -> Self {
        let quad = Quad::new(
            self.term(trig),
            self.vocab.rdf_type(),
            self.vocab.diagram_type(),
            self.graph(trig),
        );
        self.quads.push(quad);
        self
    }

    /// Place an individual of `concept` in a diagram.
    pub fn individual(mut self, concept: &str, trig: &str) -> Self {
        let quad = Quad::new(
            self.term(concept),
            self.vocab.is_subprocess_trig(),
            self.term(trig),
            self.graph(trig),
        );
        self.quads.push(quad);
        self
    }

    /// An executor group of a process individual, including `executors`.
    pub fn executor_group(mut self, group: &str, process: &str, trig: &str, executors: &[&str]) -> Self {
        let graph = self.graph(trig);
        let group_term = self.term(group);
        self.quads.push(Quad::new(
            self.term(process),
            self.vocab.has_executor(),
            group_term.clone(),
            graph.clone(),
        ));
        self.quads.push(Quad::new(
            group_term.clone(),
            self.vocab.rdf_type(),
            self.vocab.executor_group(),
            graph.clone(),
        ));
        for executor in executors {
            self.quads.push(Quad::new(
                group_term.clone(),
                self.vocab.includes(),
                self.term(executor),
                graph.clone(),
            ));
        }
        self
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Build the store.
    pub fn build(&self) -> ScenarioResult<MemoryStore> {
        MemoryStore::from_quads(self.quads.clone()).map_err(|e| ScenarioError::fixture(e.to_string()))
    }

    /// Build a session over the store.
    pub fn session(&self) -> ScenarioResult<Session<MemoryStore>> {
        Ok(Session::new(self.build()?, self.vocab.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdfg_store::QuadStore;

    #[test]
    fn test_diagram_links_both_ways() {
        let fixture = Fixture::new().concept("p1", Some("Top")).diagram("t_p1", "p1");
        let store = fixture.build().unwrap();

        assert_eq!(store.len().unwrap(), 5);
        assert_eq!(store.graph_len(&fixture.graph("t_p1")), 2);
    }
}

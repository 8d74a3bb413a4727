//! In-memory quad store.

use crate::index::{IdAllocator, PositionIndex, QuadId};
use crate::QuadStore;
use log::{debug, trace};
use rdfg_core::{GraphName, Quad, QuadPattern, StoreError, StoreResult, Term};
use std::collections::{HashMap, HashSet};

/// Quads held in memory, indexed by every position.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Quad storage
    quads: HashMap<QuadId, Quad>,
    /// Reverse lookup used to reject duplicates
    ids: HashMap<Quad, QuadId>,
    id_alloc: IdAllocator,
    subject_index: PositionIndex<Term>,
    predicate_index: PositionIndex<Term>,
    object_index: PositionIndex<Term>,
    graph_index: PositionIndex<GraphName>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given quads.
    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> StoreResult<Self> {
        let mut store = Self::new();
        for quad in quads {
            store.add_quad(quad)?;
        }
        Ok(store)
    }

    /// Number of quads in one graph.
    pub fn graph_len(&self, graph: &GraphName) -> usize {
        self.graph_index.count(graph)
    }

    fn validate(quad: &Quad) -> StoreResult<()> {
        if quad.subject.is_literal() {
            return Err(StoreError::invalid_quad(format!(
                "literal in subject position: {}",
                quad
            )));
        }
        if !quad.predicate.is_iri() {
            return Err(StoreError::invalid_quad(format!(
                "predicate must be an IRI: {}",
                quad
            )));
        }
        Ok(())
    }

    /// The smallest candidate set among the fixed positions of a pattern.
    /// `None` means no position is fixed.
    fn candidates(&self, pattern: &QuadPattern) -> Option<Vec<QuadId>> {
        let mut sets: Vec<Option<&HashSet<QuadId>>> = Vec::new();
        if let Some(s) = &pattern.subject {
            sets.push(self.subject_index.get(s));
        }
        if let Some(p) = &pattern.predicate {
            sets.push(self.predicate_index.get(p));
        }
        if let Some(o) = &pattern.object {
            sets.push(self.object_index.get(o));
        }
        if let Some(g) = &pattern.graph {
            sets.push(self.graph_index.get(g));
        }
        if sets.is_empty() {
            return None;
        }
        // A fixed position with no entry means nothing can match
        if sets.iter().any(Option::is_none) {
            return Some(Vec::new());
        }
        let smallest = sets.into_iter().flatten().min_by_key(|set| set.len())?;
        Some(smallest.iter().copied().collect())
    }
}

impl QuadStore for MemoryStore {
    fn add_quad(&mut self, quad: Quad) -> StoreResult<bool> {
        Self::validate(&quad)?;
        if self.ids.contains_key(&quad) {
            return Ok(false);
        }
        let id = self.id_alloc.alloc();

        // Update indexes
        self.subject_index.insert(&quad.subject, id);
        self.predicate_index.insert(&quad.predicate, id);
        self.object_index.insert(&quad.object, id);
        self.graph_index.insert(&quad.graph, id);

        trace!("add {}", quad);
        self.ids.insert(quad.clone(), id);
        self.quads.insert(id, quad);
        Ok(true)
    }

    fn remove_quad(&mut self, quad: &Quad) -> StoreResult<bool> {
        let Some(id) = self.ids.remove(quad) else {
            return Ok(false);
        };
        self.quads.remove(&id);

        self.subject_index.remove(&quad.subject, id);
        self.predicate_index.remove(&quad.predicate, id);
        self.object_index.remove(&quad.object, id);
        self.graph_index.remove(&quad.graph, id);

        trace!("remove {}", quad);
        Ok(true)
    }

    fn quads(&self, pattern: &QuadPattern) -> StoreResult<Vec<Quad>> {
        let mut result: Vec<Quad> = match self.candidates(pattern) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.quads.get(id))
                .filter(|q| pattern.matches(q))
                .cloned()
                .collect(),
            None => self.quads.values().cloned().collect(),
        };
        result.sort();
        Ok(result)
    }

    fn drop_graph(&mut self, graph: &GraphName) -> StoreResult<Vec<Quad>> {
        let removed = self.remove_matching(&QuadPattern::any().graph(graph.clone()))?;
        debug!("dropped graph {} ({} quads)", graph, removed.len());
        Ok(removed)
    }

    fn graphs(&self) -> StoreResult<Vec<GraphName>> {
        let mut names: Vec<GraphName> = self.graph_index.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.quads.len())
    }
}

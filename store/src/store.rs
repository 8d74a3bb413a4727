//! The quad store interface.

use rdfg_core::{GraphName, Quad, QuadPattern, StoreResult};
use std::collections::BTreeSet;

/// A mutable set of quads.
///
/// Only `add_quad`, `remove_quad` and `quads` are required; the other
/// operations are expressed through them. Results of `quads` are sorted.
pub trait QuadStore {
    /// Insert a quad. Returns false if it was already present.
    fn add_quad(&mut self, quad: Quad) -> StoreResult<bool>;

    /// Remove a quad. Returns false if it was not present.
    fn remove_quad(&mut self, quad: &Quad) -> StoreResult<bool>;

    /// All quads matching the pattern, in sorted order.
    fn quads(&self, pattern: &QuadPattern) -> StoreResult<Vec<Quad>>;

    /// Remove every quad matching the pattern and return what was removed.
    ///
    /// The default stops at the first failed removal, with the earlier ones
    /// already applied and not reported. Callers that must undo a partial
    /// removal should remove quad by quad instead.
    fn remove_matching(&mut self, pattern: &QuadPattern) -> StoreResult<Vec<Quad>> {
        let matched = self.quads(pattern)?;
        for quad in &matched {
            self.remove_quad(quad)?;
        }
        Ok(matched)
    }

    /// Remove every quad of a graph and return what was removed.
    fn drop_graph(&mut self, graph: &GraphName) -> StoreResult<Vec<Quad>> {
        self.remove_matching(&QuadPattern::any().graph(graph.clone()))
    }

    /// Returns true if the exact quad is present.
    fn contains(&self, quad: &Quad) -> StoreResult<bool> {
        let pattern = QuadPattern::any()
            .subject(quad.subject.clone())
            .predicate(quad.predicate.clone())
            .object(quad.object.clone())
            .graph(quad.graph.clone());
        Ok(!self.quads(&pattern)?.is_empty())
    }

    /// Names of all graphs holding at least one quad, sorted.
    fn graphs(&self) -> StoreResult<Vec<GraphName>> {
        let names: BTreeSet<GraphName> = self
            .quads(&QuadPattern::any())?
            .into_iter()
            .map(|q| q.graph)
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Number of quads in the store.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.quads(&QuadPattern::any())?.len())
    }

    /// Returns true if the store holds no quads.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert many quads. Returns the number that were new.
    fn extend(&mut self, quads: Vec<Quad>) -> StoreResult<usize> {
        let mut added = 0;
        for quad in quads {
            if self.add_quad(quad)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

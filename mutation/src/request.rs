//! Mutation requests produced by the planner.

use crate::PlanResult;
use log::{debug, warn};
use crate::PlanError;
use rdfg_core::{GraphName, PrefixTable, Quad, QuadPattern};
use rdfg_store::QuadStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete removal plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRequest {
    /// Individual quads to remove.
    pub removals: Vec<Quad>,
    /// Graphs to remove as a whole.
    pub graph_removals: Vec<GraphName>,
    /// The virtual graphs of removed diagrams must be cascaded.
    #[serde(default)]
    pub cascade_virtual_graph: bool,
}

impl MutationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan removing these quads, sorted and deduplicated.
    pub fn removing(mut removals: Vec<Quad>) -> Self {
        removals.sort();
        removals.dedup();
        Self {
            removals,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.graph_removals.is_empty()
    }

    /// Render as SPARQL Update: one `DELETE DATA` block for the quads,
    /// then one `DROP SILENT GRAPH` per removed graph.
    pub fn to_sparql(&self, prefixes: &PrefixTable) -> String {
        let mut statements = Vec::new();

        if !self.removals.is_empty() {
            let mut by_graph: BTreeMap<&GraphName, Vec<&Quad>> = BTreeMap::new();
            for quad in &self.removals {
                by_graph.entry(&quad.graph).or_default().push(quad);
            }

            let mut body = String::from("DELETE DATA {\n");
            for (graph, quads) in by_graph {
                let (indent, open) = match graph {
                    GraphName::Default => ("  ", false),
                    g => {
                        body.push_str(&format!("  GRAPH {} {{\n", prefixes.format_graph(g)));
                        ("    ", true)
                    }
                };
                for quad in quads {
                    body.push_str(&format!(
                        "{}{} {} {} .\n",
                        indent,
                        prefixes.format_term(&quad.subject),
                        prefixes.format_term(&quad.predicate),
                        prefixes.format_term(&quad.object)
                    ));
                }
                if open {
                    body.push_str("  }\n");
                }
            }
            body.push('}');
            statements.push(body);
        }

        for graph in &self.graph_removals {
            statements.push(format!("DROP SILENT GRAPH {}", prefixes.format_graph(graph)));
        }

        format!("{}\n{}", prefixes.sparql_header(), statements.join(" ;\n"))
    }

    /// Apply the request. On failure every removal already made is put
    /// back before the error is returned. If some of them cannot be put
    /// back the error is [`PlanError::RollbackIncomplete`].
    pub fn apply(&self, store: &mut dyn QuadStore) -> PlanResult<AppliedMutation> {
        let mut applied = AppliedMutation::default();

        if let Err(e) = self.apply_into(store, &mut applied) {
            warn!("mutation failed, rolling back {} quad(s): {}", applied.removed.len(), e);
            let unrestored = applied.rollback(store);
            if !unrestored.is_empty() {
                return Err(PlanError::rollback_incomplete(e.to_string(), unrestored));
            }
            return Err(e);
        }

        debug!("applied mutation: {} quad(s) removed", applied.removed.len());
        Ok(applied)
    }

    fn apply_into(&self, store: &mut dyn QuadStore, applied: &mut AppliedMutation) -> PlanResult<()> {
        for quad in &self.removals {
            if store.remove_quad(quad)? {
                applied.removed.push(quad.clone());
            }
        }
        // Quad by quad, so a failure part way through is recorded
        for graph in &self.graph_removals {
            for quad in store.quads(&QuadPattern::any().graph(graph.clone()))? {
                if store.remove_quad(&quad)? {
                    applied.removed.push(quad);
                }
            }
        }
        Ok(())
    }
}

/// What applying a request actually removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedMutation {
    pub removed: Vec<Quad>,
}

impl AppliedMutation {
    /// Put every removed quad back and return the ones that could not be.
    /// A failed restore does not stop the remaining ones.
    #[must_use = "unrestored quads mean the store is inconsistent"]
    pub fn rollback(self, store: &mut dyn QuadStore) -> Vec<Quad> {
        let mut unrestored = Vec::new();
        for quad in self.removed {
            if let Err(e) = store.add_quad(quad.clone()) {
                warn!("rollback could not restore {}: {}", quad, e);
                unrestored.push(quad);
            }
        }
        unrestored
    }

    /// Merge quads removed by a follow-up step.
    pub fn extend(&mut self, removed: Vec<Quad>) {
        self.removed.extend(removed);
    }
}

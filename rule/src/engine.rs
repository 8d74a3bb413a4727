//! Derivation engine.

use crate::naming::VirtualNaming;
use crate::rules::{Rule, Triple};
use crate::{RuleError, RuleResult};
use log::{debug, info, warn};
use rdfg_core::{GraphName, Quad, Vocabulary};
use rdfg_query::{var, Query, QueryError, QueryFacade};
use rdfg_store::QuadStore;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A rule that failed for one graph. Its virtual graph was left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationFailure {
    pub graph: GraphName,
    pub rule: String,
    pub message: String,
}

impl fmt::Display for DerivationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: {}", self.rule, self.graph, self.message)
    }
}

/// Summary of a recompute pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Quads removed from virtual graphs.
    pub removed: usize,
    /// Quads inserted into virtual graphs, metadata included.
    pub created: usize,
    /// Parent graphs processed.
    pub graphs_touched: usize,
    pub errors: Vec<DerivationFailure>,
}

impl RecomputeReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A virtual graph and the parent its metadata points at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtualGraphInfo {
    pub graph: GraphName,
    pub parent: Option<GraphName>,
}

/// Recomputes virtual graphs from their parents.
#[derive(Debug, Clone)]
pub struct DerivationEngine {
    vocab: Vocabulary,
    naming: VirtualNaming,
    rules: Vec<Rule>,
}

/// Outcome of evaluating all rules for one parent.
enum GraphOutcome {
    Derived(Vec<Triple>),
    Failed(Vec<DerivationFailure>),
}

impl DerivationEngine {
    /// Create an engine with the default rule set.
    pub fn new(vocab: Vocabulary) -> Self {
        Self::with_rules(vocab, Rule::default_set())
    }

    /// Create an engine with an explicit rule set.
    pub fn with_rules(vocab: Vocabulary, rules: Vec<Rule>) -> Self {
        let naming = VirtualNaming::new(vocab.namespace.clone());
        Self {
            vocab,
            naming,
            rules,
        }
    }

    pub fn naming(&self) -> &VirtualNaming {
        &self.naming
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // ==================== Recompute ====================

    /// Recompute every virtual graph.
    ///
    /// Each triggered parent is processed to completion (clear, evaluate
    /// every rule, insert) before the next. A rule failing for one parent
    /// is recorded and leaves that virtual graph empty; the pass goes on.
    /// Virtual graphs no parent produced in this pass are removed. Only an
    /// unreachable store or query engine aborts the pass.
    ///
    /// A virtual graph is cleared before its rules run, so an abort leaves
    /// the graph being recomputed empty. Graphs already done keep their
    /// new contents and the remaining ones keep their old contents.
    pub fn recompute_all(
        &self,
        store: &mut dyn QuadStore,
        facade: &dyn QueryFacade,
    ) -> RuleResult<RecomputeReport> {
        let mut report = RecomputeReport::default();

        let graphs = store.graphs()?;
        let diagrams = self.diagram_set(&*store, facade)?;
        let existing = self.virtual_graphs(&*store, facade)?;
        let virtuals: BTreeSet<GraphName> = existing.iter().map(|v| v.graph.clone()).collect();

        // parent -> rules triggered by it, in rule order
        let mut triggered: BTreeMap<GraphName, Vec<&Rule>> = BTreeMap::new();
        for rule in &self.rules {
            for parent in rule.trigger.select(&graphs, &diagrams, &virtuals) {
                triggered.entry(parent).or_default().push(rule);
            }
        }

        let mut produced = BTreeSet::new();
        for (parent, rules) in &triggered {
            let Some(vg) = self.naming.virtual_graph_for(parent) else {
                warn!("no virtual graph name for {}", parent);
                report.errors.push(DerivationFailure {
                    graph: parent.clone(),
                    rule: "naming".to_string(),
                    message: "only IRI-named graphs have virtual graphs".to_string(),
                });
                continue;
            };
            self.recompute_parent(store, facade, parent, &vg, rules, &mut report)?;
            produced.insert(vg);
        }

        // Stale virtual graphs: parents gone or no longer triggered
        for info in existing {
            if !produced.contains(&info.graph) {
                let removed = store.drop_graph(&info.graph)?;
                debug!("removed stale virtual graph {}", info.graph);
                report.removed += removed.len();
            }
        }

        info!(
            "recompute: {} graph(s), {} removed, {} created, {} error(s)",
            report.graphs_touched,
            report.removed,
            report.created,
            report.errors.len()
        );
        Ok(report)
    }

    /// Recompute the virtual graph of a single parent.
    pub fn recompute_graph(
        &self,
        store: &mut dyn QuadStore,
        facade: &dyn QueryFacade,
        parent: &GraphName,
    ) -> RuleResult<RecomputeReport> {
        let mut report = RecomputeReport::default();
        let graphs = store.graphs()?;
        let diagrams = self.diagram_set(&*store, facade)?;
        let virtuals: BTreeSet<GraphName> = self
            .virtual_graphs(&*store, facade)?
            .into_iter()
            .map(|v| v.graph)
            .collect();

        let rules: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| {
                r.trigger
                    .select(&graphs, &diagrams, &virtuals)
                    .contains(parent)
            })
            .collect();

        let Some(vg) = self.naming.virtual_graph_for(parent) else {
            return Ok(report);
        };
        if rules.is_empty() {
            report.removed += store.drop_graph(&vg)?.len();
            return Ok(report);
        }
        self.recompute_parent(store, facade, parent, &vg, &rules, &mut report)?;
        Ok(report)
    }

    fn recompute_parent(
        &self,
        store: &mut dyn QuadStore,
        facade: &dyn QueryFacade,
        parent: &GraphName,
        vg: &GraphName,
        rules: &[&Rule],
        report: &mut RecomputeReport,
    ) -> RuleResult<()> {
        report.graphs_touched += 1;

        // Full replace
        report.removed += store.drop_graph(vg)?.len();

        let triples = match self.evaluate(&*store, facade, parent, rules)? {
            GraphOutcome::Derived(triples) => triples,
            GraphOutcome::Failed(failures) => {
                for failure in &failures {
                    warn!("derivation failed: {}", failure);
                }
                report.errors.extend(failures);
                return Ok(());
            }
        };
        if triples.is_empty() {
            debug!("{}: nothing derived", parent);
            return Ok(());
        }

        let mut quads = self.metadata(vg, parent);
        quads.extend(triples.into_iter().map(|t| t.in_graph(vg.clone())));

        match store.extend(quads) {
            Ok(created) => {
                debug!("{}: {} quad(s) into {}", parent, created, vg);
                report.created += created;
                Ok(())
            }
            Err(e) if e.is_unavailable() => Err(e.into()),
            Err(e) => {
                // Never leave a half-populated virtual graph behind
                store.drop_graph(vg)?;
                warn!("insert into {} failed: {}", vg, e);
                report.errors.push(DerivationFailure {
                    graph: parent.clone(),
                    rule: "insert".to_string(),
                    message: e.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Evaluate every rule for one parent. Any failure fails the parent.
    fn evaluate(
        &self,
        store: &dyn QuadStore,
        facade: &dyn QueryFacade,
        parent: &GraphName,
        rules: &[&Rule],
    ) -> RuleResult<GraphOutcome> {
        let mut triples = Vec::new();
        let mut failures = Vec::new();

        for rule in rules {
            let query = rule.derive.query(parent);
            let result = facade
                .execute(store, &query)
                .and_then(|rows| rule.derive.derive(&self.vocab, &rows));
            match result {
                Ok(derived) => triples.extend(derived),
                Err(QueryError::Unavailable { reason }) => {
                    return Err(RuleError::unavailable(reason));
                }
                Err(e) => failures.push(DerivationFailure {
                    graph: parent.clone(),
                    rule: rule.name().to_string(),
                    message: e.to_string(),
                }),
            }
        }

        if failures.is_empty() {
            triples.sort();
            triples.dedup();
            Ok(GraphOutcome::Derived(triples))
        } else {
            Ok(GraphOutcome::Failed(failures))
        }
    }

    fn metadata(&self, vg: &GraphName, parent: &GraphName) -> Vec<Quad> {
        let (Some(vg_term), Some(parent_term)) = (vg.to_term(), parent.to_term()) else {
            return Vec::new();
        };
        vec![
            Quad::new(
                vg_term.clone(),
                self.vocab.rdf_type(),
                self.vocab.virtual_type(),
                vg.clone(),
            ),
            Quad::new(
                vg_term,
                self.vocab.has_parent_obj(),
                parent_term,
                vg.clone(),
            ),
        ]
    }

    // ==================== Cascade ====================

    /// Remove the virtual graph whose parent link is `diagram`.
    ///
    /// Returns the number of quads removed.
    pub fn cascade_delete(
        &self,
        store: &mut dyn QuadStore,
        facade: &dyn QueryFacade,
        diagram: &GraphName,
    ) -> RuleResult<usize> {
        let mut removed = 0;
        for info in self.virtual_graphs(&*store, facade)? {
            if info.parent.as_ref() == Some(diagram) {
                removed += store.drop_graph(&info.graph)?.len();
                info!("cascade: dropped {} (parent {})", info.graph, diagram);
            }
        }
        Ok(removed)
    }

    /// Virtual graphs whose parent graph no longer holds any quad.
    pub fn orphaned_virtual_graphs(
        &self,
        store: &dyn QuadStore,
        facade: &dyn QueryFacade,
    ) -> RuleResult<Vec<VirtualGraphInfo>> {
        let graphs: BTreeSet<GraphName> = store.graphs()?.into_iter().collect();
        Ok(self
            .virtual_graphs(store, facade)?
            .into_iter()
            .filter(|info| info.parent.as_ref().map_or(true, |p| !graphs.contains(p)))
            .collect())
    }

    /// Remove every orphaned virtual graph. Returns the graphs removed.
    pub fn cascade_orphans(
        &self,
        store: &mut dyn QuadStore,
        facade: &dyn QueryFacade,
    ) -> RuleResult<Vec<GraphName>> {
        let orphans = self.orphaned_virtual_graphs(&*store, facade)?;
        let mut dropped = Vec::with_capacity(orphans.len());
        for info in orphans {
            store.drop_graph(&info.graph)?;
            info!("dropped orphaned virtual graph {}", info.graph);
            dropped.push(info.graph);
        }
        Ok(dropped)
    }

    // ==================== Listing ====================

    /// All virtual graphs with their parent links, sorted.
    pub fn virtual_graphs(
        &self,
        store: &dyn QuadStore,
        facade: &dyn QueryFacade,
    ) -> RuleResult<Vec<VirtualGraphInfo>> {
        let rows = facade.execute(store, &Query::VirtualGraphs)?;
        let mut infos: Vec<VirtualGraphInfo> = rows
            .iter()
            .filter_map(|row| {
                let graph = GraphName::from_term(row.get(var::VIRTUAL_TRIG)?)?;
                let parent = row.get(var::PARENT_TRIG).and_then(GraphName::from_term);
                Some(VirtualGraphInfo { graph, parent })
            })
            .collect();
        infos.sort();
        infos.dedup();
        Ok(infos)
    }

    fn diagram_set(
        &self,
        store: &dyn QuadStore,
        facade: &dyn QueryFacade,
    ) -> RuleResult<BTreeSet<GraphName>> {
        Ok(facade
            .execute(store, &Query::DiagramGraphs)?
            .iter()
            .filter_map(|row| row.get(var::TRIG).and_then(GraphName::from_term))
            .collect())
    }
}

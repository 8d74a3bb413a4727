//! Blocking references.

use rdfg_core::{GraphName, Term};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Why a reference blocks a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockerKind {
    /// A live individual of the concept.
    Instance,
    /// A diagram detailing the concept.
    Diagram,
    /// A child concept.
    Child,
    /// An executor group including the executor.
    UsedInDiagram,
}

/// One reference that prevents a deletion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Blocker {
    pub kind: BlockerKind,
    /// The referencing node: individual, diagram, child or group.
    pub node: Term,
    /// The graph the reference lives in, when it is a diagram.
    pub graph: Option<GraphName>,
    /// Human-readable name of the graph or node, if known.
    pub label: Option<String>,
}

impl Blocker {
    pub fn new(kind: BlockerKind, node: Term) -> Self {
        Self {
            kind,
            node,
            graph: None,
            label: None,
        }
    }

    /// An individual `node` placed in `diagram`.
    pub fn instance(node: Term, diagram: GraphName) -> Self {
        Self::new(BlockerKind::Instance, node).with_graph(diagram)
    }

    /// A diagram detailing the concept.
    pub fn diagram(diagram: Term) -> Self {
        let graph = GraphName::from_term(&diagram);
        Self {
            graph,
            ..Self::new(BlockerKind::Diagram, diagram)
        }
    }

    pub fn child(child: Term) -> Self {
        Self::new(BlockerKind::Child, child)
    }

    /// An executor group `group` inside `diagram`.
    pub fn used_in_diagram(group: Term, diagram: GraphName) -> Self {
        Self::new(BlockerKind::UsedInDiagram, group).with_graph(diagram)
    }

    pub fn with_graph(mut self, graph: GraphName) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            BlockerKind::Instance => "individual",
            BlockerKind::Diagram => "diagram",
            BlockerKind::Child => "child concept",
            BlockerKind::UsedInDiagram => "executor group",
        };
        write!(f, "{} {}", what, self.node)?;
        if let (Some(graph), BlockerKind::Instance | BlockerKind::UsedInDiagram) =
            (&self.graph, self.kind)
        {
            write!(f, " in {}", graph)?;
        }
        if let Some(label) = &self.label {
            write!(f, " ({})", label)?;
        }
        Ok(())
    }
}

/// Collection of blockers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Blockers {
    blockers: Vec<Blocker>,
}

impl Blockers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blocker. Exact duplicates are ignored.
    pub fn push(&mut self, blocker: Blocker) {
        if !self.blockers.contains(&blocker) {
            self.blockers.push(blocker);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn all(&self) -> &[Blocker] {
        &self.blockers
    }

    /// Blockers of one kind.
    pub fn of_kind(&self, kind: BlockerKind) -> impl Iterator<Item = &Blocker> {
        self.blockers.iter().filter(move |b| b.kind == kind)
    }

    pub fn instances(&self) -> Vec<&Blocker> {
        self.of_kind(BlockerKind::Instance).collect()
    }

    pub fn diagrams(&self) -> Vec<&Blocker> {
        self.of_kind(BlockerKind::Diagram).collect()
    }

    pub fn children(&self) -> Vec<&Blocker> {
        self.of_kind(BlockerKind::Child).collect()
    }

    /// Every diagram an executor group blocks from, listed once each.
    pub fn diagrams_where_used(&self) -> Vec<GraphName> {
        self.of_kind(BlockerKind::UsedInDiagram)
            .filter_map(|b| b.graph.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Merge another collection.
    pub fn merge(&mut self, other: Blockers) {
        for blocker in other {
            self.push(blocker);
        }
    }

    /// Sort by kind, then node.
    pub fn sort(&mut self) {
        self.blockers.sort();
    }
}

impl IntoIterator for Blockers {
    type Item = Blocker;
    type IntoIter = std::vec::IntoIter<Blocker>;

    fn into_iter(self) -> Self::IntoIter {
        self.blockers.into_iter()
    }
}

impl<'a> IntoIterator for &'a Blockers {
    type Item = &'a Blocker;
    type IntoIter = std::slice::Iter<'a, Blocker>;

    fn into_iter(self) -> Self::IntoIter {
        self.blockers.iter()
    }
}

impl FromIterator<Blocker> for Blockers {
    fn from_iter<I: IntoIterator<Item = Blocker>>(iter: I) -> Self {
        let mut blockers = Blockers::new();
        for blocker in iter {
            blockers.push(blocker);
        }
        blockers
    }
}

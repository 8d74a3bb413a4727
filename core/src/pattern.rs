//! Quad patterns.
//!
//! A pattern fixes zero or more positions of a quad; unset positions
//! match anything.

use crate::{GraphName, Quad, Term};

/// A pattern over quads. `None` in a position is a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadPattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
    pub graph: Option<GraphName>,
}

impl QuadPattern {
    /// A pattern matching every quad.
    pub fn any() -> Self {
        Self::default()
    }

    /// Fix the subject.
    pub fn subject(mut self, subject: Term) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Fix the predicate.
    pub fn predicate(mut self, predicate: Term) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Fix the object.
    pub fn object(mut self, object: Term) -> Self {
        self.object = Some(object);
        self
    }

    /// Fix the graph.
    pub fn graph(mut self, graph: GraphName) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Check whether a quad matches this pattern.
    pub fn matches(&self, quad: &Quad) -> bool {
        self.subject.as_ref().map_or(true, |s| s == &quad.subject)
            && self.predicate.as_ref().map_or(true, |p| p == &quad.predicate)
            && self.object.as_ref().map_or(true, |o| o == &quad.object)
            && self.graph.as_ref().map_or(true, |g| g == &quad.graph)
    }

    /// Returns true if no position is fixed.
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none()
            && self.predicate.is_none()
            && self.object.is_none()
            && self.graph.is_none()
    }
}

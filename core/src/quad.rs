//! Graph names and quads.

use crate::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The graph component of a quad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraphName {
    /// The default (unnamed) graph.
    Default,
    /// A graph named by an IRI.
    Iri(String),
    /// A graph named by a blank node.
    Blank(String),
}

impl GraphName {
    /// Create a named graph from an IRI.
    pub fn iri(iri: impl Into<String>) -> Self {
        GraphName::Iri(iri.into())
    }

    /// Returns true for the default graph.
    pub fn is_default(&self) -> bool {
        matches!(self, GraphName::Default)
    }

    /// Get the IRI if this graph is named by one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            GraphName::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The graph name as a term, `None` for the default graph.
    pub fn to_term(&self) -> Option<Term> {
        match self {
            GraphName::Default => None,
            GraphName::Iri(iri) => Some(Term::Iri(iri.clone())),
            GraphName::Blank(id) => Some(Term::Blank(id.clone())),
        }
    }

    /// Convert a term naming a graph. Literals cannot name graphs.
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Iri(iri) => Some(GraphName::Iri(iri.clone())),
            Term::Blank(id) => Some(GraphName::Blank(id.clone())),
            Term::Literal(_) => None,
        }
    }

    /// Returns true if the term names this graph.
    pub fn is_named_by(&self, term: &Term) -> bool {
        match (self, term) {
            (GraphName::Iri(a), Term::Iri(b)) => a == b,
            (GraphName::Blank(a), Term::Blank(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::Default => write!(f, "DEFAULT"),
            GraphName::Iri(iri) => write!(f, "<{}>", iri),
            GraphName::Blank(id) => write!(f, "_:{}", id),
        }
    }
}

/// A (subject, predicate, object, graph) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: GraphName,
}

impl Quad {
    /// Create a new quad.
    pub fn new(subject: Term, predicate: Term, object: Term, graph: GraphName) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Returns true if `term` appears in subject or object position.
    pub fn mentions(&self, term: &Term) -> bool {
        &self.subject == term || &self.object == term
    }
}

/// N-Quads style rendering.
impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.graph {
            GraphName::Default => write!(f, "{} {} {} .", self.subject, self.predicate, self.object),
            g => write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, g
            ),
        }
    }
}

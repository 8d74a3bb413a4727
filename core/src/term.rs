//! RDF terms.
//!
//! A term is the value in one position of a quad: an IRI, a blank node
//! or a literal. Terms are totally ordered so that stores and derived
//! output can be iterated deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value with an optional language tag or datatype IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Language tag (without the leading `@`).
    pub language: Option<String>,
    /// Datatype IRI. `None` means `xsd:string`.
    pub datatype: Option<String>,
}

impl Literal {
    /// Create a plain string literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Create a language-tagged literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// Create a typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Absolute IRI.
    Iri(String),
    /// Blank node identifier (without the leading `_:`).
    Blank(String),
    /// Literal.
    Literal(Literal),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Create a blank node term.
    pub fn blank(id: impl Into<String>) -> Self {
        Term::Blank(id.into())
    }

    /// Create a plain string literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(value))
    }

    /// Returns true if this is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Returns true if this is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Returns true if this is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Get the IRI string if this is an IRI.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get the literal if this is a literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The string value of the term: the IRI, the blank node id or the
    /// literal's lexical form.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Blank(id) => id,
            Term::Literal(lit) => &lit.value,
        }
    }
}

/// N-Triples style rendering.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(id) => write!(f, "_:{}", id),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.value))?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

/// Escape a literal's lexical form for quoting.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

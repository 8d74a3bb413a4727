//! Prefix tables for prefixed names (`vad:p1`).

use crate::{escape_literal, GraphName, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const VAD_NS: &str = "http://example.org/vad#";

/// Mapping from prefix to namespace IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixTable {
    prefixes: BTreeMap<String, String>,
}

impl Default for PrefixTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("rdf", RDF_NS);
        table.insert("rdfs", RDFS_NS);
        table.insert("owl", OWL_NS);
        table.insert("xsd", XSD_NS);
        table.insert("vad", VAD_NS);
        table
    }
}

impl PrefixTable {
    /// Create a table with no prefixes.
    pub fn empty() -> Self {
        Self {
            prefixes: BTreeMap::new(),
        }
    }

    /// Add or replace a prefix.
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Get the namespace bound to a prefix.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Iterate over (prefix, namespace) pairs in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Shorten an IRI to `prefix:local` using the longest matching
    /// namespace. Falls back to `<iri>` when no namespace matches or the
    /// local part would not be a valid local name.
    pub fn shorten(&self, iri: &str) -> String {
        let best = self
            .prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len());

        match best {
            Some((prefix, ns)) => {
                let local = &iri[ns.len()..];
                if is_local_name(local) {
                    format!("{}:{}", prefix, local)
                } else {
                    format!("<{}>", iri)
                }
            }
            None => format!("<{}>", iri),
        }
    }

    /// Expand `prefix:local` or `<iri>` to a full IRI. Absolute IRIs are
    /// returned unchanged.
    pub fn expand(&self, name: &str) -> Option<String> {
        if let Some(inner) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
            return Some(inner.to_string());
        }
        if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("urn:")
        {
            return Some(name.to_string());
        }
        let (prefix, local) = name.split_once(':')?;
        self.namespace(prefix).map(|ns| format!("{}{}", ns, local))
    }

    /// Render a term in Turtle/SPARQL syntax using this table.
    pub fn format_term(&self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.shorten(iri),
            Term::Blank(id) => format!("_:{}", id),
            Term::Literal(lit) => {
                let mut out = format!("\"{}\"", escape_literal(&lit.value));
                if let Some(lang) = &lit.language {
                    out.push('@');
                    out.push_str(lang);
                } else if let Some(dt) = &lit.datatype {
                    out.push_str("^^");
                    out.push_str(&self.shorten(dt));
                }
                out
            }
        }
    }

    /// Render a graph name using this table.
    pub fn format_graph(&self, graph: &GraphName) -> String {
        match graph.to_term() {
            Some(term) => self.format_term(&term),
            None => "DEFAULT".to_string(),
        }
    }

    /// `PREFIX` declarations for every entry, one per line.
    pub fn sparql_header(&self) -> String {
        self.prefixes
            .iter()
            .map(|(p, ns)| format!("PREFIX {}: <{}>\n", p, ns))
            .collect()
    }
}

/// Conservative check for a Turtle local name.
fn is_local_name(local: &str) -> bool {
    !local.is_empty()
        && !local.ends_with('.')
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

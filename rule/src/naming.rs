//! Virtual graph names.
//!
//! A parent named `<base>#t_<local>` gets `<base>#vt_<local>`. Any other
//! parent IRI gets `<namespace>vtx_<escaped parent>`, where escaping maps
//! `%` to `%25` and `#` to `%23`. Both forms are reversible and no two
//! parents share a name, provided the namespace itself has at most one
//! `#`.

use rdfg_core::GraphName;

const PARENT_MARK: &str = "t_";
const VIRTUAL_MARK: &str = "vt_";
const FALLBACK_MARK: &str = "vtx_";

/// Maps parent graph names to virtual graph names and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNaming {
    namespace: String,
}

impl VirtualNaming {
    /// Naming with fallback names in `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The virtual graph for a parent. Only IRI-named graphs have one.
    pub fn virtual_graph_for(&self, parent: &GraphName) -> Option<GraphName> {
        let iri = parent.as_iri()?;
        if let Some((base, local)) = iri.split_once('#') {
            if let Some(rest) = local.strip_prefix(PARENT_MARK) {
                return Some(GraphName::iri(format!("{}#{}{}", base, VIRTUAL_MARK, rest)));
            }
        }
        Some(GraphName::iri(format!(
            "{}{}{}",
            self.namespace,
            FALLBACK_MARK,
            escape(iri)
        )))
    }

    /// The parent of a virtual graph name, if it is one.
    pub fn parent_of(&self, virtual_graph: &GraphName) -> Option<GraphName> {
        let iri = virtual_graph.as_iri()?;
        let fallback = format!("{}{}", self.namespace, FALLBACK_MARK);
        if let Some(escaped) = iri.strip_prefix(fallback.as_str()) {
            return unescape(escaped).map(GraphName::iri);
        }
        let (base, local) = iri.split_once('#')?;
        let rest = local.strip_prefix(VIRTUAL_MARK)?;
        Some(GraphName::iri(format!("{}#{}{}", base, PARENT_MARK, rest)))
    }

    /// Returns true if the name has the shape of a virtual graph name.
    pub fn is_virtual_name(&self, graph: &GraphName) -> bool {
        self.parent_of(graph).is_some()
    }
}

fn escape(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find(|c: char| c == '%' || c == '#') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("%25") {
            out.push('%');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("%23") {
            out.push('#');
            rest = after;
        } else {
            // Not produced by `escape`
            return None;
        }
    }
    out.push_str(rest);
    Some(out)
}

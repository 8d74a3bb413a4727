//! Query result rows.

use rdfg_core::Term;
use std::collections::BTreeMap;

/// Variable names produced by the query templates.
pub mod var {
    pub const CHILD: &str = "child";
    pub const CONCEPT: &str = "concept";
    pub const DEFINES_PROCESS: &str = "definesProcess";
    pub const EXECUTOR: &str = "executor";
    pub const GROUP: &str = "group";
    pub const HAS_TRIG: &str = "hasTrig";
    pub const LABEL: &str = "label";
    pub const PARENT: &str = "parent";
    pub const PARENT_TRIG: &str = "parentTrig";
    pub const PROCESS: &str = "process";
    pub const TRIG: &str = "trig";
    pub const VIRTUAL_TRIG: &str = "virtualTrig";
}

/// One solution of a query: variable name -> bound term.
///
/// Unbound (optional) variables are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Binding {
    values: BTreeMap<String, Term>,
}

impl Binding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: Term) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style insert of an optional value.
    pub fn with_opt(mut self, name: impl Into<String>, value: Option<Term>) -> Self {
        if let Some(value) = value {
            self.insert(name, value);
        }
        self
    }

    /// Bind a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: Term) {
        self.values.insert(name.into(), value);
    }

    /// Get the term bound to a variable.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.values.get(name)
    }

    /// Returns true if the variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (variable, term) pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Term)> for Binding {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

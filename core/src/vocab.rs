//! The vocabulary the engine is configured with.
//!
//! Every IRI the deletion and derivation logic relies on is named here so
//! that a different namespace can be plugged in from a TOML document.
//! Keys missing from the document keep their default value.

use crate::{ConfigError, ConfigResult, GraphName, PrefixTable, Term, RDFS_NS, RDF_NS, VAD_NS};
use serde::Deserialize;

/// IRIs used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    /// Namespace for derived names (virtual graphs, subtypes).
    pub namespace: String,
    pub rdf_type: String,
    pub rdfs_label: String,
    /// Taxonomy graph holding process concepts.
    pub process_tree: String,
    /// Taxonomy graph holding executor concepts.
    pub executor_tree: String,
    pub type_process: String,
    pub type_executor: String,
    /// Self-type of a diagram graph.
    pub diagram_type: String,
    pub executor_group: String,
    /// Membership of a process individual in a diagram.
    pub is_subprocess_trig: String,
    /// Inclusion of an executor in an executor group.
    pub includes: String,
    pub has_executor: String,
    pub has_parent_obj: String,
    /// Reverse link from a process concept to its diagram.
    pub has_trig: String,
    pub defines_process: String,
    /// Self-type of a virtual graph.
    pub virtual_type: String,
    pub process_subtype: String,
    /// Parents that mark a concept as not yet placed in the taxonomy.
    pub not_defined: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let vad = |local: &str| format!("{}{}", VAD_NS, local);
        Self {
            namespace: VAD_NS.to_string(),
            rdf_type: format!("{}type", RDF_NS),
            rdfs_label: format!("{}label", RDFS_NS),
            process_tree: vad("ptree"),
            executor_tree: vad("rtree"),
            type_process: vad("TypeProcess"),
            type_executor: vad("TypeExecutor"),
            diagram_type: vad("VADProcessDia"),
            executor_group: vad("ExecutorGroup"),
            is_subprocess_trig: vad("isSubprocessTrig"),
            includes: vad("includes"),
            has_executor: vad("hasExecutor"),
            has_parent_obj: vad("hasParentObj"),
            has_trig: vad("hasTrig"),
            defines_process: vad("definesProcess"),
            virtual_type: vad("Virtual"),
            process_subtype: vad("processSubtype"),
            not_defined: vec![vad("pNotDefined"), vad("NotDefined")],
        }
    }
}

impl Vocabulary {
    /// Load a vocabulary from a TOML document.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let vocab: Vocabulary = toml::from_str(input)?;
        vocab.validate()?;
        Ok(vocab)
    }

    /// Check that every IRI is non-empty.
    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("namespace", &self.namespace),
            ("rdf_type", &self.rdf_type),
            ("rdfs_label", &self.rdfs_label),
            ("process_tree", &self.process_tree),
            ("executor_tree", &self.executor_tree),
            ("type_process", &self.type_process),
            ("type_executor", &self.type_executor),
            ("diagram_type", &self.diagram_type),
            ("executor_group", &self.executor_group),
            ("is_subprocess_trig", &self.is_subprocess_trig),
            ("includes", &self.includes),
            ("has_executor", &self.has_executor),
            ("has_parent_obj", &self.has_parent_obj),
            ("has_trig", &self.has_trig),
            ("defines_process", &self.defines_process),
            ("virtual_type", &self.virtual_type),
            ("process_subtype", &self.process_subtype),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::empty_iri(name));
            }
        }
        Ok(())
    }

    /// An IRI term in the vocabulary's namespace.
    pub fn ns(&self, local: &str) -> Term {
        Term::Iri(format!("{}{}", self.namespace, local))
    }

    /// Returns true if `term` is one of the "not defined" parents.
    pub fn is_not_defined(&self, term: &Term) -> bool {
        term.as_iri()
            .map_or(false, |iri| self.not_defined.iter().any(|nd| nd == iri))
    }

    /// The graph holding concepts of the given concept type.
    pub fn taxonomy_graph(&self, executor: bool) -> GraphName {
        if executor {
            GraphName::iri(&self.executor_tree)
        } else {
            GraphName::iri(&self.process_tree)
        }
    }

    /// Prefix table with the vocabulary namespace bound to `vad`.
    pub fn prefixes(&self) -> PrefixTable {
        let mut table = PrefixTable::default();
        table.insert("vad", self.namespace.clone());
        table
    }

    pub fn rdf_type(&self) -> Term {
        Term::iri(&self.rdf_type)
    }

    pub fn rdfs_label(&self) -> Term {
        Term::iri(&self.rdfs_label)
    }

    pub fn type_process(&self) -> Term {
        Term::iri(&self.type_process)
    }

    pub fn type_executor(&self) -> Term {
        Term::iri(&self.type_executor)
    }

    pub fn diagram_type(&self) -> Term {
        Term::iri(&self.diagram_type)
    }

    pub fn executor_group(&self) -> Term {
        Term::iri(&self.executor_group)
    }

    pub fn is_subprocess_trig(&self) -> Term {
        Term::iri(&self.is_subprocess_trig)
    }

    pub fn includes(&self) -> Term {
        Term::iri(&self.includes)
    }

    pub fn has_executor(&self) -> Term {
        Term::iri(&self.has_executor)
    }

    pub fn has_parent_obj(&self) -> Term {
        Term::iri(&self.has_parent_obj)
    }

    pub fn has_trig(&self) -> Term {
        Term::iri(&self.has_trig)
    }

    pub fn defines_process(&self) -> Term {
        Term::iri(&self.defines_process)
    }

    pub fn virtual_type(&self) -> Term {
        Term::iri(&self.virtual_type)
    }

    pub fn process_subtype(&self) -> Term {
        Term::iri(&self.process_subtype)
    }
}

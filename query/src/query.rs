//! Query templates.

use rdfg_core::{GraphName, PrefixTable, Term, Vocabulary};

/// The closed set of questions the engine asks about a store.
///
/// Each variant documents the variables of its result rows (see
/// [`crate::var`]). Optional variables are marked with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Diagram graphs: `trig`, `label?`, `definesProcess?`.
    DiagramGraphs,

    /// Virtual graphs and their parents: `virtualTrig`, `parentTrig?`.
    VirtualGraphs,

    /// Process individuals placed in diagrams: `process`, `trig`.
    ProcessIndividuals {
        concept: Option<Term>,
        diagram: Option<GraphName>,
    },

    /// Diagrams detailing a process concept: `trig`.
    ConceptDiagrams { concept: Term },

    /// Direct children of a concept in a taxonomy graph: `child`.
    ConceptChildren { concept: Term, taxonomy: GraphName },

    /// Executor groups including an executor: `group`, `trig`.
    ExecutorUsage {
        executor: Term,
        diagram: Option<GraphName>,
    },

    /// Facts needed to classify the processes of one diagram:
    /// `process`, `parent?`, `hasTrig?`, `definesProcess?`.
    ProcessSubtypeFacts { diagram: GraphName },

    /// Executor groups of one diagram and their members:
    /// `group`, `executor?`, `label?`.
    ExecutorGroupMembers { diagram: GraphName },

    /// The concept whose reverse link points at a diagram: `concept`.
    OwningConcept { diagram: GraphName },

    /// Concepts of a type in a taxonomy graph: `concept`, `label?`, `parent?`.
    Concepts {
        taxonomy: GraphName,
        concept_type: Term,
    },
}

impl Query {
    /// Short name for log lines and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Query::DiagramGraphs => "diagram-graphs",
            Query::VirtualGraphs => "virtual-graphs",
            Query::ProcessIndividuals { .. } => "process-individuals",
            Query::ConceptDiagrams { .. } => "concept-diagrams",
            Query::ConceptChildren { .. } => "concept-children",
            Query::ExecutorUsage { .. } => "executor-usage",
            Query::ProcessSubtypeFacts { .. } => "process-subtype-facts",
            Query::ExecutorGroupMembers { .. } => "executor-group-members",
            Query::OwningConcept { .. } => "owning-concept",
            Query::Concepts { .. } => "concepts",
        }
    }

    /// Render the template as a SPARQL SELECT query.
    pub fn to_sparql(&self, vocab: &Vocabulary) -> String {
        let prefixes = vocab.prefixes();
        let t = |term: &Term| prefixes.format_term(term);
        let g = |graph: &GraphName| prefixes.format_graph(graph);
        let ptree = g(&vocab.taxonomy_graph(false));
        let rtree = g(&vocab.taxonomy_graph(true));
        let rdf_type = t(&vocab.rdf_type());
        let label = t(&vocab.rdfs_label());

        let body = match self {
            Query::DiagramGraphs => format!(
                "SELECT DISTINCT ?trig ?label ?definesProcess WHERE {{\n  GRAPH ?trig {{\n    ?trig {} {} .\n    OPTIONAL {{ ?trig {} ?label }}\n    OPTIONAL {{ ?trig {} ?definesProcess }}\n  }}\n}}",
                rdf_type,
                t(&vocab.diagram_type()),
                label,
                t(&vocab.defines_process()),
            ),
            Query::VirtualGraphs => format!(
                "SELECT ?virtualTrig ?parentTrig WHERE {{\n  GRAPH ?virtualTrig {{\n    ?virtualTrig {} {} .\n    OPTIONAL {{ ?virtualTrig {} ?parentTrig }}\n  }}\n}}",
                rdf_type,
                t(&vocab.virtual_type()),
                t(&vocab.has_parent_obj()),
            ),
            Query::ProcessIndividuals { concept, diagram } => {
                let process = concept.as_ref().map_or("?process".to_string(), t);
                let trig = diagram.as_ref().map_or("?trig".to_string(), g);
                format!(
                    "SELECT DISTINCT ?process ?trig WHERE {{\n  GRAPH {trig} {{\n    {process} {} {trig} .\n  }}\n}}",
                    t(&vocab.is_subprocess_trig()),
                )
            }
            Query::ConceptDiagrams { concept } => format!(
                "SELECT DISTINCT ?trig WHERE {{\n  GRAPH {} {{\n    {} {} ?trig .\n  }}\n}}",
                ptree,
                t(concept),
                t(&vocab.has_trig()),
            ),
            Query::ConceptChildren { concept, taxonomy } => format!(
                "SELECT DISTINCT ?child WHERE {{\n  GRAPH {} {{\n    ?child {} {} .\n  }}\n}}",
                g(taxonomy),
                t(&vocab.has_parent_obj()),
                t(concept),
            ),
            Query::ExecutorUsage { executor, diagram } => {
                let trig = diagram.as_ref().map_or("?trig".to_string(), g);
                format!(
                    "SELECT DISTINCT ?group ?trig WHERE {{\n  GRAPH {trig} {{\n    {trig} {} {} .\n    ?group {} {} .\n  }}\n}}",
                    rdf_type,
                    t(&vocab.diagram_type()),
                    t(&vocab.includes()),
                    t(executor),
                )
            }
            Query::ProcessSubtypeFacts { diagram } => {
                let trig = g(diagram);
                format!(
                    "SELECT ?process ?parent ?hasTrig ?definesProcess WHERE {{\n  GRAPH {trig} {{\n    ?process {} {trig} .\n    OPTIONAL {{ {trig} {} ?definesProcess }}\n  }}\n  OPTIONAL {{ GRAPH {ptree} {{ ?process {} ?parent }} }}\n  OPTIONAL {{ GRAPH {ptree} {{ ?process {} ?hasTrig }} }}\n}}",
                    t(&vocab.is_subprocess_trig()),
                    t(&vocab.defines_process()),
                    t(&vocab.has_parent_obj()),
                    t(&vocab.has_trig()),
                )
            }
            Query::ExecutorGroupMembers { diagram } => {
                let trig = g(diagram);
                format!(
                    "SELECT ?group ?executor ?label WHERE {{\n  GRAPH {trig} {{\n    ?group {} {} .\n    OPTIONAL {{ ?group {} ?executor }}\n  }}\n  OPTIONAL {{ GRAPH {rtree} {{ ?executor {label} ?label }} }}\n}}",
                    rdf_type,
                    t(&vocab.executor_group()),
                    t(&vocab.includes()),
                )
            }
            Query::OwningConcept { diagram } => format!(
                "SELECT ?concept WHERE {{\n  GRAPH {} {{\n    ?concept {} {} .\n  }}\n}}",
                ptree,
                t(&vocab.has_trig()),
                g(diagram),
            ),
            Query::Concepts {
                taxonomy,
                concept_type,
            } => format!(
                "SELECT ?concept ?label ?parent WHERE {{\n  GRAPH {} {{\n    ?concept {} {} .\n    OPTIONAL {{ ?concept {} ?label }}\n    OPTIONAL {{ ?concept {} ?parent }}\n  }}\n}}",
                g(taxonomy),
                rdf_type,
                t(concept_type),
                label,
                t(&vocab.has_parent_obj()),
            ),
        };

        format!("{}\n{}", header(&prefixes), body)
    }
}

fn header(prefixes: &PrefixTable) -> String {
    prefixes.sparql_header().trim_end().to_string()
}

//! The derivation rules.

use crate::{RuleError, RuleResult};
use rdfg_core::{GraphName, PrefixTable, Quad, Term, Vocabulary};
use rdfg_query::{var, Binding, Query, QueryError, QueryResult};
use regex_lite::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// A derived statement, placed into a virtual graph by the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Place the triple into a graph.
    pub fn in_graph(self, graph: GraphName) -> Quad {
        Quad::new(self.subject, self.predicate, self.object, graph)
    }
}

/// Which graphs trigger a rule.
#[derive(Debug, Clone)]
pub enum GraphNamePattern {
    /// Every diagram graph.
    Diagrams,
    /// Every non-virtual graph whose IRI matches the expression.
    Matching(Regex),
}

impl GraphNamePattern {
    /// Compile a name-matching pattern.
    pub fn matching(pattern: &str) -> RuleResult<Self> {
        Regex::new(pattern)
            .map(GraphNamePattern::Matching)
            .map_err(|e| RuleError::invalid_pattern(pattern, e.to_string()))
    }

    /// The graphs among `graphs` this pattern triggers on. Virtual graphs
    /// never trigger.
    pub fn select(
        &self,
        graphs: &[GraphName],
        diagrams: &BTreeSet<GraphName>,
        virtuals: &BTreeSet<GraphName>,
    ) -> Vec<GraphName> {
        graphs
            .iter()
            .filter(|g| !virtuals.contains(*g))
            .filter(|g| match self {
                GraphNamePattern::Diagrams => diagrams.contains(*g),
                GraphNamePattern::Matching(re) => g.as_iri().map_or(false, |iri| re.is_match(iri)),
            })
            .cloned()
            .collect()
    }
}

/// What a rule derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// `?process vad:processSubtype ?subtype` for every process of a diagram.
    ProcessSubtype,
    /// `?group rdfs:label "..."` for every executor group with members.
    ExecutorGroupLabel,
}

impl Derivation {
    pub fn name(&self) -> &'static str {
        match self {
            Derivation::ProcessSubtype => "process-subtype",
            Derivation::ExecutorGroupLabel => "executor-group-label",
        }
    }

    /// The query whose rows feed this derivation for one parent graph.
    pub fn query(&self, parent: &GraphName) -> Query {
        match self {
            Derivation::ProcessSubtype => Query::ProcessSubtypeFacts {
                diagram: parent.clone(),
            },
            Derivation::ExecutorGroupLabel => Query::ExecutorGroupMembers {
                diagram: parent.clone(),
            },
        }
    }

    /// Turn query rows into derived triples, sorted.
    pub fn derive(&self, vocab: &Vocabulary, rows: &[Binding]) -> QueryResult<Vec<Triple>> {
        let mut triples = match self {
            Derivation::ProcessSubtype => derive_subtypes(vocab, rows)?,
            Derivation::ExecutorGroupLabel => derive_labels(vocab, rows)?,
        };
        triples.sort();
        triples.dedup();
        Ok(triples)
    }
}

/// A trigger paired with a derivation.
#[derive(Debug, Clone)]
pub struct Rule {
    pub trigger: GraphNamePattern,
    pub derive: Derivation,
}

impl Rule {
    pub fn new(trigger: GraphNamePattern, derive: Derivation) -> Self {
        Self { trigger, derive }
    }

    pub fn name(&self) -> &'static str {
        self.derive.name()
    }

    /// The editor's rule set: both derivations on every diagram.
    pub fn default_set() -> Vec<Rule> {
        vec![
            Rule::new(GraphNamePattern::Diagrams, Derivation::ProcessSubtype),
            Rule::new(GraphNamePattern::Diagrams, Derivation::ExecutorGroupLabel),
        ]
    }
}

/// Classify a process placed in a diagram.
///
/// `parent` is the concept's parent in the process tree, `defines` the
/// process the diagram details.
pub fn process_subtype(
    vocab: &Vocabulary,
    parent: Option<&Term>,
    detailed: bool,
    defines: Option<&Term>,
) -> Term {
    if parent.map_or(false, |p| vocab.is_not_defined(p)) {
        return vocab.ns("NotDefinedType");
    }
    let child = parent.is_some() && parent == defines;
    let local = match (detailed, child) {
        (true, true) => "DetailedChild",
        (true, false) => "DetailedExternal",
        (false, true) => "notDetailedChild",
        (false, false) => "notDetailedExternal",
    };
    vocab.ns(local)
}

/// Join member labels in member order, falling back to the prefixed name.
///
/// Members are sorted and deduplicated first, so the result does not
/// depend on discovery order.
pub fn aggregate_label(prefixes: &PrefixTable, members: &[(Term, Option<String>)]) -> String {
    let ordered: BTreeMap<&Term, Option<&str>> = members
        .iter()
        .map(|(member, label)| (member, label.as_deref()))
        .collect();

    ordered
        .into_iter()
        .map(|(member, label)| match label {
            Some(label) => label.to_string(),
            None => prefixes.format_term(member),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn required<'r>(row: &'r Binding, name: &str, rule: Derivation) -> QueryResult<&'r Term> {
    row.get(name)
        .ok_or_else(|| QueryError::failed(rule.name(), format!("row without ?{}", name)))
}

fn derive_subtypes(vocab: &Vocabulary, rows: &[Binding]) -> QueryResult<Vec<Triple>> {
    let mut triples = Vec::with_capacity(rows.len());
    for row in rows {
        let process = required(row, var::PROCESS, Derivation::ProcessSubtype)?;
        let subtype = process_subtype(
            vocab,
            row.get(var::PARENT),
            row.contains(var::HAS_TRIG),
            row.get(var::DEFINES_PROCESS),
        );
        triples.push(Triple::new(
            process.clone(),
            vocab.process_subtype(),
            subtype,
        ));
    }
    Ok(triples)
}

fn derive_labels(vocab: &Vocabulary, rows: &[Binding]) -> QueryResult<Vec<Triple>> {
    let mut groups: BTreeMap<Term, Vec<(Term, Option<String>)>> = BTreeMap::new();
    for row in rows {
        let group = required(row, var::GROUP, Derivation::ExecutorGroupLabel)?;
        let members = groups.entry(group.clone()).or_default();
        if let Some(executor) = row.get(var::EXECUTOR) {
            let label = row.get(var::LABEL).map(|l| l.value().to_string());
            members.push((executor.clone(), label));
        }
    }

    let prefixes = vocab.prefixes();
    Ok(groups
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(group, members)| {
            Triple::new(
                group,
                vocab.rdfs_label(),
                Term::literal(aggregate_label(&prefixes, &members)),
            )
        })
        .collect())
}

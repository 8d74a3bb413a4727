//! Deletion targets.

use crate::{PlanError, PlanResult};
use rdfg_core::{GraphName, PrefixTable, Term};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of node a deletion removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    ConceptProcess,
    ConceptExecutor,
    IndividualProcess,
    IndividualExecutor,
    Diagram,
}

impl TargetKind {
    pub const ALL: [TargetKind; 5] = [
        TargetKind::ConceptProcess,
        TargetKind::ConceptExecutor,
        TargetKind::IndividualProcess,
        TargetKind::IndividualExecutor,
        TargetKind::Diagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::ConceptProcess => "concept-process",
            TargetKind::ConceptExecutor => "concept-executor",
            TargetKind::IndividualProcess => "individual-process",
            TargetKind::IndividualExecutor => "individual-executor",
            TargetKind::Diagram => "diagram",
        }
    }

    pub fn is_concept(&self) -> bool {
        matches!(self, TargetKind::ConceptProcess | TargetKind::ConceptExecutor)
    }

    pub fn is_individual(&self) -> bool {
        matches!(
            self,
            TargetKind::IndividualProcess | TargetKind::IndividualExecutor
        )
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| PlanError::validation(format!("unknown target kind '{}'", s)))
    }
}

/// Which diagrams an individual deletion covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    #[default]
    AllDiagrams,
    Diagram(GraphName),
}

/// A node to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionTarget {
    pub kind: TargetKind,
    pub id: Term,
    #[serde(default)]
    pub scope: Scope,
}

impl DeletionTarget {
    pub fn new(kind: TargetKind, id: Term, scope: Scope) -> Self {
        Self { kind, id, scope }
    }

    pub fn concept_process(id: Term) -> Self {
        Self::new(TargetKind::ConceptProcess, id, Scope::AllDiagrams)
    }

    pub fn concept_executor(id: Term) -> Self {
        Self::new(TargetKind::ConceptExecutor, id, Scope::AllDiagrams)
    }

    pub fn individual_process(id: Term, scope: Scope) -> Self {
        Self::new(TargetKind::IndividualProcess, id, scope)
    }

    pub fn individual_executor(id: Term, scope: Scope) -> Self {
        Self::new(TargetKind::IndividualExecutor, id, scope)
    }

    pub fn diagram(id: Term) -> Self {
        Self::new(TargetKind::Diagram, id, Scope::AllDiagrams)
    }

    /// Build a target from user input: a kind name and a prefixed name or
    /// IRI, optionally limited to one diagram.
    pub fn parse(
        kind: &str,
        id: &str,
        scope: Option<&str>,
        prefixes: &PrefixTable,
    ) -> PlanResult<Self> {
        let kind: TargetKind = kind.parse()?;
        let id = expand(id, prefixes)?;
        let scope = match scope.map(str::trim).filter(|s| !s.is_empty()) {
            None => Scope::AllDiagrams,
            Some(name) => Scope::Diagram(GraphName::iri(expand(name, prefixes)?)),
        };
        let target = Self::new(kind, Term::Iri(id), scope);
        target.validate()?;
        Ok(target)
    }

    /// Check the shape of the target. Existence is checked by the planner.
    pub fn validate(&self) -> PlanResult<()> {
        match &self.id {
            Term::Iri(iri) if iri.trim().is_empty() => {
                return Err(PlanError::validation("empty identifier"));
            }
            Term::Iri(_) => {}
            other => {
                return Err(PlanError::validation(format!(
                    "identifier must be an IRI, got {}",
                    other
                )));
            }
        }
        if !self.kind.is_individual() && self.scope != Scope::AllDiagrams {
            return Err(PlanError::validation(format!(
                "{} deletions cannot be scoped to one diagram",
                self.kind
            )));
        }
        Ok(())
    }
}

fn expand(name: &str, prefixes: &PrefixTable) -> PlanResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlanError::validation("empty identifier"));
    }
    prefixes
        .expand(name)
        .ok_or_else(|| PlanError::validation(format!("cannot resolve '{}'", name)))
}

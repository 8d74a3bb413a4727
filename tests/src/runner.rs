//! Scenario runner.

use rdfg_constraint::DependencyReport;
use rdfg_core::{GraphName, PrefixTable};
use rdfg_mutation::DeletionTarget;
use rdfg_rule::RecomputeReport;
use rdfg_session::{DeleteOutcome, Session, SessionResult};
use rdfg_store::QuadStore;

use crate::error::{ScenarioError, ScenarioResult};
use crate::loader::{Command, Operations, TargetArgs};
use crate::scenario::Scenario;

/// What a step produced.
#[derive(Debug, Clone)]
pub enum StepResult {
    Delete(DeleteOutcome),
    Check(DependencyReport),
    Preview(Option<String>),
    Recompute(RecomputeReport),
    CascadeOrphans(Vec<GraphName>),
}

/// Runs a scenario against a session.
pub struct Runner<'s> {
    scenario: &'s Scenario,
    operations: Operations,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> ScenarioResult<Self> {
        let operations = scenario.load_operations()?;
        Ok(Self {
            scenario,
            operations,
        })
    }

    /// Run the scenario on a fresh session over the fixture.
    pub fn run(&self) -> ScenarioResult<()> {
        let mut session = self.scenario.fixture_ref().session()?;
        self.run_on(&mut session)
    }

    /// Run the scenario on an existing session.
    pub fn run_on<S: QuadStore>(&self, session: &mut Session<S>) -> ScenarioResult<()> {
        for step in self.scenario.steps() {
            let command = self
                .operations
                .get_step(&step.name)
                .ok_or_else(|| ScenarioError::step_not_found(&step.name))?;

            let result = execute(session, command).map_err(|e| e.to_string());

            step.assertion
                .verify(&step.name, &result, session.store(), session.prefixes())?;
        }
        Ok(())
    }
}

/// Execute one command.
pub fn execute<S: QuadStore>(session: &mut Session<S>, command: &Command) -> SessionResult<StepResult> {
    Ok(match command {
        Command::Delete(args) => {
            let target = to_target(args, session.prefixes())?;
            StepResult::Delete(session.delete(&target)?)
        }
        Command::Check(args) => {
            let target = to_target(args, session.prefixes())?;
            StepResult::Check(session.check(&target)?)
        }
        Command::Preview(args) => {
            let target = to_target(args, session.prefixes())?;
            StepResult::Preview(session.preview(&target)?)
        }
        Command::Recompute => StepResult::Recompute(session.recompute()?),
        Command::CascadeOrphans => StepResult::CascadeOrphans(session.cascade_orphans()?),
    })
}

fn to_target(args: &TargetArgs, prefixes: &PrefixTable) -> SessionResult<DeletionTarget> {
    Ok(DeletionTarget::parse(
        &args.kind,
        &args.id,
        args.scope.as_deref(),
        prefixes,
    )?)
}

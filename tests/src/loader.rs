//! Loader for operations sources.
//!
//! Parses sources with step markers (`--# step_name`), one command per
//! step:
//!
//! ```text
//! --# delete_unused
//! delete concept-process vad:p3
//!
//! --# drop_from_one_diagram
//! delete individual-process vad:p2 in vad:t_p2
//!
//! --# refresh
//! recompute
//! ```

use std::collections::HashMap;

use crate::error::{ScenarioError, ScenarioResult};

/// A command run by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plan, apply and recompute.
    Delete(TargetArgs),
    /// Dependency check only.
    Check(TargetArgs),
    /// Render the plan without applying it.
    Preview(TargetArgs),
    /// Recompute every virtual graph.
    Recompute,
    /// Remove virtual graphs whose parent is gone.
    CascadeOrphans,
}

/// A deletion target as written in the source, before name expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    pub kind: String,
    pub id: String,
    pub scope: Option<String>,
}

/// Parsed operations.
#[derive(Debug, Clone)]
pub struct Operations {
    /// Map of step name to its command.
    pub steps: HashMap<String, Command>,
    /// Steps in order of appearance.
    pub step_order: Vec<String>,
}

impl Operations {
    /// Parse operations from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        let mut steps = HashMap::new();
        let mut step_order = Vec::new();
        let mut current_step: Option<String> = None;

        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                let step_name = suffix.trim().to_string();
                if step_name.is_empty() {
                    return Err(ScenarioError::operations_parse(
                        line_no,
                        "empty step name after --#",
                    ));
                }
                step_order.push(step_name.clone());
                current_step = Some(step_name);
                continue;
            }

            // Blank lines and comments, including lines before the first step
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }

            let Some(step_name) = &current_step else {
                return Err(ScenarioError::operations_parse(
                    line_no,
                    "command before the first step marker",
                ));
            };
            if steps.contains_key(step_name) {
                return Err(ScenarioError::operations_parse(
                    line_no,
                    format!("step '{}' has more than one command", step_name),
                ));
            }
            let command = parse_command(trimmed).map_err(|m| ScenarioError::operations_parse(line_no, m))?;
            steps.insert(step_name.clone(), command);
        }

        if let Some(empty) = step_order.iter().find(|name| !steps.contains_key(*name)) {
            return Err(ScenarioError::operations_parse(
                0,
                format!("step '{}' has no command", empty),
            ));
        }

        Ok(Self { steps, step_order })
    }

    /// Get the command for a step.
    pub fn get_step(&self, name: &str) -> Option<&Command> {
        self.steps.get(name)
    }

    /// Get all step names in order.
    pub fn step_names(&self) -> &[String] {
        &self.step_order
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["recompute"] => Ok(Command::Recompute),
        ["cascade-orphans"] => Ok(Command::CascadeOrphans),
        [verb, rest @ ..] => {
            let target = parse_target(rest)?;
            match *verb {
                "delete" => Ok(Command::Delete(target)),
                "check" => Ok(Command::Check(target)),
                "preview" => Ok(Command::Preview(target)),
                other => Err(format!("unknown command '{}'", other)),
            }
        }
        [] => Err("empty command".to_string()),
    }
}

/// `<kind> <id> [in <diagram>]`
fn parse_target(words: &[&str]) -> Result<TargetArgs, String> {
    let args = |kind: &str, id: &str, scope: Option<&str>| TargetArgs {
        kind: kind.to_string(),
        id: id.to_string(),
        scope: scope.map(str::to_string),
    };
    match words {
        [kind, id] => Ok(args(*kind, *id, None)),
        [kind, id, "in", diagram] => Ok(args(*kind, *id, Some(*diagram))),
        _ => Err(format!("expected '<kind> <id> [in <diagram>]', got '{}'", words.join(" "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_operations() {
        let source = r#"
-- Deletions around one diagram

--# check_p1
check concept-process vad:p1

--# drop_p2
delete individual-process vad:p2 in vad:t_p2

--# refresh
recompute
"#;

        let ops = Operations::parse(source).unwrap();

        assert_eq!(ops.step_order, vec!["check_p1", "drop_p2", "refresh"]);
        assert!(matches!(ops.get_step("check_p1"), Some(Command::Check(_))));
        assert_eq!(
            ops.get_step("drop_p2"),
            Some(&Command::Delete(TargetArgs {
                kind: "individual-process".to_string(),
                id: "vad:p2".to_string(),
                scope: Some("vad:t_p2".to_string()),
            }))
        );
        assert_eq!(ops.get_step("refresh"), Some(&Command::Recompute));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Operations::parse("--#\nrecompute").is_err());
        assert!(Operations::parse("recompute").is_err());
        assert!(Operations::parse("--# a\nexplode vad:x").is_err());
        assert!(Operations::parse("--# a\nrecompute\nrecompute").is_err());
        assert!(Operations::parse("--# a\n--# b\nrecompute").is_err());
    }
}

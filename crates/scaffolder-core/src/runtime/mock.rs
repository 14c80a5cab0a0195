//! Recording command runner for tests

use super::tool::{CommandRunner, StepResult, ToolCommand};
use crate::error::ToolError;

/// Records every command and fails the ones matching configured prefixes
#[derive(Debug, Default)]
pub struct RecordingRunner {
    history: Vec<ToolCommand>,
    failing: Vec<String>,
    missing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendered form starts with `prefix` exit with code 1
    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    /// `program` behaves as if it were not installed
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn history(&self) -> &[ToolCommand] {
        &self.history
    }

    pub fn ran(&self, program: &str) -> bool {
        self.history.iter().any(|c| c.program == program)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &ToolCommand) -> StepResult {
        self.history.push(command.clone());

        if self.missing.contains(&command.program) {
            return Err(ToolError::NotFound(command.program.clone()));
        }
        let rendered = command.to_string();
        if self.failing.iter().any(|p| rendered.starts_with(p.as_str())) {
            return Err(ToolError::Failed {
                command: rendered,
                code: Some(1),
            });
        }
        Ok(())
    }
}

//! Error types shared across the scaffolding pipeline

use std::path::PathBuf;
use thiserror::Error;

use crate::params::ProjectType;

/// Errors that abort a scaffolding run.
///
/// Recoverable failures (version control, hosting CLI, unreadable prompts)
/// never surface here; the orchestrator absorbs them into its report.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Template '{template}' does not support project type '{project_type}'")]
    UnsupportedProjectType {
        template: String,
        project_type: ProjectType,
    },

    #[error("Project directory already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Expanded template is missing expected path: {}", .0.display())]
    MissingTemplatePath(PathBuf),

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment setup failed: {0}")]
    EnvironmentSetup(#[source] ToolError),

    #[error(transparent)]
    Template(#[from] anyhow::Error),
}

/// Failure of a single external tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found on PATH")]
    NotFound(String),

    #[error("`{command}` exited with {}", exit_code_label(.code))]
    Failed { command: String, code: Option<i32> },

    #[error("Failed to run `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// An interactive answer could not be read (closed stdin, no terminal).
#[derive(Debug, Error)]
#[error("Interactive input unavailable: {0}")]
pub struct PromptUnavailable(pub String);

pub type Result<T> = std::result::Result<T, ScaffoldError>;

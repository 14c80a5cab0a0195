//! External tool detection and invocation
//!
//! This module provides:
//! - Detection of make, uv, git and gh on the search path
//! - The tool invoker used by the orchestrator, behind a mockable runner

pub mod check;
pub mod tool;

#[cfg(test)]
pub(crate) mod mock;

pub use check::{print_tool_report, detect, detect_tools, ExternalTool, ToolInfo};
pub use tool::{
    remote_url, CommandRunner, InstallOutcome, PushOutcome, StepResult, SystemRunner,
    ToolCommand, ToolInvoker,
};

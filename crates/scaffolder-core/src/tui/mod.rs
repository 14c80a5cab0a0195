//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompts;
mod terminal;

pub use prompts::{run, CreateArgs};
pub use terminal::{CliclackPrompt, CliclackReporter};

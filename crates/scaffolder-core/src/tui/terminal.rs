//! cliclack implementations of the interaction seams

use crate::error::PromptUnavailable;
use crate::interact::{Prompt, Reporter};
use std::io::IsTerminal;

/// Yes/no questions through `cliclack::confirm`
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackPrompt;

impl Prompt for CliclackPrompt {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptUnavailable> {
        if !std::io::stdin().is_terminal() {
            return Err(PromptUnavailable("stdin is not a terminal".to_string()));
        }
        cliclack::confirm(question)
            .initial_value(default)
            .interact()
            .map_err(|e| PromptUnavailable(e.to_string()))
    }
}

/// Progress output through `cliclack::log`; write errors are ignored
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackReporter;

impl Reporter for CliclackReporter {
    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&mut self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&mut self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn error(&mut self, message: &str) {
        let _ = cliclack::log::error(message);
    }

    fn note(&mut self, title: &str, body: &str) {
        let _ = cliclack::note(title, body);
    }
}

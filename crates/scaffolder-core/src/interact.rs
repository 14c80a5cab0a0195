//! User interaction seams: yes/no prompts and progress output
//!
//! The orchestrator only talks to these traits. The cliclack front-end
//! implements them for a terminal; tests plug in scripted answers and
//! capture output instead of touching real streams.

use crate::error::PromptUnavailable;

/// Asks the user a yes/no question
pub trait Prompt {
    /// Returns the answer, or [`PromptUnavailable`] when no answer can be read.
    /// Callers treat an unavailable answer as a decline.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptUnavailable>;
}

/// Receives user-facing progress and remediation messages
pub trait Reporter {
    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    /// A step failed; the run may still continue
    fn error(&mut self, message: &str);
    /// A multi-line block such as manual setup instructions
    fn note(&mut self, title: &str, body: &str);
}

/// Prompt for runs without a terminal; every question is unanswerable
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompt for NonInteractive {
    fn confirm(&mut self, _question: &str, _default: bool) -> Result<bool, PromptUnavailable> {
        Err(PromptUnavailable("running without input".to_string()))
    }
}

/// Prompt that answers every question with its default (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl Prompt for AcceptDefaults {
    fn confirm(&mut self, _question: &str, default: bool) -> Result<bool, PromptUnavailable> {
        Ok(default)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Pops canned answers; `None` simulates unreadable input
    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<Option<bool>>,
        pub questions: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: impl IntoIterator<Item = Option<bool>>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn confirm(&mut self, question: &str, _default: bool) -> Result<bool, PromptUnavailable> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .flatten()
                .ok_or_else(|| PromptUnavailable("script exhausted".to_string()))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Line {
        Info(String),
        Success(String),
        Warning(String),
        Error(String),
        Note(String, String),
    }

    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub lines: Vec<Line>,
    }

    impl RecordingReporter {
        pub fn notes(&self) -> Vec<&str> {
            self.lines
                .iter()
                .filter_map(|l| match l {
                    Line::Note(_, body) => Some(body.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn contains(&self, needle: &str) -> bool {
            self.lines.iter().any(|l| match l {
                Line::Info(m) | Line::Success(m) | Line::Warning(m) | Line::Error(m) => {
                    m.contains(needle)
                }
                Line::Note(t, b) => t.contains(needle) || b.contains(needle),
            })
        }
    }

    impl Reporter for RecordingReporter {
        fn info(&mut self, message: &str) {
            self.lines.push(Line::Info(message.to_string()));
        }

        fn success(&mut self, message: &str) {
            self.lines.push(Line::Success(message.to_string()));
        }

        fn warning(&mut self, message: &str) {
            self.lines.push(Line::Warning(message.to_string()));
        }

        fn error(&mut self, message: &str) {
            self.lines.push(Line::Error(message.to_string()));
        }

        fn note(&mut self, title: &str, body: &str) {
            self.lines
                .push(Line::Note(title.to_string(), body.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_never_answers() {
        assert!(NonInteractive.confirm("Create remote?", true).is_err());
    }

    #[test]
    fn test_accept_defaults_returns_default() {
        assert!(AcceptDefaults.confirm("Private?", true).unwrap());
        assert!(!AcceptDefaults.confirm("Remote?", false).unwrap());
    }
}

//! Post-generation orchestration
//!
//! Runs once the expanded tree has been pruned: install the environment,
//! optionally bootstrap a local repository, optionally create and push to a
//! remote, then print the summary for the project type. The sequence is
//! strictly forward. Version-control and hosting failures are reported with
//! manual instructions and the run continues; only a failed install aborts.

pub mod messages;

use crate::error::Result;
use crate::interact::{Prompt, Reporter};
use crate::params::ParameterSet;
use crate::runtime::tool::{InstallOutcome, PushOutcome, ToolInvoker};

/// Orchestration states, visited in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Pruned,
    EnvironmentReady,
    LocalRepoDecision,
    LocalRepoResult,
    RemoteRepoDecision,
    RemoteRepoAttempt,
    Summary,
}

/// Explicit run configuration; the core never reads the process environment
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    /// Do not run the environment installer
    pub skip_install: bool,
    /// Use an SSH remote URL instead of HTTPS
    pub prefer_ssh: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            skip_install: false,
            prefer_ssh: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRepo {
    NotRequested,
    Created,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRepo {
    /// Never offered because no local repository exists
    NotOffered,
    Declined,
    Pushed,
    Failed,
}

/// What a run did, for callers and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub stages: Vec<Stage>,
    pub install: InstallOutcome,
    pub local_repo: LocalRepo,
    pub remote_repo: RemoteRepo,
    /// Whether the hosting CLI created the repository, when it was asked to
    pub hosting_repo_created: Option<bool>,
    /// Visibility requested for the remote, when one was attempted
    pub private: Option<bool>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Pruned],
            install: InstallOutcome::Skipped,
            local_repo: LocalRepo::NotRequested,
            remote_repo: RemoteRepo::NotOffered,
            hosting_repo_created: None,
            private: None,
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(?stage, "orchestrator stage");
        self.stages.push(stage);
    }
}

pub struct Orchestrator<'a> {
    tools: ToolInvoker<'a>,
    prompt: &'a mut dyn Prompt,
    reporter: &'a mut dyn Reporter,
    config: OrchestratorConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        tools: ToolInvoker<'a>,
        prompt: &'a mut dyn Prompt,
        reporter: &'a mut dyn Reporter,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            tools,
            prompt,
            reporter,
            config,
        }
    }

    /// Drive the post-prune sequence for `params`
    pub fn run(mut self, params: &ParameterSet) -> Result<RunReport> {
        let mut report = RunReport::new();

        if self.config.skip_install {
            self.reporter
                .info("Skipping environment creation (test mode)");
        } else {
            self.reporter.info("Creating environment...");
        }
        report.install = self.tools.install_environment(self.config.skip_install)?;
        report.enter(Stage::EnvironmentReady);

        report.enter(Stage::LocalRepoDecision);
        if !params.git_repo.is_yes() {
            self.reporter
                .note("Local repository", &messages::local_repo_help(params));
        } else {
            report.local_repo = self.create_local_repo(params);
            report.enter(Stage::LocalRepoResult);

            if report.local_repo == LocalRepo::Created {
                report.enter(Stage::RemoteRepoDecision);
                let remote = self.offer_remote_repo(params, &mut report);
                report.remote_repo = remote;
            }
            if report.remote_repo != RemoteRepo::Pushed {
                self.reporter
                    .note("Remote repository", &messages::remote_repo_help(params));
            }
        }

        report.enter(Stage::Summary);
        self.reporter.success(&messages::completion(params));
        self.reporter.note(
            "Next steps",
            &messages::end_message(params.project_type, &params.project_name),
        );

        Ok(report)
    }

    fn create_local_repo(&mut self, params: &ParameterSet) -> LocalRepo {
        match self
            .tools
            .init_local_repository(&params.author, &params.author_email)
        {
            Ok(()) => {
                self.reporter.success(&format!(
                    "Git repo was successfully created in {}",
                    params.project_name
                ));
                LocalRepo::Created
            }
            Err(e) => {
                self.reporter
                    .error(&format!("Error creating git repository: {}", e));
                self.reporter
                    .note("Local repository", &messages::local_repo_help(params));
                LocalRepo::Failed
            }
        }
    }

    fn offer_remote_repo(&mut self, params: &ParameterSet, report: &mut RunReport) -> RemoteRepo {
        let question = format!(
            "Do you want to create a remote git repository {} on {}?",
            params.project_name, params.git_server
        );
        let wanted = match self.prompt.confirm(&question, false) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!(error = %e, "remote repository prompt unavailable");
                self.reporter.info(
                    "Non-interactive environment detected. Skipping remote repository creation.",
                );
                false
            }
        };
        if !wanted {
            return RemoteRepo::Declined;
        }

        report.enter(Stage::RemoteRepoAttempt);
        let private = self.choose_visibility(params);
        report.private = Some(private);

        let created = match self.tools.create_hosting_repo(
            &params.author_username,
            &params.project_name,
            private,
        ) {
            Ok(()) => true,
            Err(e) => {
                self.reporter.warning(&format!(
                    "Hosting CLI (gh) not available or failed ({}). Please create repository '{}' manually.",
                    e, params.project_name
                ));
                false
            }
        };
        report.hosting_repo_created = Some(created);

        match self.tools.link_and_push_remote(
            &params.author_username,
            &params.project_name,
            self.config.prefer_ssh,
        ) {
            PushOutcome::Pushed => {
                self.reporter.success(&format!(
                    "Remote git repository was successfully created and set up on {}",
                    params.git_server
                ));
                RemoteRepo::Pushed
            }
            PushOutcome::PushFailed {
                over_ssh: true,
                error,
            } => {
                self.reporter.warning(&format!("Push failed: {}", error));
                self.reporter
                    .note("SSH push failed", &messages::ssh_push_help(params));
                RemoteRepo::Failed
            }
            PushOutcome::PushFailed { error, .. } => {
                self.reporter.warning(&format!("Push failed: {}", error));
                RemoteRepo::Failed
            }
            PushOutcome::LinkFailed(error) => {
                self.reporter.error(&format!(
                    "Error setting up remote git repository: {}",
                    error
                ));
                RemoteRepo::Failed
            }
        }
    }

    fn choose_visibility(&mut self, params: &ParameterSet) -> bool {
        let default = params.private_repo.is_yes();
        match self
            .prompt
            .confirm("Should the repository be private?", default)
        {
            Ok(private) => private,
            Err(_) => {
                self.reporter.info(&format!(
                    "Non-interactive environment detected. Creating {} repository.",
                    if default { "private" } else { "public" }
                ));
                default
            }
        }
    }
}

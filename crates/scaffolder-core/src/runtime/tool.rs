//! External tool invocation for environment setup and repository bootstrap
//!
//! Every call goes through a [`CommandRunner`] so the orchestration logic can
//! be exercised without spawning real processes. Version-control and hosting
//! steps hand their [`ToolError`] back to the caller to report and never abort
//! the run; only the environment install step is fatal.

use crate::error::{Result, ScaffoldError, ToolError};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Branch created by `git init` and pushed to the remote
pub const DEFAULT_BRANCH: &str = "main";

/// Message of the single commit recorded in a new repository
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Environment variable read by the hosting CLI to pick its server
pub const HOSTING_HOST_ENV: &str = "GH_HOST";

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    fn run(&mut self, command: &ToolCommand) -> StepResult;
}

/// Spawns real processes, inheriting stdio so tool output reaches the user
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ToolCommand) -> StepResult {
        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.working_dir {
            process.current_dir(dir);
        }
        for (key, value) in &command.env {
            process.env(key, value);
        }

        tracing::debug!(command = %command, cwd = ?command.working_dir, "spawning");

        match process.status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ToolError::Failed {
                command: command.to_string(),
                code: status.code(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ToolError::NotFound(command.program.clone()))
            }
            Err(source) => Err(ToolError::Io {
                command: command.to_string(),
                source,
            }),
        }
    }
}

/// Outcome of a best-effort step
pub type StepResult = std::result::Result<(), ToolError>;

/// Result of the environment install step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Skipped,
}

/// Result of linking the local repository to its remote and pushing
#[derive(Debug)]
pub enum PushOutcome {
    Pushed,
    /// `remote add` or `branch -M` failed; nothing was sent
    LinkFailed(ToolError),
    /// The single push attempt failed
    PushFailed { over_ssh: bool, error: ToolError },
}

impl PushOutcome {
    pub fn is_pushed(&self) -> bool {
        matches!(self, PushOutcome::Pushed)
    }
}

/// Remote URL for `owner/repo` on `server`
pub fn remote_url(server: &str, owner: &str, repo: &str, over_ssh: bool) -> String {
    if over_ssh {
        format!("git@{}:{}/{}.git", server, owner, repo)
    } else {
        format!("https://{}/{}/{}.git", server, owner, repo)
    }
}

/// Wraps the installer, version-control and hosting CLIs for one project
pub struct ToolInvoker<'a> {
    runner: &'a mut dyn CommandRunner,
    project_root: PathBuf,
    git_server: String,
}

impl<'a> ToolInvoker<'a> {
    pub fn new(runner: &'a mut dyn CommandRunner, project_root: &Path, git_server: &str) -> Self {
        Self {
            runner,
            project_root: project_root.to_path_buf(),
            git_server: git_server.to_string(),
        }
    }

    fn command(&self, program: &str) -> ToolCommand {
        ToolCommand::new(program).current_dir(&self.project_root)
    }

    fn git<I, S>(&mut self, args: I) -> StepResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = self.command("git").args(args);
        self.runner.run(&command)
    }

    /// Install the new project's dependencies with `make install`.
    ///
    /// Any failure, including a missing `make`, is fatal: a project that
    /// cannot be installed is not a usable scaffold.
    pub fn install_environment(&mut self, skip: bool) -> Result<InstallOutcome> {
        if skip {
            tracing::info!("environment install skipped by configuration");
            return Ok(InstallOutcome::Skipped);
        }

        let command = self.command("make").args(["install"]);
        self.runner
            .run(&command)
            .map_err(ScaffoldError::EnvironmentSetup)?;
        Ok(InstallOutcome::Installed)
    }

    /// Initialise a repository, record the initial commit and install hooks.
    ///
    /// Stops at the first failing step and leaves whatever was created on disk.
    pub fn init_local_repository(&mut self, author: &str, author_email: &str) -> StepResult {
        self.git(["init", "-b", DEFAULT_BRANCH])?;
        self.git(["config", "user.name", author])?;
        if !author_email.is_empty() {
            self.git(["config", "user.email", author_email])?;
        }
        self.git(["add", "."])?;
        self.git(["commit", "-m", INITIAL_COMMIT_MESSAGE])?;

        let hooks = self.command("uv").args(["run", "pre-commit", "install"]);
        self.runner.run(&hooks)
    }

    /// Create `owner/repo` on the configured hosting server. Best effort.
    pub fn create_hosting_repo(
        &mut self,
        owner: &str,
        repo_name: &str,
        is_private: bool,
    ) -> StepResult {
        let visibility = if is_private { "--private" } else { "--public" };
        let command = self
            .command("gh")
            .args(["repo", "create"])
            .args([format!("{}/{}", owner, repo_name), visibility.to_string()])
            .env(HOSTING_HOST_ENV, &self.git_server);

        self.runner.run(&command)
    }

    /// Point `origin` at `owner/repo`, rename the branch and push once.
    pub fn link_and_push_remote(
        &mut self,
        owner: &str,
        repo_name: &str,
        prefer_ssh: bool,
    ) -> PushOutcome {
        let url = remote_url(&self.git_server, owner, repo_name, prefer_ssh);

        let linked = self
            .git(["remote", "add", "origin", url.as_str()])
            .and_then(|()| self.git(["branch", "-M", DEFAULT_BRANCH]));
        if let Err(error) = linked {
            tracing::warn!(error = %error, "linking remote failed");
            return PushOutcome::LinkFailed(error);
        }

        match self.git(["push", "-u", "origin", DEFAULT_BRANCH]) {
            Ok(()) => PushOutcome::Pushed,
            Err(error) => {
                tracing::warn!(error = %error, "push failed");
                PushOutcome::PushFailed {
                    over_ssh: prefer_ssh,
                    error,
                }
            }
        }
    }
}

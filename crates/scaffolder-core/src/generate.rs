//! End-to-end project generation
//!
//! Validation, expansion, pruning and orchestration in one call. Front-ends
//! resolve the template and collect parameters; everything after that lives
//! here so it can be driven with fakes in tests.

use crate::error::{Result, ScaffoldError};
use crate::interact::{Prompt, Reporter};
use crate::layout;
use crate::orchestrator::{Orchestrator, OrchestratorConfig, RunReport};
use crate::params::ParameterSet;
use crate::runtime::tool::{CommandRunner, ToolInvoker};
use crate::templates::{expand, TemplateManifest};
use std::path::{Path, PathBuf};

/// Everything needed to generate one project
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub params: ParameterSet,
    /// Directory the project directory is created in
    pub output_dir: PathBuf,
    /// Expand into an existing project directory
    pub overwrite: bool,
    pub config: OrchestratorConfig,
}

/// Outcome of a successful generation
#[derive(Debug, Clone)]
pub struct Generated {
    pub project_root: PathBuf,
    /// Files left after pruning, relative to the project root
    pub files: Vec<PathBuf>,
    /// Absolute paths removed by the selector
    pub pruned: Vec<PathBuf>,
    pub report: RunReport,
}

/// Generate a project from an already fetched template.
///
/// Parameters are validated before anything touches the filesystem.
pub fn generate(
    template_dir: &Path,
    manifest: &TemplateManifest,
    request: &GenerateRequest,
    runner: &mut dyn CommandRunner,
    prompt: &mut dyn Prompt,
    reporter: &mut dyn Reporter,
) -> Result<Generated> {
    let params = &request.params;
    params.validate()?;
    if !manifest.supports(params.project_type) {
        return Err(ScaffoldError::UnsupportedProjectType {
            template: manifest.name.clone(),
            project_type: params.project_type,
        });
    }

    tracing::info!(
        project = %params.project_name,
        project_type = %params.project_type,
        output = %request.output_dir.display(),
        "generating project"
    );
    let expansion = expand(
        template_dir,
        manifest,
        params,
        &request.output_dir,
        request.overwrite,
    )?;
    let project_root = expansion.project_root;

    let pruned = layout::prune(&project_root, params)?;
    let files = expansion
        .files
        .into_iter()
        .filter(|file| {
            let path = project_root.join(file);
            !pruned.iter().any(|removed| path.starts_with(removed))
        })
        .collect();

    let tools = ToolInvoker::new(runner, &project_root, &params.git_server);
    let report = Orchestrator::new(tools, prompt, reporter, request.config).run(params)?;

    Ok(Generated {
        project_root,
        files,
        pruned,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::testing::{RecordingReporter, ScriptedPrompt};
    use crate::orchestrator::{LocalRepo, RemoteRepo};
    use crate::params::{Flag, ProjectType};
    use crate::runtime::mock::RecordingRunner;
    use std::fs;

    fn bundled_template() -> (PathBuf, TemplateManifest) {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/uv-lite");
        let manifest = TemplateManifest::load(&dir).unwrap();
        (dir, manifest)
    }

    fn request(params: ParameterSet, output_dir: &Path) -> GenerateRequest {
        GenerateRequest {
            params,
            output_dir: output_dir.to_path_buf(),
            overwrite: false,
            config: OrchestratorConfig {
                skip_install: true,
                ..Default::default()
            },
        }
    }

    fn without_vcs(project_type: ProjectType) -> ParameterSet {
        ParameterSet {
            project_name: "my-project".to_string(),
            project_type,
            git_repo: Flag::No,
            ..Default::default()
        }
    }

    fn run(
        request: &GenerateRequest,
        runner: &mut RecordingRunner,
        reporter: &mut RecordingReporter,
    ) -> Result<Generated> {
        let (dir, manifest) = bundled_template();
        let mut prompt = ScriptedPrompt::default();
        generate(&dir, &manifest, request, runner, &mut prompt, reporter)
    }

    #[test]
    fn test_cli_project_without_docs_ci_or_repository() {
        let out = tempfile::tempdir().unwrap();
        let params = ParameterSet {
            mkdocs: Flag::No,
            github_actions: Flag::No,
            ..without_vcs(ProjectType::Cli)
        };
        let mut runner = RecordingRunner::new();
        let mut reporter = RecordingReporter::default();

        let generated = run(&request(params, out.path()), &mut runner, &mut reporter).unwrap();

        let root = out.path().join("my-project");
        assert_eq!(generated.project_root, root);
        assert!(root.join("my_project/cli.py").is_file());
        assert!(!root.join("my_project/example.py").exists());
        assert!(!root.join("docs").exists());
        assert!(!root.join("mkdocs.yml").exists());
        assert!(!root.join(".github").exists());
        assert!(!root.join("notebooks").exists());
        assert!(!root.join("data").exists());

        assert!(runner.history().is_empty());
        assert_eq!(generated.report.local_repo, LocalRepo::NotRequested);
        assert!(reporter.contains("git init -b main"));
        assert!(reporter.contains("make run"));

        let pyproject = fs::read_to_string(root.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("my-project = \"my_project.cli:app\""));
        assert!(pyproject.contains("typer"));
        assert!(!pyproject.contains("mkdocs"));
        assert!(!generated
            .files
            .iter()
            .any(|f| f.starts_with("docs") || f.ends_with("example.py")));
    }

    #[test]
    fn test_every_project_type_renders_bundled_template() {
        for project_type in ProjectType::ALL {
            let out = tempfile::tempdir().unwrap();
            let mut runner = RecordingRunner::new();
            let mut reporter = RecordingReporter::default();
            run(
                &request(without_vcs(project_type), out.path()),
                &mut runner,
                &mut reporter,
            )
            .unwrap();

            let package = out.path().join("my-project/my_project");
            assert!(package.join("__init__.py").is_file());
            assert!(package.join("utils.py").is_file());
            assert_eq!(
                package.join("example.py").exists(),
                project_type == ProjectType::Package
            );
            assert_eq!(
                package.join("cli.py").exists(),
                project_type == ProjectType::Cli
            );
        }
    }

    #[test]
    fn test_notebooks_project_keeps_helpers_and_notebooks() {
        let out = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        let mut reporter = RecordingReporter::default();
        run(
            &request(without_vcs(ProjectType::Notebooks), out.path()),
            &mut runner,
            &mut reporter,
        )
        .unwrap();

        let root = out.path().join("my-project");
        let utils = fs::read_to_string(root.join("my_project/utils.py")).unwrap();
        assert!(utils.contains("def load_sample_data"));
        let notebook = fs::read_to_string(root.join("notebooks/01-exploratory.ipynb")).unwrap();
        assert!(notebook.contains("from my_project.utils import load_sample_data"));
        assert!(root.join("data/.gitkeep").is_file());
        assert!(reporter.contains("make jupyter"));
    }

    #[test]
    fn test_invalid_names_touch_nothing() {
        for name in ["_invalid", "invalid_name", "123invalid"] {
            let out = tempfile::tempdir().unwrap();
            let params = ParameterSet {
                project_name: name.to_string(),
                ..Default::default()
            };
            let mut runner = RecordingRunner::new();
            let mut reporter = RecordingReporter::default();

            let err = run(&request(params, out.path()), &mut runner, &mut reporter).unwrap_err();

            assert!(matches!(err, ScaffoldError::InvalidProjectName { .. }), "{name}");
            assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
            assert!(runner.history().is_empty());
            assert!(reporter.lines.is_empty());
        }
    }

    #[test]
    fn test_package_identifier_names_the_package_directory() {
        let out = tempfile::tempdir().unwrap();
        let params = ParameterSet {
            project_name: "My-Cool-App".to_string(),
            ..without_vcs(ProjectType::Package)
        };
        let mut runner = RecordingRunner::new();
        let mut reporter = RecordingReporter::default();
        run(&request(params, out.path()), &mut runner, &mut reporter).unwrap();

        assert!(out
            .path()
            .join("My-Cool-App/my_cool_app/example.py")
            .is_file());
    }

    #[test]
    fn test_codecov_controls_ci_upload_step() {
        for codecov in [Flag::Yes, Flag::No] {
            let out = tempfile::tempdir().unwrap();
            let params = ParameterSet {
                codecov,
                ..without_vcs(ProjectType::Package)
            };
            let mut runner = RecordingRunner::new();
            let mut reporter = RecordingReporter::default();
            run(&request(params, out.path()), &mut runner, &mut reporter).unwrap();

            let ci =
                fs::read_to_string(out.path().join("my-project/.github/workflows/ci.yml")).unwrap();
            assert_eq!(ci.contains("codecov/codecov-action"), codecov.is_yes());
            assert_eq!(
                ci.contains("${{ secrets.CODECOV_TOKEN }}"),
                codecov.is_yes()
            );
        }
    }

    #[test]
    fn test_unsupported_project_type_is_rejected() {
        let (dir, mut manifest) = bundled_template();
        manifest.project_types = vec![ProjectType::Package];
        let out = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        let mut prompt = ScriptedPrompt::default();
        let mut reporter = RecordingReporter::default();

        let err = generate(
            &dir,
            &manifest,
            &request(without_vcs(ProjectType::Notebooks), out.path()),
            &mut runner,
            &mut prompt,
            &mut reporter,
        )
        .unwrap_err();

        assert!(matches!(err, ScaffoldError::UnsupportedProjectType { .. }));
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_repository_commands_run_in_project_root() {
        let out = tempfile::tempdir().unwrap();
        let params = ParameterSet {
            project_name: "my-project".to_string(),
            author: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let mut req = request(params, out.path());
        req.config.skip_install = false;
        let (dir, manifest) = bundled_template();
        let mut runner = RecordingRunner::new();
        let mut prompt = ScriptedPrompt::new([Some(false)]);
        let mut reporter = RecordingReporter::default();

        let generated =
            generate(&dir, &manifest, &req, &mut runner, &mut prompt, &mut reporter).unwrap();

        assert_eq!(generated.report.local_repo, LocalRepo::Created);
        assert_eq!(generated.report.remote_repo, RemoteRepo::Declined);
        let rendered: Vec<String> = runner.history().iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered[0], "make install");
        assert!(rendered.contains(&"git init -b main".to_string()));
        assert!(runner
            .history()
            .iter()
            .all(|c| c.working_dir.as_deref() == Some(generated.project_root.as_path())));
    }
}

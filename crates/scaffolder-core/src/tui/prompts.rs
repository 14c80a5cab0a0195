//! Charm-style create flow using cliclack

use super::terminal::{CliclackPrompt, CliclackReporter};
use crate::generate::{generate, GenerateRequest};
use crate::interact::{AcceptDefaults, NonInteractive, Prompt};
use crate::orchestrator::OrchestratorConfig;
use crate::params::{validate_project_name, Flag, ParameterOverrides, ParameterSet, ProjectType};
use crate::product::ProductConfig;
use crate::runtime::{detect_tools, SystemRunner};
use crate::templates::{FetchedTemplate, TemplateFetcher, TemplateSource};
use anyhow::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local template directory, instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Template location (URL of a zip archive or a directory)
    pub template_url: Option<String>,

    /// YAML file with parameter values
    pub config_file: Option<PathBuf>,

    /// Directory the project directory is created in
    pub output_dir: Option<PathBuf>,

    /// Parameter values given as flags
    pub params: ParameterOverrides,

    /// Expand into an existing project directory without asking
    pub overwrite: bool,

    /// Do not run `make install`
    pub skip_install: bool,

    /// Use an HTTPS remote URL instead of SSH
    pub https: bool,

    /// Never prompt; every yes/no question is treated as unanswerable
    pub no_input: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    fn interactive(&self) -> bool {
        !self.no_input && !self.yes && std::io::stdin().is_terminal()
    }

    fn prompt(&self) -> Box<dyn Prompt> {
        if self.no_input {
            Box::new(NonInteractive)
        } else if self.yes {
            Box::new(AcceptDefaults)
        } else {
            Box::new(CliclackPrompt)
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Advisory tool check
    check_tools()?;

    // Step 2: Fetch template
    let template = fetch_template(config, &args).await?;
    if let Some(warning) = template
        .manifest()
        .compatibility_warning(cli_version, config.upgrade_command())
    {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    // Step 3: Collect and validate parameters before touching the filesystem
    let params = collect_parameters(&args)?;
    params.validate()?;

    // Step 4: Select directory
    let output_dir = select_output_dir(&args)?;
    let overwrite = confirm_overwrite(&args, &output_dir.join(&params.project_name))?;

    // Step 5: Generate, install and bootstrap repositories
    let request = GenerateRequest {
        params,
        output_dir,
        overwrite,
        config: OrchestratorConfig {
            skip_install: args.skip_install,
            prefer_ssh: !args.https,
        },
    };
    let mut prompt = args.prompt();
    let generated = generate(
        template.dir(),
        template.manifest(),
        &request,
        &mut SystemRunner,
        prompt.as_mut(),
        &mut CliclackReporter,
    )?;

    tracing::debug!(
        files = generated.files.len(),
        pruned = generated.pruned.len(),
        "generation finished"
    );
    cliclack::outro(format!(
        "Created {} files in {}. Docs: {}",
        generated.files.len(),
        generated.project_root.display(),
        config.docs_url()
    ))?;

    Ok(())
}

fn check_tools() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools = detect_tools();
    let labels: Vec<String> = tools.iter().map(|t| t.label()).collect();
    spinner.stop(format!("Detected tools: {}", labels.join(", ")));

    for info in tools.iter().filter(|t| !t.available) {
        cliclack::log::warning(format!(
            "{} not found; {} will need to be done by hand",
            info.tool,
            info.tool.purpose()
        ))?;
    }
    Ok(())
}

fn template_source<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<TemplateSource> {
    if let Some(path) = &args.template_dir {
        return Ok(TemplateSource::Local(path.clone()));
    }
    if let Some(location) = &args.template_url {
        return TemplateSource::parse(location);
    }
    TemplateSource::from_config(config)
}

async fn fetch_template<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<FetchedTemplate> {
    let source = template_source(config, args)?;
    cliclack::log::info(format!("Using template from {}", source))?;

    let fetcher = TemplateFetcher::new(source, config.user_agent());
    let spinner = cliclack::spinner();
    spinner.start("Loading template...");

    match fetcher.fetch().await {
        Ok(template) => {
            spinner.stop(format!(
                "Template: {} - {}",
                template.manifest().name,
                template.manifest().description
            ));
            Ok(template)
        }
        Err(e) => {
            spinner.stop("Failed to load template");
            Err(e)
        }
    }
}

fn collect_parameters(args: &CreateArgs) -> Result<ParameterSet> {
    let mut params = match &args.config_file {
        Some(path) => {
            cliclack::log::info(format!("Using parameters from {}", path.display()))?;
            ParameterSet::from_yaml_file(path)?
        }
        None => ParameterSet::default(),
    };
    args.params.apply(&mut params);

    if args.interactive() {
        prompt_missing(&mut params, &args.params)?;
    }
    Ok(params)
}

/// Ask for every parameter that was not given as a flag, defaulting to the
/// current value
fn prompt_missing(params: &mut ParameterSet, given: &ParameterOverrides) -> Result<()> {
    if given.project_name.is_none() {
        params.project_name = cliclack::input("Project name")
            .default_input(&params.project_name)
            .validate(|name: &String| validate_project_name(name).map_err(|e| e.to_string()))
            .interact()?;
    }
    if given.project_description.is_none() {
        params.project_description = text("Project description", &params.project_description)?;
    }
    if given.author.is_none() {
        params.author = text("Author", &params.author)?;
    }
    if given.author_email.is_none() {
        params.author_email = cliclack::input("Author email")
            .default_input(&params.author_email)
            .required(false)
            .interact()?;
    }
    if given.author_username.is_none() {
        params.author_username = text("Username on the git server", &params.author_username)?;
    }
    if given.project_type.is_none() {
        params.project_type = cliclack::select("Project type")
            .item(ProjectType::Package, "package", "importable library")
            .item(ProjectType::Cli, "cli", "Typer command-line application")
            .item(ProjectType::Notebooks, "notebooks", "Jupyter notebooks with data helpers")
            .initial_value(params.project_type)
            .interact()?;
    }
    if given.mkdocs.is_none() {
        params.mkdocs = toggle("Add MkDocs documentation?", params.mkdocs)?;
    }
    if given.github_actions.is_none() {
        params.github_actions = toggle("Add GitHub Actions workflows?", params.github_actions)?;
    }
    if given.codecov.is_none() && params.github_actions.is_yes() {
        params.codecov = toggle("Upload coverage to Codecov?", params.codecov)?;
    }
    if given.git_repo.is_none() {
        params.git_repo = toggle("Initialise a git repository?", params.git_repo)?;
    }
    if given.private_repo.is_none() && params.git_repo.is_yes() {
        params.private_repo = toggle("Make the remote repository private?", params.private_repo)?;
    }
    if given.git_server.is_none() {
        params.git_server = text("Git server", &params.git_server)?;
    }
    Ok(())
}

fn text(prompt: &str, default: &str) -> Result<String> {
    Ok(cliclack::input(prompt).default_input(default).interact()?)
}

fn toggle(prompt: &str, current: Flag) -> Result<Flag> {
    let answer: bool = cliclack::confirm(prompt)
        .initial_value(current.is_yes())
        .interact()?;
    Ok(answer.into())
}

fn select_output_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.output_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Output directory does not exist: {}", path.display());
    }
    Ok(path)
}

/// Whether to expand into `project_dir` although it exists.
///
/// Without a terminal the answer is no and generation reports the
/// existing directory.
fn confirm_overwrite(args: &CreateArgs, project_dir: &Path) -> Result<bool> {
    if args.overwrite || !project_dir.exists() {
        return Ok(args.overwrite);
    }

    cliclack::log::warning(format!("{} already exists", project_dir.display()))?;
    if args.yes {
        return Ok(true);
    }
    if !args.interactive() {
        return Ok(false);
    }

    let confirm: bool = cliclack::confirm("Overwrite files in the existing directory?")
        .initial_value(false)
        .interact()?;
    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(true)
}

//! uv-lite - Project scaffolding for Python projects managed with uv

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffolder_core::runtime::{print_tool_report, detect_tools};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{ParameterOverrides, ProductConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// uv-lite product configuration
#[derive(Clone)]
pub struct UvLiteConfig;

impl ProductConfig for UvLiteConfig {
    fn name(&self) -> &'static str {
        "uv-lite"
    }

    fn display_name(&self) -> &'static str {
        "uv-lite"
    }

    fn default_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../templates/uv-lite"
        ))
    }

    fn template_url_env(&self) -> &'static str {
        "UV_LITE_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.astral.sh/uv/"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install uv-lite --force"
    }
}

#[derive(Parser, Debug)]
#[command(name = "uv-lite")]
#[command(about = "CLI for scaffolding Python projects managed with uv")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Create flags accepted without the subcommand
    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Python project (default command)
    Create(CliCreateArgs),
    /// List the external tools used after generation and their versions
    CheckTools,
    /// Build the zip archive of a template directory (for development use)
    BuildZip(BuildZipArgs),
}

#[derive(clap::Args, Debug)]
pub struct CliCreateArgs {
    #[command(flatten)]
    pub params: ParameterOverrides,

    /// YAML file with parameter values; flags take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Local directory to use as the template (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template location: URL of a zip archive or a directory.
    /// Ignored when --template-dir is given
    #[arg(long = "template-url", env = "UV_LITE_TEMPLATE_URL")]
    pub template_url: Option<String>,

    /// Directory to create the project in
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Expand into an existing project directory
    #[arg(long)]
    pub overwrite: bool,

    /// Do not run `make install` after generation
    #[arg(
        long = "skip-install",
        env = "UV_LITE_SKIP_INSTALL",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub skip_install: bool,

    /// Use an HTTPS remote URL instead of SSH
    #[arg(long)]
    pub https: bool,

    /// Never prompt; questions are treated as unanswered
    #[arg(long = "no-input", conflicts_with = "yes")]
    pub no_input: bool,

    /// Auto-confirm all prompts with their defaults (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template_url: args.template_url,
            config_file: args.config_file,
            output_dir: args.output_dir,
            params: args.params,
            overwrite: args.overwrite,
            skip_install: args.skip_install,
            https: args.https,
            no_input: args.no_input,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipArgs {
    /// Template directory to pack; defaults to the bundled template
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

async fn create(config: &UvLiteConfig, args: CreateArgs) -> Result<()> {
    let result = scaffolder_core::tui::run(config, args, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(version = CLI_VERSION, "uv-lite started");

    let config = UvLiteConfig;

    match args.command {
        Some(Command::Create(create_args)) => create(&config, create_args.into()).await,
        Some(Command::CheckTools) => {
            print_tool_report(&detect_tools());
            Ok(())
        }
        Some(Command::BuildZip(build_args)) => {
            scaffolder_core::templates::write_zip(&config, &build_args.template_dir)?;
            Ok(())
        }
        // No subcommand provided, default to create behavior
        None => create(&config, args.create.into()).await,
    }
}

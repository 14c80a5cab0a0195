//! Scaffolder Core - Shared library for the uv-lite project scaffolder
//!
//! Generates a ready-to-use Python project from a template, prunes the files
//! that do not apply to the chosen options, then installs the environment and
//! optionally bootstraps local and remote git repositories.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - parameters, template fetching and expansion,
//!   file-set pruning, external tool invocation
//! - **Layer 2: Workflow Orchestration** - the post-generation [`orchestrator`]
//!   and the [`generate`] pipeline, driven through the [`interact`] seams
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{generate, templates, interact, runtime, GenerateRequest, ParameterSet};
//!
//! let source = templates::TemplateSource::parse("templates/uv-lite")?;
//! let template = templates::TemplateFetcher::new(source, "my-tool").fetch().await?;
//! let request = GenerateRequest {
//!     params: ParameterSet { project_name: "my-project".into(), ..Default::default() },
//!     output_dir: ".".into(),
//!     overwrite: false,
//!     config: Default::default(),
//! };
//! generate(
//!     template.dir(),
//!     template.manifest(),
//!     &request,
//!     &mut runtime::SystemRunner,
//!     &mut interact::AcceptDefaults,
//!     &mut tui::CliclackReporter,
//! )?;
//! ```

pub mod error;
pub mod generate;
pub mod interact;
pub mod layout;
pub mod orchestrator;
pub mod params;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ScaffoldError, ToolError};
pub use generate::{generate, GenerateRequest, Generated};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunReport};
pub use params::{derive_package_identifier, Flag, ParameterOverrides, ParameterSet, ProjectType};
pub use product::ProductConfig;
pub use runtime::{detect_tools, ExternalTool, ToolInfo};
pub use templates::{TemplateFetcher, TemplateManifest, TemplateSource};

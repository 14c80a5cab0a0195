//! Template manifest types and parsing

use crate::params::ProjectType;
use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest file name at the template root
pub const MANIFEST_FILE: &str = "template.yaml";

fn all_project_types() -> Vec<ProjectType> {
    ProjectType::ALL.to_vec()
}

fn default_root() -> String {
    "{{ project_name }}".to_string()
}

/// Template manifest (`template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Project types the template ships files for
    #[serde(default = "all_project_types")]
    pub project_types: Vec<ProjectType>,

    /// Directory holding the project tree; its rendered name is the project directory
    #[serde(default = "default_root")]
    pub root: String,

    /// File name patterns copied byte for byte instead of being rendered
    #[serde(default)]
    pub copy_without_render: Vec<String>,
}

impl TemplateManifest {
    /// Read `template.yaml` from a template directory
    pub fn load(template_dir: &Path) -> Result<Self> {
        let path = template_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn supports(&self, project_type: ProjectType) -> bool {
        self.project_types.contains(&project_type)
    }

    /// Whether `file_path` must be copied without rendering.
    ///
    /// Patterns match the file name: `*.png` is a suffix match, `logo*` a
    /// prefix match, anything else an exact match.
    pub fn is_verbatim(&self, file_path: &str) -> bool {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        self.copy_without_render.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                filename.starts_with(prefix)
            } else {
                filename == pattern
            }
        })
    }

    /// Warning text when the template was written for a newer CLI.
    ///
    /// Unparseable versions on either side skip the check.
    pub fn compatibility_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let cli = Version::parse(cli_version.trim_start_matches('v')).ok()?;
        let wanted = Version::parse(self.version.trim_start_matches('v')).ok()?;

        (cli < wanted).then(|| {
            format!(
                "Template '{}' was designed for CLI version {} or newer; you are running {}. \
                 Consider updating: {}",
                self.name, wanted, cli, upgrade_command
            )
        })
    }
}

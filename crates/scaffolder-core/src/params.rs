//! Project parameters and derived identifiers

use crate::error::{Result, ScaffoldError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kind of project to generate; exactly one variant's files survive pruning
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Importable library package
    #[default]
    Package,
    /// Command-line application
    Cli,
    /// Data-science project with sample notebooks
    Notebooks,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Package,
        ProjectType::Cli,
        ProjectType::Notebooks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Package => "package",
            ProjectType::Cli => "cli",
            ProjectType::Notebooks => "notebooks",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "package" => Ok(ProjectType::Package),
            "cli" => Ok(ProjectType::Cli),
            "notebooks" => Ok(ProjectType::Notebooks),
            other => Err(ScaffoldError::InvalidParameter {
                field: "project_type",
                reason: format!("expected package, cli or notebooks, got '{}'", other),
            }),
        }
    }
}

/// A y/n template toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Flag {
    #[default]
    #[serde(rename = "y")]
    Yes,
    #[serde(rename = "n")]
    No,
}

// Parameter files may spell toggles as y/n, yes/no or YAML booleans
impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bool(bool),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bool(value) => Ok(value.into()),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Flag {
    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "y",
            Flag::No => "n",
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::Yes
        } else {
            Flag::No
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(Flag::Yes),
            "n" | "no" | "false" => Ok(Flag::No),
            other => Err(format!("expected y or n, got '{}'", other)),
        }
    }
}

/// Validated configuration describing the project to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub project_name: String,
    pub project_description: String,
    pub author: String,
    pub author_email: String,
    pub author_username: String,
    pub project_type: ProjectType,
    pub mkdocs: Flag,
    pub github_actions: Flag,
    pub codecov: Flag,
    pub git_repo: Flag,
    pub private_repo: Flag,
    pub git_server: String,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            project_name: "example-project".to_string(),
            project_description: "A Python project scaffolded with uv".to_string(),
            author: "Your Name".to_string(),
            author_email: String::new(),
            author_username: "your-username".to_string(),
            project_type: ProjectType::Package,
            mkdocs: Flag::Yes,
            github_actions: Flag::Yes,
            codecov: Flag::Yes,
            git_repo: Flag::Yes,
            private_repo: Flag::Yes,
            git_server: "github.com".to_string(),
        }
    }
}

impl ParameterSet {
    /// Load parameters from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file {}", path.display()))?;
        let params = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse parameter file {}", path.display()))?;
        Ok(params)
    }

    /// Reject parameters the template cannot be expanded with
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name)?;
        if self.git_server.trim().is_empty() {
            return Err(ScaffoldError::InvalidParameter {
                field: "git_server",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Importable package identifier for this project
    pub fn package_name(&self) -> String {
        derive_package_identifier(&self.project_name)
    }

    /// Variables handed to the template engine
    pub fn to_context(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("project_name", self.project_name.clone()),
            ("package_name", self.package_name()),
            ("project_description", self.project_description.clone()),
            ("author", self.author.clone()),
            ("author_email", self.author_email.clone()),
            ("author_username", self.author_username.clone()),
            ("project_type", self.project_type.to_string()),
            ("mkdocs", self.mkdocs.to_string()),
            ("github_actions", self.github_actions.to_string()),
            ("codecov", self.codecov.to_string()),
            ("git_repo", self.git_repo.to_string()),
            ("private_repo", self.private_repo.to_string()),
            ("git_server", self.git_server.clone()),
        ])
    }
}

/// Parameter values given explicitly, e.g. as command-line flags.
///
/// Unset fields leave the underlying [`ParameterSet`] untouched, so a
/// parameter file or the template defaults fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct ParameterOverrides {
    /// Project name (letters, digits and hyphens; starts with a letter)
    #[arg(long)]
    pub project_name: Option<String>,

    /// One-line project description
    #[arg(long)]
    pub project_description: Option<String>,

    /// Author name used for the initial commit
    #[arg(long)]
    pub author: Option<String>,

    /// Author email; empty leaves git's user.email unset
    #[arg(long)]
    pub author_email: Option<String>,

    /// Account that owns the remote repository
    #[arg(long)]
    pub author_username: Option<String>,

    #[arg(long, value_enum)]
    pub project_type: Option<ProjectType>,

    /// Include MkDocs documentation
    #[arg(long, value_name = "y|n")]
    pub mkdocs: Option<Flag>,

    /// Include GitHub Actions workflows
    #[arg(long, value_name = "y|n")]
    pub github_actions: Option<Flag>,

    /// Upload coverage to Codecov from CI
    #[arg(long, value_name = "y|n")]
    pub codecov: Option<Flag>,

    /// Initialise a local git repository
    #[arg(long, value_name = "y|n")]
    pub git_repo: Option<Flag>,

    /// Default visibility of the remote repository
    #[arg(long, value_name = "y|n")]
    pub private_repo: Option<Flag>,

    /// Hosting server for the remote repository
    #[arg(long)]
    pub git_server: Option<String>,
}

impl ParameterOverrides {
    /// Write every set field into `params`
    pub fn apply(&self, params: &mut ParameterSet) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut params.project_name, &self.project_name);
        set(&mut params.project_description, &self.project_description);
        set(&mut params.author, &self.author);
        set(&mut params.author_email, &self.author_email);
        set(&mut params.author_username, &self.author_username);
        set(&mut params.project_type, &self.project_type);
        set(&mut params.mkdocs, &self.mkdocs);
        set(&mut params.github_actions, &self.github_actions);
        set(&mut params.codecov, &self.codecov);
        set(&mut params.git_repo, &self.git_repo);
        set(&mut params.private_repo, &self.private_repo);
        set(&mut params.git_server, &self.git_server);
    }
}

/// Lower-case the name and turn every hyphen into an underscore.
///
/// Nothing else changes, so the result is a valid Python identifier whenever
/// the name passed [`validate_project_name`].
pub fn derive_package_identifier(project_name: &str) -> String {
    project_name.to_lowercase().replace('-', "_")
}

/// Project names must start with a letter and contain only letters, digits and hyphens
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |reason| ScaffoldError::InvalidProjectName {
        name: name.to_string(),
        reason,
    };

    let first = name.chars().next().ok_or_else(|| invalid("must not be empty"))?;
    if first == '_' {
        return Err(invalid("must not start with an underscore"));
    }
    if first.is_ascii_digit() {
        return Err(invalid("must not start with a number"));
    }
    if !first.is_ascii_alphabetic() {
        return Err(invalid("must start with a letter"));
    }
    if name.contains('_') {
        return Err(invalid("use hyphens instead of underscores"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid("may only contain letters, digits and hyphens"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_package_identifier() {
        assert_eq!(derive_package_identifier("my-project"), "my_project");
        assert_eq!(derive_package_identifier("my-cool-app"), "my_cool_app");
        assert_eq!(derive_package_identifier("test-123"), "test_123");
        assert_eq!(derive_package_identifier("a-b-c-d"), "a_b_c_d");
        assert_eq!(derive_package_identifier("My-Project"), "my_project");
        assert_eq!(derive_package_identifier("a--b"), "a__b");
    }

    #[test]
    fn test_derive_package_identifier_is_idempotent() {
        for name in ["my-cool-app", "Data-Tools-2", "plain"] {
            let once = derive_package_identifier(name);
            assert_eq!(derive_package_identifier(&once), once);
        }
    }

    #[test]
    fn test_invalid_project_names() {
        for (name, reason) in [
            ("_invalid", "underscore"),
            ("invalid_name", "underscores"),
            ("123invalid", "number"),
            ("", "empty"),
            ("-leading", "letter"),
            ("has space", "letters, digits"),
        ] {
            let err = validate_project_name(name).unwrap_err();
            assert!(
                err.to_string().contains(reason),
                "{} should be rejected for '{}', got: {}",
                name,
                reason,
                err
            );
        }
    }

    #[test]
    fn test_valid_project_names() {
        for name in ["my-project", "a", "Tool2", "a-b-c-d"] {
            assert!(validate_project_name(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_project_type_parsing() {
        assert_eq!("CLI".parse::<ProjectType>().unwrap(), ProjectType::Cli);
        assert_eq!(
            " notebooks ".parse::<ProjectType>().unwrap(),
            ProjectType::Notebooks
        );
        assert!("webapp".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!("y".parse::<Flag>().unwrap(), Flag::Yes);
        assert_eq!("No".parse::<Flag>().unwrap(), Flag::No);
        assert!("maybe".parse::<Flag>().is_err());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let params: ParameterSet = serde_yaml::from_str(
            "project_name: data-lab\nproject_type: notebooks\nmkdocs: n\ngit_repo: false\n",
        )
        .unwrap();

        assert_eq!(params.project_name, "data-lab");
        assert_eq!(params.project_type, ProjectType::Notebooks);
        assert_eq!(params.mkdocs, Flag::No);
        assert_eq!(params.git_repo, Flag::No);
        // Untouched keys keep template defaults
        assert_eq!(params.github_actions, Flag::Yes);
        assert_eq!(params.git_server, "github.com");
    }

    #[test]
    fn test_context_contains_package_name() {
        let params = ParameterSet {
            project_name: "my-cool-app".to_string(),
            codecov: Flag::No,
            ..Default::default()
        };
        let ctx = params.to_context();
        assert_eq!(ctx["package_name"], "my_cool_app");
        assert_eq!(ctx["codecov"], "n");
        assert_eq!(ctx["project_type"], "package");
    }

    #[test]
    fn test_validate_rejects_empty_server() {
        let params = ParameterSet {
            git_server: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ScaffoldError::InvalidParameter { field: "git_server", .. })
        ));
    }

    #[test]
    fn test_overrides_only_replace_set_fields() {
        let mut params = ParameterSet {
            author: "From File".to_string(),
            ..Default::default()
        };
        let overrides = ParameterOverrides {
            project_name: Some("data-lab".to_string()),
            project_type: Some(ProjectType::Notebooks),
            codecov: Some(Flag::No),
            ..Default::default()
        };

        overrides.apply(&mut params);

        assert_eq!(params.project_name, "data-lab");
        assert_eq!(params.project_type, ProjectType::Notebooks);
        assert_eq!(params.codecov, Flag::No);
        assert_eq!(params.author, "From File");
        assert_eq!(params.mkdocs, Flag::Yes);
    }
}

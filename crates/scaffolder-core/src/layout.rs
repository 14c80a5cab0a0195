//! Conditional file-set selection for an expanded project tree
//!
//! Template expansion always produces every optional file. Pruning removes
//! what the chosen project type and feature toggles do not need, driven by a
//! single dispatch table so each project type's file set is declared once.

use crate::error::{Result, ScaffoldError};
use crate::params::{ParameterSet, ProjectType};
use std::io;
use std::path::{Path, PathBuf};

/// Path of a removable entry relative to the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Relative to the project root
    Root(&'static str),
    /// Relative to the package directory named by the derived identifier
    Package(&'static str),
}

impl Target {
    pub fn resolve(&self, project_root: &Path, package_name: &str) -> PathBuf {
        match self {
            Target::Root(rel) => project_root.join(rel),
            Target::Package(rel) => project_root.join(package_name).join(rel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// Whether a missing entry is an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The template always ships this entry for the project type
    Required,
    /// Missing means already satisfied
    IfPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    pub target: Target,
    pub kind: EntryKind,
    pub presence: Presence,
}

const fn file(target: Target) -> Removal {
    Removal {
        target,
        kind: EntryKind::File,
        presence: Presence::IfPresent,
    }
}

const fn optional_dir(target: Target) -> Removal {
    Removal {
        target,
        kind: EntryKind::Dir,
        presence: Presence::IfPresent,
    }
}

const fn required_dir(target: Target) -> Removal {
    Removal {
        target,
        kind: EntryKind::Dir,
        presence: Presence::Required,
    }
}

const DOCS_REMOVALS: &[Removal] = &[
    optional_dir(Target::Root("docs")),
    file(Target::Root("mkdocs.yml")),
];

const CI_REMOVALS: &[Removal] = &[optional_dir(Target::Root(".github"))];

const PACKAGE_REMOVALS: &[Removal] = &[
    file(Target::Package("cli.py")),
    required_dir(Target::Root("notebooks")),
    required_dir(Target::Root("data")),
];

const CLI_REMOVALS: &[Removal] = &[
    file(Target::Package("example.py")),
    required_dir(Target::Root("notebooks")),
    required_dir(Target::Root("data")),
];

const NOTEBOOKS_REMOVALS: &[Removal] = &[
    file(Target::Package("example.py")),
    file(Target::Package("cli.py")),
];

/// Entries that do not belong to the given project type
pub fn project_type_removals(project_type: ProjectType) -> &'static [Removal] {
    match project_type {
        ProjectType::Package => PACKAGE_REMOVALS,
        ProjectType::Cli => CLI_REMOVALS,
        ProjectType::Notebooks => NOTEBOOKS_REMOVALS,
    }
}

/// Every removal the parameters call for; the groups never overlap
pub fn removals_for(params: &ParameterSet) -> Vec<Removal> {
    let mut removals = Vec::new();
    if !params.mkdocs.is_yes() {
        removals.extend_from_slice(DOCS_REMOVALS);
    }
    if !params.github_actions.is_yes() {
        removals.extend_from_slice(CI_REMOVALS);
    }
    removals.extend_from_slice(project_type_removals(params.project_type));
    removals
}

/// Remove template-conditional paths that do not apply to `params`.
///
/// Returns the paths actually removed. A missing [`Presence::Required`]
/// directory means the template and this table disagree and aborts the run.
pub fn prune(project_root: &Path, params: &ParameterSet) -> Result<Vec<PathBuf>> {
    let package_name = params.package_name();
    let mut removed = Vec::new();

    for removal in removals_for(params) {
        let path = removal.target.resolve(project_root, &package_name);
        if apply(&removal, &path)? {
            tracing::debug!(path = %path.display(), "pruned");
            removed.push(path);
        }
    }

    Ok(removed)
}

fn apply(removal: &Removal, path: &Path) -> Result<bool> {
    let outcome = match removal.kind {
        EntryKind::File => std::fs::remove_file(path),
        EntryKind::Dir => std::fs::remove_dir_all(path),
    };

    match outcome {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match removal.presence {
            Presence::Required => Err(ScaffoldError::MissingTemplatePath(path.to_path_buf())),
            Presence::IfPresent => Ok(false),
        },
        Err(source) => Err(ScaffoldError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

//! User-facing help and end-of-run messages

use crate::params::{ParameterSet, ProjectType};
use crate::runtime::tool::{remote_url, DEFAULT_BRANCH, INITIAL_COMMIT_MESSAGE};

/// How to create the local repository by hand
pub fn local_repo_help(params: &ParameterSet) -> String {
    format!(
        "You can create a git repository later by creating an empty repository named {name} on {server}\n\
         and running the following commands\n\
         \n\
         >> cd {name}\n\
         >> git init -b {branch}\n\
         >> git add .\n\
         >> git commit -m \"{message}\"",
        name = params.project_name,
        server = params.git_server,
        branch = DEFAULT_BRANCH,
        message = INITIAL_COMMIT_MESSAGE,
    )
}

/// How to create and link the remote repository by hand
pub fn remote_repo_help(params: &ParameterSet) -> String {
    format!(
        "You can set up a remote git repository on {server} later by:\n\
         \n\
         1. Creating an empty repository named {name} on {server}\n\
         2. Then running the following commands:\n\
         \n\
         >> cd {name}\n\
         >> git remote add origin {url}\n\
         >> git branch -M {branch}\n\
         >> git push -u origin {branch}\n\
         \n\
         Note: This works with SSH authentication (no tokens needed if you have SSH keys set up).",
        name = params.project_name,
        server = params.git_server,
        url = remote_url(
            &params.git_server,
            &params.author_username,
            &params.project_name,
            true
        ),
        branch = DEFAULT_BRANCH,
    )
}

/// Remediation after a failed push over SSH
pub fn ssh_push_help(params: &ParameterSet) -> String {
    format!(
        "SSH push failed, you may need to:\n\
         1. Add your SSH key to your {server} account\n\
         2. Or run: git remote set-url origin {https}\n\
         3. Then manually push: git push -u origin {branch}",
        server = params.git_server,
        https = remote_url(
            &params.git_server,
            &params.author_username,
            &params.project_name,
            false
        ),
        branch = DEFAULT_BRANCH,
    )
}

pub fn completion(params: &ParameterSet) -> String {
    format!("The project {} has been created!", params.project_name)
}

/// Next steps for the generated project, one variant per project type
pub fn end_message(project_type: ProjectType, project_name: &str) -> String {
    match project_type {
        ProjectType::Package => format!(
            "Next steps:\n\
             \x20 • cd {}\n\
             \x20 • make test          # Run your tests\n\
             \x20 • make check         # Run code quality checks\n\
             \n\
             Have fun building your package!",
            project_name
        ),
        ProjectType::Cli => format!(
            "Next steps:\n\
             \x20 • cd {}\n\
             \x20 • make run           # Run your CLI app\n\
             \x20 • make test          # Run your tests\n\
             \n\
             Have fun building your CLI!",
            project_name
        ),
        ProjectType::Notebooks => format!(
            "Next steps:\n\
             \x20 • cd {}\n\
             \x20 • make jupyter       # Launch JupyterLab\n\
             \x20 • make test-notebooks # Test that notebooks execute\n\
             \n\
             Sample notebooks are in notebooks/:\n\
             \x20 • 01-exploratory.ipynb - Data exploration\n\
             \x20 • 02-visualization.ipynb - Plotting examples\n\
             \n\
             Have fun with your data science project!",
            project_name
        ),
    }
}

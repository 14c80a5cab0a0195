//! Template expansion into a new project tree
//!
//! Path components and UTF-8 file contents are rendered with tera using the
//! parameter context. The output always contains every optional file; the
//! layout module prunes it afterwards.

use super::manifest::TemplateManifest;
use crate::error::{Result, ScaffoldError};
use crate::params::ParameterSet;
use anyhow::Context as _;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

/// Result of expanding a template
#[derive(Debug, Clone)]
pub struct Expansion {
    pub project_root: PathBuf,
    /// Written files, relative to the project root
    pub files: Vec<PathBuf>,
}

fn tera_context(params: &ParameterSet) -> Context {
    let mut ctx = Context::new();
    for (key, value) in params.to_context() {
        ctx.insert(key, &value);
    }
    ctx
}

fn has_markup(text: &str) -> bool {
    text.contains("{{") || text.contains("{%")
}

fn render_text(text: &str, ctx: &Context) -> tera::Result<String> {
    if has_markup(text) {
        Tera::one_off(text, ctx, false)
    } else {
        Ok(text.to_string())
    }
}

/// Render a relative template path component by component
fn render_path(rel: &Path, ctx: &Context) -> anyhow::Result<PathBuf> {
    let mut rendered = PathBuf::new();
    for component in rel.components() {
        let name = component.as_os_str().to_string_lossy();
        let name = render_text(&name, ctx)
            .with_context(|| format!("Failed to render path {}", rel.display()))?;
        rendered.push(name);
    }
    Ok(rendered)
}

/// Expand `template_dir` into `output_dir/<rendered root>`.
///
/// Fails with [`ScaffoldError::OutputExists`] when the project directory is
/// already present and `overwrite` is false.
pub fn expand(
    template_dir: &Path,
    manifest: &TemplateManifest,
    params: &ParameterSet,
    output_dir: &Path,
    overwrite: bool,
) -> Result<Expansion> {
    let ctx = tera_context(params);
    let tree_root = template_dir.join(&manifest.root);
    if !tree_root.is_dir() {
        return Err(ScaffoldError::MissingTemplatePath(tree_root));
    }

    let root_name = render_text(&manifest.root, &ctx)
        .with_context(|| format!("Failed to render template root '{}'", manifest.root))?;
    let project_root = output_dir.join(root_name);
    if project_root.exists() && !overwrite {
        return Err(ScaffoldError::OutputExists(project_root));
    }
    fs::create_dir_all(&project_root)
        .with_context(|| format!("Failed to create {}", project_root.display()))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&tree_root).min_depth(1).sort_by_file_name() {
        let entry = entry.context("Failed to walk template tree")?;
        let rel = entry
            .path()
            .strip_prefix(&tree_root)
            .context("Template entry outside template root")?;
        let rel_out = render_path(rel, &ctx)?;
        let target = project_root.join(&rel_out);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        let bytes = fs::read(entry.path())
            .with_context(|| format!("Failed to read template file {}", entry.path().display()))?;
        let verbatim = manifest.is_verbatim(&rel.to_string_lossy());
        let content = match String::from_utf8(bytes) {
            Ok(text) if !verbatim => render_text(&text, &ctx)
                .with_context(|| format!("Failed to render {}", rel.display()))?
                .into_bytes(),
            Ok(text) => text.into_bytes(),
            Err(binary) => binary.into_bytes(),
        };

        fs::write(&target, &content)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        let permissions = entry
            .metadata()
            .context("Failed to read template file metadata")?
            .permissions();
        fs::set_permissions(&target, permissions)
            .with_context(|| format!("Failed to set permissions on {}", target.display()))?;

        files.push(rel_out);
    }

    tracing::debug!(
        root = %project_root.display(),
        files = files.len(),
        "template expanded"
    );
    Ok(Expansion {
        project_root,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn manifest() -> TemplateManifest {
        serde_yaml::from_str(
            "name: t\ndescription: d\nversion: 0.1.0\ncopy_without_render: [\"*.raw\"]\n",
        )
        .unwrap()
    }

    fn params() -> ParameterSet {
        ParameterSet {
            project_name: "My-Tool".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_paths_and_contents() {
        let template = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(
            template.path(),
            "{{ project_name }}/{{ package_name }}/__init__.py",
            "\"\"\"{{ project_name }} package.\"\"\"\n",
        );

        let expansion = expand(template.path(), &manifest(), &params(), out.path(), false).unwrap();

        assert_eq!(expansion.project_root, out.path().join("My-Tool"));
        assert_eq!(expansion.files, vec![PathBuf::from("my_tool/__init__.py")]);
        let init = fs::read_to_string(out.path().join("My-Tool/my_tool/__init__.py")).unwrap();
        assert_eq!(init, "\"\"\"My-Tool package.\"\"\"\n");
    }

    #[test]
    fn test_conditional_content() {
        let template = tempfile::tempdir().unwrap();
        write(
            template.path(),
            "{{ project_name }}/ci.yml",
            "steps:\n{% if codecov == \"y\" %}  token: {% raw %}${{ secrets.CODECOV_TOKEN }}{% endraw %}\n{% endif %}",
        );

        for (codecov, expected) in [(true, true), (false, false)] {
            let out = tempfile::tempdir().unwrap();
            let p = ParameterSet {
                codecov: codecov.into(),
                ..params()
            };
            expand(template.path(), &manifest(), &p, out.path(), false).unwrap();
            let ci = fs::read_to_string(out.path().join("My-Tool/ci.yml")).unwrap();
            assert_eq!(ci.contains("${{ secrets.CODECOV_TOKEN }}"), expected);
        }
    }

    #[test]
    fn test_verbatim_and_binary_files_are_copied() {
        let template = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(template.path(), "{{ project_name }}/keep.raw", "{{ not_a_variable }}");
        let binary_path = template.path().join("{{ project_name }}/logo.bin");
        fs::write(&binary_path, [0xff_u8, 0xfe, b'{', b'{']).unwrap();

        expand(template.path(), &manifest(), &params(), out.path(), false).unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("My-Tool/keep.raw")).unwrap(),
            "{{ not_a_variable }}"
        );
        assert_eq!(
            fs::read(out.path().join("My-Tool/logo.bin")).unwrap(),
            vec![0xff, 0xfe, b'{', b'{']
        );
    }

    #[test]
    fn test_existing_project_directory_is_refused() {
        let template = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(template.path(), "{{ project_name }}/README.md", "# {{ project_name }}");
        fs::create_dir(out.path().join("My-Tool")).unwrap();

        let err = expand(template.path(), &manifest(), &params(), out.path(), false).unwrap_err();
        assert!(matches!(err, ScaffoldError::OutputExists(_)));

        expand(template.path(), &manifest(), &params(), out.path(), true).unwrap();
        assert!(out.path().join("My-Tool/README.md").is_file());
    }

    #[test]
    fn test_missing_tree_root_is_reported() {
        let template = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let err = expand(template.path(), &manifest(), &params(), out.path(), false).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingTemplatePath(_)));
    }

    #[test]
    fn test_undefined_variable_fails_with_file_name() {
        let template = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write(template.path(), "{{ project_name }}/bad.txt", "{{ missing_var }}");

        let err = expand(template.path(), &manifest(), &params(), out.path(), false).unwrap_err();
        assert!(format!("{:#}", anyhow::Error::from(err)).contains("bad.txt"));
    }
}

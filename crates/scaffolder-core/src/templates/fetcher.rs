//! Template retrieval from a local directory or a remote zip archive
//!
//! Remote archives are unpacked into a temporary directory that lives as long
//! as the returned [`FetchedTemplate`], so both sources expand the same way.

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;
use zip::ZipArchive;

/// Template source - either remote URL or local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Interpret a user-supplied location: http(s) URLs are remote, anything else a path
    pub fn parse(location: &str) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url =
                Url::parse(location).with_context(|| format!("Invalid template URL: {}", location))?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Local(PathBuf::from(location)))
        }
    }

    /// Product default, overridable through the product's template URL variable
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        match std::env::var(config.template_url_env()) {
            Ok(location) if !location.trim().is_empty() => Self::parse(location.trim()),
            _ => Ok(Self::Local(config.default_template_dir())),
        }
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Remote(url) => write!(f, "{}", url),
            TemplateSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A template ready for expansion
#[derive(Debug)]
pub struct FetchedTemplate {
    dir: PathBuf,
    manifest: TemplateManifest,
    // Keeps an unpacked remote archive alive
    _scratch: Option<TempDir>,
}

impl FetchedTemplate {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }
}

/// Template fetcher - handles retrieving templates from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Resolve the source to a directory with a parsed manifest
    pub async fn fetch(&self) -> Result<FetchedTemplate> {
        match &self.source {
            TemplateSource::Local(path) => {
                if !path.is_dir() {
                    anyhow::bail!("Template directory not found: {}", path.display());
                }
                let manifest = TemplateManifest::load(path)?;
                Ok(FetchedTemplate {
                    dir: path.clone(),
                    manifest,
                    _scratch: None,
                })
            }
            TemplateSource::Remote(url) => {
                tracing::debug!(%url, "downloading template archive");
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch template from {}", url))?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "Failed to fetch template from {}: HTTP {}",
                        url,
                        response.status()
                    );
                }

                let bytes = response.bytes().await?;
                let scratch = tempfile::tempdir().context("Failed to create temporary directory")?;
                let dir = unpack_archive(&bytes, scratch.path())?;
                let manifest = TemplateManifest::load(&dir)?;
                Ok(FetchedTemplate {
                    dir,
                    manifest,
                    _scratch: Some(scratch),
                })
            }
        }
    }
}

/// Extract a zip archive and locate the template root inside it.
///
/// The manifest may sit at the archive root or inside a single top-level
/// directory, as in repository snapshot archives.
pub fn unpack_archive(bytes: &[u8], dest: &Path) -> Result<PathBuf> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Template archive is not a valid zip file")?;
    archive
        .extract(dest)
        .with_context(|| format!("Failed to extract template into {}", dest.display()))?;

    if dest.join(MANIFEST_FILE).is_file() {
        return Ok(dest.to_path_buf());
    }

    let mut top_level = Vec::new();
    for entry in std::fs::read_dir(dest)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            top_level.push(entry.path());
        }
    }

    match top_level.as_slice() {
        [single] if single.join(MANIFEST_FILE).is_file() => Ok(single.clone()),
        _ => anyhow::bail!("Template archive does not contain {}", MANIFEST_FILE),
    }
}

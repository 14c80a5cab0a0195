//! Packing a template directory into the zip archive served to remote users

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Zip `template_dir` in memory, manifest first.
///
/// Entries are stored relative to the template directory, so the archive
/// unpacks with the manifest at its root.
pub fn build_zip(template_dir: &Path) -> Result<Vec<u8>> {
    // Fails early on a directory that is not a template
    TemplateManifest::load(template_dir)?;

    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let manifest_content = std::fs::read(template_dir.join(MANIFEST_FILE))?;
        zip.start_file(MANIFEST_FILE, options)?;
        zip.write_all(&manifest_content)?;

        for entry in WalkDir::new(template_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to walk template directory")?;
            let rel = entry
                .path()
                .strip_prefix(template_dir)
                .context("Template entry outside template directory")?;
            let zip_path = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                zip.add_directory(zip_path.as_str(), options)?;
                continue;
            }
            if zip_path == MANIFEST_FILE || zip_path.ends_with(".zip") {
                continue;
            }

            let content = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            zip.start_file(zip_path.as_str(), options)?;
            zip.write_all(&content)?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

/// Build `<template>.zip` next to the template directory and report it
pub fn write_zip<C: ProductConfig>(config: &C, template_dir: &Option<PathBuf>) -> Result<PathBuf> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| config.default_template_dir());
    if !dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    println!(
        "{}",
        format!("Building {} template zip...", config.display_name())
            .cyan()
            .bold()
    );

    let zip_bytes = build_zip(&dir)?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.name().to_string());
    let zip_path = dir.with_file_name(format!("{}.zip", name));
    std::fs::write(&zip_path, &zip_bytes)
        .with_context(|| format!("Failed to write {}", zip_path.display()))?;

    println!(
        "  {} {} ({} bytes)",
        "->".blue(),
        zip_path.display(),
        zip_bytes.len()
    );
    Ok(zip_path)
}

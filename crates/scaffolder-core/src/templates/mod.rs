//! Template retrieval and expansion
//!
//! This module provides:
//! - The template manifest (`template.yaml`) and CLI compatibility check
//! - Template fetching from a local directory or a remote zip archive
//! - Expansion of the template tree through tera
//! - Packing a template into the zip archive remote users download

pub mod archive;
pub mod fetcher;
pub mod manifest;
pub mod render;

pub use archive::{build_zip, write_zip};
pub use fetcher::{unpack_archive, FetchedTemplate, TemplateFetcher, TemplateSource};
pub use manifest::{TemplateManifest, MANIFEST_FILE};
pub use render::{expand, Expansion};

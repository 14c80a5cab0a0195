//! Product configuration trait for CLI binaries
//!
//! A product binary implements this trait to tell the shared front-end who it
//! is and where its template lives.

use std::path::PathBuf;

/// Configuration trait for scaffolding products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template directory used when no source is given
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable naming an alternative template location
    fn template_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

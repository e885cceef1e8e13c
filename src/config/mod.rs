//! Emitter configuration, usually read from an `emit.toml` file.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site metadata (title, base url, language)        |
//! | `[amp]`     | AMP page generation                              |
//! | `[index]`   | Search index, site index and page list           |
//! | `[build]`   | Output directory, minification                   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Alice's Notes"
//! url = "notes.alice.dev"
//! language = "en-US"
//!
//! [amp]
//! enable = true
//!
//! [index]
//! max_entries = 1000
//!
//! [build]
//! output = "public"
//! minify = false
//! ```
//!
//! The config is validated and normalized once, at the pipeline boundary
//! (`pipeline::emit_site`). Generators only read it.

mod amp;
mod base;
mod build;
pub mod defaults;
mod error;
mod index;

pub use amp::AmpConfig;
pub use base::BaseConfig;
pub use build::BuildConfig;
pub use error::ConfigError;
pub use index::IndexConfig;

use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing `emit.toml`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path of the file this config was loaded from (empty when built in code)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// AMP page settings
    #[serde(default)]
    pub amp: AmpConfig,

    /// Index artifact settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Output settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Toml(PathBuf::new(), err))
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config: SiteConfig =
            toml::from_str(&content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Trim surrounding whitespace and trailing slashes from `[base.url]`.
    pub fn normalize(&mut self) {
        let url = self.base.url.trim().trim_end_matches('/');
        self.base.url = url.to_owned();
    }

    /// Validate configuration before any artifact is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base.url.trim();

        if url.is_empty() {
            return Err(self.invalid("base.url", "must not be empty".into()));
        }
        if url.contains("://") {
            return Err(self.invalid(
                "base.url",
                format!("must not include a scheme, got `{url}` (use e.g. `example.com`)"),
            ));
        }
        if url.chars().any(char::is_whitespace) {
            return Err(self.invalid("base.url", "must not contain whitespace".into()));
        }

        Ok(())
    }

    fn invalid(&self, field: &'static str, reason: String) -> ConfigError {
        ConfigError::Validation {
            path: self.config_path.clone(),
            field,
            reason,
        }
    }

    /// Base url without scheme, as configured.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base.url
    }

    /// Absolute site root: `https://{base_url}`.
    pub fn site_url(&self) -> String {
        format!("https://{}", self.base_url())
    }

    /// Canonical absolute URL of a page: `https://{base_url}/{slug}`.
    pub fn page_url(&self, slug: &str) -> String {
        format!("https://{}/{slug}", self.base_url())
    }

    /// Absolute URL of a page's AMP variant.
    pub fn amp_url(&self, slug: &str) -> String {
        format!("{}/amp", self.page_url(slug))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! `[build]` section configuration.
//!
//! Output location and minification.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section - where artifacts land and how they are encoded.
///
/// # Example
/// ```toml
/// [build]
/// output = "public"   # FsSink root
/// minify = true       # minify amp html, compact json
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Output directory used by `FsSink`.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify AMP pages and write compact JSON.
    pub minify: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.minify);
    }

    #[test]
    fn test_build_config_custom() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            output = "dist"
            minify = true
        "#,
        )
        .unwrap();

        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
    }
}

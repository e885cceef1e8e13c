//! `[base]` section configuration.
//!
//! Site identity shared by every emitted artifact: title, base url, locale.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Alice's Notes"
/// url = "notes.alice.dev"
/// language = "en-US"
/// description = "Digital notes and knowledge base"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title (`pageTitle`), used as AMP title fallback and JSON-LD author.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Host plus optional path, without scheme (e.g. `example.com/blog`).
    ///
    /// Every absolute URL is built as `https://{url}/{slug}`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,

    /// BCP 47 language code, written to `<html lang>` and the site index.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Site description for the site index.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Alice's Notes"
            url = "notes.alice.dev"
            language = "de-DE"
            description = "Garden"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Alice's Notes");
        assert_eq!(config.base.url, "notes.alice.dev");
        assert_eq!(config.base.language, "de-DE");
        assert_eq!(config.base.description, "Garden");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "Notes");
        assert_eq!(config.base.url, "example.com");
        assert_eq!(config.base.language, "en-US");
        assert_eq!(config.base.description, "Digital notes and knowledge base");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_base_config_unicode() {
        let config = r#"
            [base]
            title = "笔记 🚀"
            language = "zh-Hans"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "笔记 🚀");
        assert_eq!(config.base.language, "zh-Hans");
    }
}

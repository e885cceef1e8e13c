//! `[index]` section configuration.
//!
//! Toggles and limits for the machine-readable artifacts.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[index]` section - search index, site index and page list.
///
/// # Example
/// ```toml
/// [index]
/// search = true
/// site = true
/// pages = true
/// max_entries = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Emit `search-index.json`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub search: bool,

    /// Emit `site-index.json`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub site: bool,

    /// Emit `pages.txt`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pages: bool,

    /// Upper bound on search index entries. Extra documents are dropped silently.
    #[serde(default = "defaults::index::max_entries")]
    #[educe(Default = defaults::index::max_entries())]
    pub max_entries: usize,
}

//! `[amp]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[amp]` section - accelerated mobile page variants.
///
/// # Example
/// ```toml
/// [amp]
/// enable = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct AmpConfig {
    /// Emit `<slug>/amp` pages.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

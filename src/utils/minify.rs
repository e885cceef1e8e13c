//! Minification for emitted artifacts.
//!
//! HTML goes through the `minify_html` crate; JSON is either pretty-printed
//! or compact. Both are switched by `[build].minify`.

use crate::config::SiteConfig;
use serde::Serialize;
use std::borrow::Cow;

// ============================================================================
// HTML
// ============================================================================

/// Minify HTML if enabled in config.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

// ============================================================================
// JSON
// ============================================================================

/// Serialize to JSON: compact when minifying, 2-space indented otherwise.
pub fn to_json<T: Serialize>(value: &T, config: &SiteConfig) -> serde_json::Result<String> {
    if config.build.minify {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

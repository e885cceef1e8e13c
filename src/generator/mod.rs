//! Artifact generators.
//!
//! Every generator is a pure function of `(EmitContext, &[Document])`. They
//! share no state and can run in any order or at the same time.
//!
//! ```text
//!                      &[Document] + EmitContext
//!                                 │
//!        ┌──────────────┬─────────┴─────┬────────────────┐
//!        ▼              ▼               ▼                ▼
//!   amp::page      search.rs         site.rs          pages.rs
//!  <slug>/amp.html search-index.json site-index.json  pages.txt
//! ```

pub mod pages;
pub mod search;
pub mod site;

use crate::{
    config::SiteConfig,
    content::Document,
    filter::{self, SlugFilter},
};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// ============================================================================
// Constants
// ============================================================================

pub const SEARCH_INDEX_SLUG: &str = "search-index";
pub const SITE_INDEX_SLUG: &str = "site-index";
pub const PAGES_SLUG: &str = "pages";

pub const HTML_EXT: &str = ".html";
pub const JSON_EXT: &str = ".json";
pub const TEXT_EXT: &str = ".txt";

// ============================================================================
// Artifact
// ============================================================================

/// One named output, handed to a [`Sink`](crate::sink::Sink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output slug without extension (`notes/rust/amp`, `search-index`).
    pub slug: String,
    /// Extension including the dot (`.html`).
    pub ext: &'static str,
    pub content: Vec<u8>,
}

impl Artifact {
    pub fn new(slug: impl Into<String>, ext: &'static str, content: impl Into<Vec<u8>>) -> Self {
        Self {
            slug: slug.into(),
            ext,
            content: content.into(),
        }
    }

    /// `slug + ext`, for logging.
    pub fn name(&self) -> String {
        format!("{}{}", self.slug, self.ext)
    }

    /// Content as UTF-8 text.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

// ============================================================================
// Emit Context
// ============================================================================

/// Build-scoped inputs shared by all generators.
///
/// `now` is taken once per build, so `generated` fields and date fallbacks
/// agree across artifacts.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub config: &'a SiteConfig,
    pub filter: SlugFilter,
    pub now: DateTime<Utc>,
}

impl<'a> EmitContext<'a> {
    /// Context stamped with the current time and the default eligibility rules.
    pub fn new(config: &'a SiteConfig) -> Self {
        Self::at(config, Utc::now())
    }

    /// Context with a fixed build timestamp.
    pub fn at(config: &'a SiteConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            filter: filter::is_eligible,
            now,
        }
    }

    /// Replace the eligibility predicate for every generator at once.
    pub fn with_filter(mut self, filter: SlugFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Documents that take part in this build's artifacts.
    #[inline]
    pub fn eligible<'d>(
        &self,
        documents: &'d [Document],
    ) -> impl Iterator<Item = &'d Document> + use<'d> {
        filter::eligible(documents, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_artifact_name_and_text() {
        let artifact = Artifact::new("notes/rust/amp", HTML_EXT, "<p>ok</p>");
        assert_eq!(artifact.name(), "notes/rust/amp.html");
        assert_eq!(artifact.text(), "<p>ok</p>");
    }

    #[test]
    fn test_context_filter_is_shared() {
        let config = SiteConfig::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let docs: Vec<Document> = ["a", "tags/a", "b"]
            .into_iter()
            .map(|slug| Document {
                slug: slug.into(),
                ..Default::default()
            })
            .collect();

        let ctx = EmitContext::at(&config, now);
        assert_eq!(ctx.eligible(&docs).count(), 2);

        let only_a = ctx.with_filter(|slug| slug == "a");
        assert_eq!(only_a.eligible(&docs).count(), 1);
        assert_eq!(only_a.now, now);
    }
}

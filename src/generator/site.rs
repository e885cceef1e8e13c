//! Site index generation.
//!
//! Produces `site-index.json`: every eligible page as a [`SiteRecord`], plus
//! a recency-ordered subset, a tag grouping and summary stats.
//!
//! # Format
//!
//! ```json
//! {
//!   "site": { "name": "...", "url": "https://example.com", "description": "...", "language": "en-US" },
//!   "generated": "2025-01-01T00:00:00.000Z",
//!   "stats": { "totalPages": 2, "totalTags": 1, "lastUpdated": 1717200000000 },
//!   "categories": {
//!     "all": [ ... ],
//!     "recent": [ ... ],
//!     "byTags": { "rust": [ ... ] }
//!   }
//! }
//! ```
//!
//! `ampUrl` is always derived from the page url. It is not checked against
//! the AMP generator's output; `pipeline::emit_site` warns when AMP is off.

use super::{Artifact, EmitContext, JSON_EXT, SITE_INDEX_SLUG};
use crate::{
    content::Document,
    error::EmitError,
    utils::{
        date::{serialize_iso, serialize_millis_opt, to_iso},
        minify::to_json,
    },
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Length of the `recent` category.
pub const RECENT_LIMIT: usize = 50;

/// Tag name → records carrying that tag, in document order.
pub type TagGroups = BTreeMap<String, Vec<SiteRecord>>;

// ============================================================================
// Public API
// ============================================================================

/// Build `site-index.json`.
pub fn build_site_index(ctx: &EmitContext<'_>, documents: &[Document]) -> Result<Artifact, EmitError> {
    let index = SiteIndex::from_documents(ctx, documents);
    let json = to_json(&index, ctx.config).map_err(|source| EmitError::Serialize {
        artifact: SITE_INDEX_SLUG,
        source,
    })?;
    Ok(Artifact::new(SITE_INDEX_SLUG, JSON_EXT, json))
}

// ============================================================================
// Types
// ============================================================================

/// Top-level site index document.
#[derive(Debug, Serialize)]
pub struct SiteIndex<'a> {
    pub site: SiteInfo<'a>,
    pub generated: String,
    pub stats: SiteStats,
    pub categories: Categories,
}

/// Site identity block.
#[derive(Debug, Serialize)]
pub struct SiteInfo<'a> {
    pub name: &'a str,
    pub url: String,
    pub description: &'a str,
    pub language: &'a str,
}

/// Aggregate counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_pages: usize,
    pub total_tags: usize,
    /// Newest `lastModified` as epoch milliseconds; `null` when there are no pages.
    #[serde(serialize_with = "serialize_millis_opt")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Page groupings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub all: Vec<SiteRecord>,
    pub recent: Vec<SiteRecord>,
    pub by_tags: TagGroups,
}

/// Per-document site record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "serialize_iso")]
    pub last_modified: DateTime<Utc>,
    pub tags: Vec<String>,
    pub amp_url: String,
}

// ============================================================================
// SiteIndex Implementation
// ============================================================================

impl<'a> SiteIndex<'a> {
    pub fn from_documents(ctx: &EmitContext<'a>, documents: &[Document]) -> Self {
        let config = ctx.config;
        let all: Vec<_> = ctx
            .eligible(documents)
            .map(|doc| SiteRecord::from_document(ctx, doc))
            .collect();

        let recent = recent_records(&all, RECENT_LIMIT);
        let by_tags = group_by_tags(&all);

        let stats = SiteStats {
            total_pages: all.len(),
            total_tags: by_tags.len(),
            last_updated: all.iter().map(|r| r.last_modified).max(),
        };

        Self {
            site: SiteInfo {
                name: &config.base.title,
                url: config.site_url(),
                description: &config.base.description,
                language: &config.base.language,
            },
            generated: to_iso(&ctx.now),
            stats,
            categories: Categories {
                all,
                recent,
                by_tags,
            },
        }
    }
}

impl SiteRecord {
    fn from_document(ctx: &EmitContext<'_>, doc: &Document) -> Self {
        Self {
            url: ctx.config.page_url(&doc.slug),
            title: doc.title_or_slug().to_owned(),
            description: doc.description_or_empty().to_owned(),
            last_modified: doc.modified().unwrap_or(ctx.now),
            tags: doc.unique_tags(),
            amp_url: ctx.config.amp_url(&doc.slug),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Newest first, at most `limit` records.
///
/// `sort_by` is stable, so equal timestamps keep document order.
fn recent_records(records: &[SiteRecord], limit: usize) -> Vec<SiteRecord> {
    let mut recent = records.to_vec();
    recent.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    recent.truncate(limit);
    recent
}

/// Append each record to the bucket of every tag it carries.
fn group_by_tags(records: &[SiteRecord]) -> TagGroups {
    let mut groups = TagGroups::new();
    for record in records {
        for tag in &record.tags {
            groups.entry(tag.clone()).or_default().push(record.clone());
        }
    }
    groups
}

// ============================================================================
// Tests
// ============================================================================

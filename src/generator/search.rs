//! Search index generation.
//!
//! Produces `search-index.json`, a compact record per eligible document for
//! client-side search.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "generated": "2025-01-01T00:00:00.000Z",
//!   "baseUrl": "example.com",
//!   "totalPages": 1,
//!   "pages": [
//!     {
//!       "id": "notes/rust",
//!       "url": "/notes/rust",
//!       "title": "Rust",
//!       "content": "plain text ...",
//!       "description": "",
//!       "tags": ["lang"],
//!       "date": "2024-06-01T00:00:00.000Z",
//!       "wordCount": 412,
//!       "readingTime": 3
//!     }
//!   ]
//! }
//! ```

use super::{Artifact, EmitContext, JSON_EXT, SEARCH_INDEX_SLUG};
use crate::{
    content::Document,
    error::EmitError,
    utils::{date::to_iso, minify::to_json},
};
use serde::Serialize;

/// Schema version written to `version`.
pub const SEARCH_INDEX_VERSION: &str = "1.0";

// ============================================================================
// Public API
// ============================================================================

/// Build `search-index.json`.
pub fn build_search_index(
    ctx: &EmitContext<'_>,
    documents: &[Document],
) -> Result<Artifact, EmitError> {
    let index = SearchIndex::from_documents(ctx, documents);
    let json = to_json(&index, ctx.config).map_err(|source| EmitError::Serialize {
        artifact: SEARCH_INDEX_SLUG,
        source,
    })?;
    Ok(Artifact::new(SEARCH_INDEX_SLUG, JSON_EXT, json))
}

// ============================================================================
// SearchIndex Implementation
// ============================================================================

/// Top-level search index document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex<'a> {
    pub version: &'static str,
    pub generated: String,
    pub base_url: &'a str,
    pub total_pages: usize,
    pub pages: Vec<IndexRecord<'a>>,
}

/// Per-document search record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord<'a> {
    pub id: &'a str,
    pub url: String,
    pub title: &'a str,
    pub content: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub date: String,
    pub word_count: usize,
    pub reading_time: usize,
}

impl<'a> SearchIndex<'a> {
    /// Project eligible documents, capped at `[index].max_entries`.
    pub fn from_documents(ctx: &EmitContext<'a>, documents: &'a [Document]) -> Self {
        let pages: Vec<_> = ctx
            .eligible(documents)
            .map(|doc| IndexRecord::from_document(ctx, doc))
            .take(ctx.config.index.max_entries)
            .collect();

        Self {
            version: SEARCH_INDEX_VERSION,
            generated: to_iso(&ctx.now),
            base_url: ctx.config.base_url(),
            total_pages: pages.len(),
            pages,
        }
    }
}

impl<'a> IndexRecord<'a> {
    fn from_document(ctx: &EmitContext<'_>, doc: &'a Document) -> Self {
        Self {
            id: &doc.slug,
            url: format!("/{}", doc.slug),
            title: doc.title_or_slug(),
            content: doc.text.as_deref().unwrap_or_default(),
            description: doc.description_or_empty(),
            tags: doc.tags(),
            date: to_iso(&doc.modified().unwrap_or(ctx.now)),
            word_count: doc.word_count(),
            reading_time: doc.reading_time(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

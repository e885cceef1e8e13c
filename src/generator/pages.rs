//! Page list generation.
//!
//! `pages.txt` lists the canonical URL of every eligible page, one per line,
//! for crawlers that do not read sitemaps.

use super::{Artifact, EmitContext, PAGES_SLUG, TEXT_EXT};
use crate::content::Document;

/// Build `pages.txt`.
pub fn build_page_list(ctx: &EmitContext<'_>, documents: &[Document]) -> Artifact {
    Artifact::new(PAGES_SLUG, TEXT_EXT, page_list(ctx, documents))
}

/// Newline-joined canonical URLs, no trailing newline. Empty input yields `""`.
pub fn page_list(ctx: &EmitContext<'_>, documents: &[Document]) -> String {
    ctx.eligible(documents)
        .map(|doc| ctx.config.page_url(&doc.slug))
        .collect::<Vec<_>>()
        .join("\n")
}

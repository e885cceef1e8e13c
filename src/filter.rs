//! Eligibility of documents for emitted artifacts.
//!
//! One predicate decides which slugs take part in AMP pages, the search index,
//! the site index and the page list. Generators never re-implement it; they
//! receive it through [`EmitContext`](crate::generator::EmitContext), which is
//! what keeps the site index `ampUrl` fields pointing at pages the AMP
//! generator actually considered.
//!
//! # Exclusions
//!
//! | Rule | Example |
//! |------|---------|
//! | ends with `/index` | `notes/index` |
//! | starts with `tags/` | `tags/rust` |
//! | is exactly `404` | `404` |

use crate::content::Document;

/// Slug predicate injected into every generator.
pub type SlugFilter = fn(&str) -> bool;

/// Whether a slug participates in index and AMP generation.
pub fn is_eligible(slug: &str) -> bool {
    !(slug.ends_with("/index") || slug.starts_with("tags/") || slug == "404")
}

/// Documents whose slug passes `filter`, in collection order.
#[inline]
pub fn eligible<'a>(
    documents: &'a [Document],
    filter: SlugFilter,
) -> impl Iterator<Item = &'a Document> + 'a {
    documents.iter().filter(move |doc| filter(&doc.slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_section_indexes() {
        assert!(!is_eligible("notes/index"));
        assert!(!is_eligible("a/b/index"));
    }

    #[test]
    fn test_excludes_tag_pages() {
        assert!(!is_eligible("tags/rust"));
        assert!(!is_eligible("tags/"));
    }

    #[test]
    fn test_excludes_404() {
        assert!(!is_eligible("404"));
    }

    #[test]
    fn test_keeps_content_pages() {
        assert!(is_eligible("hello"));
        assert!(is_eligible("notes/rust"));
        // only the exact forms are excluded
        assert!(is_eligible("index"));
        assert!(is_eligible("notes/indexing"));
        assert!(is_eligible("my-tags/rust"));
        assert!(is_eligible("404-page"));
        assert!(is_eligible("errors/404"));
    }

    #[test]
    fn test_eligible_preserves_order() {
        let docs: Vec<Document> = ["b", "tags/x", "a", "404", "c/index", "c"]
            .into_iter()
            .map(|slug| Document {
                slug: slug.into(),
                ..Default::default()
            })
            .collect();

        let slugs: Vec<_> = eligible(&docs, is_eligible).map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a", "c"]);
    }

    #[test]
    fn test_eligible_uses_injected_filter() {
        let docs = vec![Document {
            slug: "drafts/wip".into(),
            ..Default::default()
        }];
        let no_drafts: SlugFilter = |slug| is_eligible(slug) && !slug.starts_with("drafts/");

        assert_eq!(eligible(&docs, is_eligible).count(), 1);
        assert_eq!(eligible(&docs, no_drafts).count(), 0);
    }
}

//! Documents handed over by the content source.
//!
//! A [`Document`] is one parsed page: its slug, optional frontmatter, the
//! plain-text projection of its body, timestamps, and the parsed markup tree.
//! The emitters only read documents; nothing here is mutated after the
//! content source builds the collection.
//!
//! # Field usage
//!
//! | Field | Used by |
//! |-------|---------|
//! | `slug` | every generator (eligibility, urls) |
//! | `frontmatter.title` | amp head/body, search and site records |
//! | `frontmatter.tags` | amp tag list, records, `byTags` |
//! | `description` | amp head, records |
//! | `text` | amp candidacy, search `content`/`wordCount` |
//! | `dates` | amp date line and JSON-LD, record dates |
//! | `tree` | amp content |

pub mod tree;

pub use tree::{ContentTree, Element, Node};

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Words per minute used for `readingTime`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Structured metadata from the document header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    /// Tags for grouping; order is not significant.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Creation and modification timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dates {
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// One parsed content document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Unique, URL-path-shaped identifier (`notes/rust`, `tags/rust`, `404`).
    pub slug: String,
    /// `None` when the source has no frontmatter block.
    pub frontmatter: Option<Frontmatter>,
    pub description: Option<String>,
    /// Plain-text projection of the body.
    pub text: Option<String>,
    pub dates: Option<Dates>,
    /// Parsed markup of the body.
    pub tree: ContentTree,
}

impl Document {
    /// Frontmatter title, if present and non-empty.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()?
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
    }

    /// Frontmatter title, falling back to the slug.
    #[inline]
    pub fn title_or_slug(&self) -> &str {
        self.title().unwrap_or(&self.slug)
    }

    /// Description, falling back to the empty string.
    #[inline]
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Frontmatter tags (empty without frontmatter).
    #[inline]
    pub fn tags(&self) -> &[String] {
        self.frontmatter
            .as_ref()
            .map(|fm| fm.tags.as_slice())
            .unwrap_or_default()
    }

    /// Tags with repeats removed, first occurrence wins.
    pub fn unique_tags(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.tags().len());
        for tag in self.tags() {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
        seen
    }

    #[inline]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.dates.and_then(|d| d.created)
    }

    #[inline]
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.dates.and_then(|d| d.modified)
    }

    /// Whitespace-delimited token count of the text projection.
    pub fn word_count(&self) -> usize {
        self.text
            .as_deref()
            .map_or(0, |text| text.split_whitespace().count())
    }

    /// Minutes to read at [`WORDS_PER_MINUTE`], rounded up.
    pub fn reading_time(&self) -> usize {
        self.word_count().div_ceil(WORDS_PER_MINUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc_with_text(text: &str) -> Document {
        Document {
            slug: "notes/hello".into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_fallbacks() {
        let mut doc = doc_with_text("x");
        assert_eq!(doc.title(), None);
        assert_eq!(doc.title_or_slug(), "notes/hello");

        doc.frontmatter = Some(Frontmatter {
            title: Some("Hello".into()),
            tags: vec![],
        });
        assert_eq!(doc.title_or_slug(), "Hello");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let mut doc = doc_with_text("x");
        doc.frontmatter = Some(Frontmatter {
            title: Some(String::new()),
            tags: vec![],
        });
        assert_eq!(doc.title(), None);
        assert_eq!(doc.title_or_slug(), "notes/hello");
    }

    #[test]
    fn test_description_fallback() {
        let doc = doc_with_text("x");
        assert_eq!(doc.description_or_empty(), "");
    }

    #[test]
    fn test_word_count_ignores_surrounding_whitespace() {
        assert_eq!(doc_with_text("  one two\n\tthree  ").word_count(), 3);
        assert_eq!(doc_with_text("").word_count(), 0);
        assert_eq!(Document::default().word_count(), 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let words = |n: usize| vec!["word"; n].join(" ");

        assert_eq!(doc_with_text(&words(400)).reading_time(), 2);
        assert_eq!(doc_with_text(&words(401)).reading_time(), 3);
        assert_eq!(doc_with_text(&words(1)).reading_time(), 1);
        assert_eq!(doc_with_text("").reading_time(), 0);
    }

    #[test]
    fn test_unique_tags_keeps_first_occurrence() {
        let doc = Document {
            frontmatter: Some(Frontmatter {
                title: None,
                tags: vec!["b".into(), "a".into(), "b".into()],
            }),
            ..Default::default()
        };
        assert_eq!(doc.unique_tags(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_dates_accessors() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let doc = Document {
            dates: Some(Dates {
                created: None,
                modified: Some(at),
            }),
            ..Default::default()
        };
        assert_eq!(doc.created(), None);
        assert_eq!(doc.modified(), Some(at));
    }

    #[test]
    fn test_frontmatter_deserialize_defaults_tags() {
        let fm: Frontmatter = toml::from_str(r#"title = "T""#).unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert!(fm.tags.is_empty());
    }
}

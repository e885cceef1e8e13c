//! AMP page generation.
//!
//! Every eligible document with frontmatter and a text projection gets a
//! standalone AMP page at `<slug>/amp.html`:
//!
//! ```text
//! <!DOCTYPE html>
//! <html amp="" lang="en-US">
//!   <head>  charset, AMP runtime, title, canonical, viewport, description,
//!           boilerplate styles, page styles, JSON-LD Article
//!   <body>  notice banner, h1, date line, converted content, tags, back link
//! ```
//!
//! Pages are rendered one at a time and independently; a failure for one
//! document does not affect the others.

use super::convert::convert_tree;
use crate::{
    content::Document,
    error::EmitError,
    generator::{Artifact, EmitContext, HTML_EXT},
    utils::{
        date::{to_iso, to_ymd},
        minify::minify_html,
        xml::{
            XmlWriter, create_xml_writer, into_string, write_end, write_raw, write_raw_text_element,
            write_script, write_start, write_text_element, write_void_elem,
        },
    },
};
use quick_xml::events::{BytesText, Event};
use serde::Serialize;
use std::io;

/// AMP runtime, required in every AMP document head.
pub const AMP_RUNTIME: &str = "https://cdn.ampproject.org/v0.js";

const VIEWPORT: &str = "width=device-width,minimum-scale=1,initial-scale=1";
const DEFAULT_DESCRIPTION: &str = "AMP Page";
const UNTITLED: &str = "Untitled";

const BOILERPLATE: &str = "body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-moz-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-ms-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@-webkit-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-moz-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-ms-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-o-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}";
const BOILERPLATE_NOSCRIPT: &str =
    "body{-webkit-animation:none;-moz-animation:none;-ms-animation:none;animation:none}";

const PAGE_CSS: &str = concat!(
    "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;margin:0;padding:20px;line-height:1.6;color:#333}",
    ".container{max-width:800px;margin:0 auto}",
    "h1,h2,h3,h4,h5,h6{color:#2c3e50;margin-top:1.5em;margin-bottom:.5em}",
    "h1{font-size:2em;border-bottom:2px solid #3498db;padding-bottom:10px}",
    "h2{font-size:1.5em}h3{font-size:1.2em}p{margin-bottom:1em}",
    "code{background:#f4f4f4;padding:2px 4px;border-radius:3px;font-family:Monaco,Menlo,'Ubuntu Mono',monospace}",
    "pre{background:#f8f8f8;padding:15px;border-radius:5px;overflow-x:auto}pre code{background:none;padding:0}",
    "blockquote{border-left:4px solid #3498db;margin:0;padding-left:20px;font-style:italic;color:#666}",
    ".meta{color:#666;font-size:.9em;margin-bottom:20px}.tags{margin-top:20px}",
    ".tag{display:inline-block;background:#3498db;color:#fff;padding:2px 8px;border-radius:3px;font-size:.8em;margin-right:5px}",
    ".amp-notice{background:#e8f5e8;padding:10px;border-radius:5px;margin-bottom:20px;font-size:.9em}",
    ".back-link{margin-top:30px;padding-top:20px;border-top:1px solid #eee}",
    ".back-link a{color:#3498db;text-decoration:none}.back-link a:hover{text-decoration:underline}",
    "amp-img{max-width:100%;height:auto}",
);

// ============================================================================
// Public API
// ============================================================================

/// Whether `doc` gets an AMP page in this build.
pub fn is_amp_candidate(ctx: &EmitContext<'_>, doc: &Document) -> bool {
    ctx.config.amp.enable
        && (ctx.filter)(&doc.slug)
        && doc.frontmatter.is_some()
        && doc.text.is_some()
}

/// Lazily render an AMP page per candidate document, in collection order.
pub fn emit_amp_pages<'d>(
    ctx: EmitContext<'d>,
    documents: &'d [Document],
) -> impl Iterator<Item = Result<Artifact, EmitError>> + 'd {
    documents
        .iter()
        .filter(move |doc| is_amp_candidate(&ctx, doc))
        .map(move |doc| render_amp_page(&ctx, doc))
}

/// Render one AMP page to `<slug>/amp.html`.
pub fn render_amp_page(ctx: &EmitContext<'_>, doc: &Document) -> Result<Artifact, EmitError> {
    let html = render_html(ctx, doc).map_err(|source| EmitError::Render {
        slug: doc.slug.clone(),
        source,
    })?;
    let content = minify_html(html.as_bytes(), ctx.config).into_owned();
    Ok(Artifact::new(format!("{}/amp", doc.slug), HTML_EXT, content))
}

// ============================================================================
// Rendering
// ============================================================================

/// Per-page values shared by head and body.
struct PageInfo<'a> {
    title: &'a str,
    description: &'a str,
    canonical_url: String,
    amp_url: String,
}

impl<'a> PageInfo<'a> {
    fn new(ctx: &EmitContext<'a>, doc: &'a Document) -> Self {
        Self {
            title: doc.title().unwrap_or(&ctx.config.base.title),
            description: doc.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
            canonical_url: ctx.config.page_url(&doc.slug),
            amp_url: ctx.config.amp_url(&doc.slug),
        }
    }
}

fn render_html(ctx: &EmitContext<'_>, doc: &Document) -> io::Result<String> {
    let page = PageInfo::new(ctx, doc);
    let mut writer = create_xml_writer(4096 + doc.text.as_ref().map_or(0, String::len));

    write_raw(&mut writer, "<!DOCTYPE html>\n")?;
    write_start(
        &mut writer,
        "html",
        &[("amp", ""), ("lang", &ctx.config.base.language)],
    )?;
    write_head(&mut writer, ctx, doc, &page)?;
    write_body(&mut writer, doc, &page)?;
    write_end(&mut writer, "html")?;

    Ok(into_string(writer))
}

fn write_head(
    writer: &mut XmlWriter,
    ctx: &EmitContext<'_>,
    doc: &Document,
    page: &PageInfo<'_>,
) -> io::Result<()> {
    write_start(writer, "head", &[])?;

    write_void_elem(writer, "meta", &[("charset", "utf-8")])?;
    write_script(writer, AMP_RUNTIME, true)?;
    write_text_element(writer, "title", page.title)?;
    write_void_elem(writer, "link", &[("rel", "canonical"), ("href", &page.canonical_url)])?;
    write_void_elem(writer, "meta", &[("name", "viewport"), ("content", VIEWPORT)])?;
    write_void_elem(
        writer,
        "meta",
        &[("name", "description"), ("content", page.description)],
    )?;

    write_raw_text_element(writer, "style", &[("amp-boilerplate", "")], BOILERPLATE)?;
    write_start(writer, "noscript", &[])?;
    write_raw_text_element(writer, "style", &[("amp-boilerplate", "")], BOILERPLATE_NOSCRIPT)?;
    write_end(writer, "noscript")?;
    write_raw_text_element(writer, "style", &[("amp-custom", "")], PAGE_CSS)?;

    let json_ld = structured_data(ctx, doc, page)?;
    write_raw_text_element(writer, "script", &[("type", "application/ld+json")], &json_ld)?;

    write_end(writer, "head")
}

fn write_body(writer: &mut XmlWriter, doc: &Document, page: &PageInfo<'_>) -> io::Result<()> {
    write_start(writer, "body", &[])?;
    write_start(writer, "div", &[("class", "container")])?;

    write_start(writer, "div", &[("class", "amp-notice")])?;
    writer.write_event(Event::Text(BytesText::new("⚡ This is the AMP version of this page. ")))?;
    write_link(writer, &page.canonical_url, "View full version")?;
    write_end(writer, "div")?;

    write_text_element(writer, "h1", doc.title().unwrap_or(UNTITLED))?;

    if let Some(line) = date_line(doc) {
        write_start(writer, "div", &[("class", "meta")])?;
        writer.write_event(Event::Text(BytesText::new(&line)))?;
        write_end(writer, "div")?;
    }

    write_start(writer, "div", &[])?;
    write_raw(writer, &convert_tree(&doc.tree))?;
    write_end(writer, "div")?;

    let tags = doc.tags();
    if !tags.is_empty() {
        write_start(writer, "div", &[("class", "tags")])?;
        write_text_element(writer, "strong", "Tags: ")?;
        for tag in tags {
            write_start(writer, "span", &[("class", "tag")])?;
            writer.write_event(Event::Text(BytesText::new(tag)))?;
            write_end(writer, "span")?;
        }
        write_end(writer, "div")?;
    }

    write_start(writer, "div", &[("class", "back-link")])?;
    write_link(writer, &page.canonical_url, "← Back to full version")?;
    write_end(writer, "div")?;

    write_end(writer, "div")?;
    write_end(writer, "body")
}

fn write_link(writer: &mut XmlWriter, href: &str, text: &str) -> io::Result<()> {
    write_start(writer, "a", &[("href", href)])?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    write_end(writer, "a")
}

/// `Published: 2024-01-02 | Updated: 2024-03-04`, `None` without dates.
fn date_line(doc: &Document) -> Option<String> {
    let parts: Vec<_> = [
        doc.created().map(|d| format!("Published: {}", to_ymd(&d))),
        doc.modified().map(|d| format!("Updated: {}", to_ymd(&d))),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" | "))
}

// ============================================================================
// Structured data
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Article<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    headline: &'a str,
    description: &'a str,
    url: &'a str,
    main_entity_of_page: &'a str,
    author: Person<'a>,
    publisher: Person<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Person<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

/// Author name derived from the site title: `"Ada's Notes"` → `"Ada"`.
fn author_name(site_title: &str) -> String {
    site_title.replacen("'s Notes", "", 1).replacen(" Notes", "", 1)
}

/// JSON-LD `Article` block, safe to embed in a `<script>` element.
fn structured_data(
    ctx: &EmitContext<'_>,
    doc: &Document,
    page: &PageInfo<'_>,
) -> io::Result<String> {
    let author = author_name(&ctx.config.base.title);
    let person = Person {
        kind: "Person",
        name: &author,
    };
    let article = Article {
        context: "https://schema.org",
        kind: "Article",
        headline: page.title,
        description: page.description,
        url: &page.amp_url,
        main_entity_of_page: &page.canonical_url,
        author: person,
        publisher: person,
        date_published: doc.created().as_ref().map(to_iso),
        date_modified: doc.modified().as_ref().map(to_iso),
    };

    let json = serde_json::to_string(&article)?;
    Ok(json.replace("</", "<\\/"))
}

// ============================================================================
// Tests
// ============================================================================

//! HTML to AMP conversion.
//!
//! Two entry points share [`rules`](super::rules):
//!
//! - [`to_amp_html`] rewrites serialized markup. `<script>` blocks are cut
//!   first, then the markup is streamed through `quick-xml` and rewritten event
//!   by event. Markup the tokenizer rejects goes through [`rewrite_patterns`]
//!   instead, so conversion never fails.
//! - [`convert_tree`] walks an already parsed [`ContentTree`].

use super::rules::{Emitted, IFRAME_SANDBOX, Rewrite, rewrite_element, rewrite_end_tag};
use crate::{
    content::tree::{ContentTree, Node, is_void, push_end_tag, push_escaped_text, push_start_tag},
    log,
    utils::xml::{XmlWriter, build_elem, create_xml_reader, create_xml_writer, into_string},
};
use anyhow::Result;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `<script>` through its end tag, or through end of input when unclosed.
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").unwrap());

// ============================================================================
// String conversion
// ============================================================================

/// Convert an HTML fragment to the AMP dialect.
///
/// The output carries no `<script>`, no `style` or `on*` attributes, no bare
/// `<iframe>`, and every `<img src>` becomes an `<amp-img>`.
pub fn to_amp_html(html: &str) -> String {
    let html = SCRIPT_BLOCK.replace_all(html, "");

    match rewrite_events(&html) {
        Ok(out) => out,
        Err(e) => {
            log!("amp"; "falling back to pattern rewrite: {e}");
            rewrite_patterns(&html)
        }
    }
}

fn rewrite_events(html: &str) -> Result<String> {
    let mut reader = create_xml_reader(html.as_bytes());
    let mut writer = create_xml_writer(html.len());
    // > 0 while inside a removed element
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event()?;

        if skip_depth > 0 {
            match &event {
                Event::Start(elem) if is_script(elem.name().as_ref()) => skip_depth += 1,
                Event::End(elem) if is_script(elem.name().as_ref()) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(elem) => match rewrite_start(&elem) {
                Rewrite::Keep => writer.write_event(Event::Start(elem))?,
                Rewrite::Remove => skip_depth = 1,
                Rewrite::Emit(out) => write_emitted(&mut writer, &out, false)?,
            },
            Event::Empty(elem) => match rewrite_start(&elem) {
                Rewrite::Keep => writer.write_event(Event::Empty(elem))?,
                Rewrite::Remove => {}
                Rewrite::Emit(out) => write_emitted(&mut writer, &out, true)?,
            },
            Event::End(elem) => {
                let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                match rewrite_end_tag(&name) {
                    Some(tag) if tag == name => writer.write_event(Event::End(elem))?,
                    Some(tag) => writer.write_event(Event::End(BytesEnd::new(tag)))?,
                    None => {}
                }
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok(into_string(writer))
}

#[inline]
fn is_script(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script")
}

fn rewrite_start(elem: &BytesStart<'_>) -> Rewrite {
    let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let attrs: Vec<_> = elem
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            // Raw values are re-emitted between double quotes.
            let value = String::from_utf8_lossy(&attr.value).replace('"', "&quot;");
            (key, value)
        })
        .collect();

    rewrite_element(&tag, &attrs)
}

fn write_emitted(writer: &mut XmlWriter, out: &Emitted, self_closing: bool) -> Result<()> {
    writer.write_event(Event::Start(build_elem(&out.tag, &out.attrs)))?;
    if out.closed || (self_closing && !is_void(&out.tag)) {
        writer.write_event(Event::End(BytesEnd::new(out.tag.as_str())))?;
    }
    Ok(())
}

// ============================================================================
// Pattern fallback
// ============================================================================

static IMG_WITH_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b([^>]*?)\ssrc\s*=\s*"([^"]*)"([^>]*?)/?>"#).unwrap()
});
static IMG_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bwidth\s*=\s*"(\d+)""#).unwrap());
static IMG_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bheight\s*=\s*"(\d+)""#).unwrap());
static IMG_ALT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\balt\s*=\s*"([^"]*)""#).unwrap());
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+[\w:-]*style\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});
static IFRAME_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<iframe\b([^>]*?)\s*/?>").unwrap());
static IFRAME_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</iframe\s*>").unwrap());
static SANDBOX_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+sandbox(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*))?"#).unwrap()
});
static HANDLER_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+[\w:-]*?on\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

/// Pattern-based rewrite for markup the tokenizer cannot read.
///
/// Applies the same substitutions as the event path, in order: images,
/// inline styles, scripts, iframes, event handlers.
pub fn rewrite_patterns(html: &str) -> String {
    let out = IMG_WITH_SRC.replace_all(html, |caps: &Captures<'_>| {
        let (before, src, after) = (&caps[1], &caps[2], &caps[3]);
        let find = |re: &Regex, default: &str| {
            re.captures(before)
                .or_else(|| re.captures(after))
                .map_or_else(|| default.to_owned(), |c| c[1].to_owned())
        };
        format!(
            r#"<amp-img src="{src}" width="{}" height="{}" alt="{}" layout="responsive"></amp-img>"#,
            find(&IMG_WIDTH, "800"),
            find(&IMG_HEIGHT, "600"),
            find(&IMG_ALT, ""),
        )
    });
    let out = STYLE_ATTR.replace_all(&out, "");
    let out = SCRIPT_BLOCK.replace_all(&out, "");
    let out = IFRAME_OPEN.replace_all(&out, |caps: &Captures<'_>| {
        let attrs = SANDBOX_ATTR.replace_all(&caps[1], "");
        format!(r#"<amp-iframe{attrs} sandbox="{IFRAME_SANDBOX}">"#)
    });
    let out = IFRAME_CLOSE.replace_all(&out, "</amp-iframe>");
    HANDLER_ATTR.replace_all(&out, "").into_owned()
}

// ============================================================================
// Tree conversion
// ============================================================================

/// Serialize a parsed body tree in the AMP dialect.
pub fn convert_tree(tree: &ContentTree) -> String {
    let mut out = String::new();
    for node in &tree.children {
        convert_node(&mut out, node);
    }
    out
}

fn convert_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => match rewrite_element(&elem.tag, &elem.attrs) {
            Rewrite::Remove => {}
            Rewrite::Keep => write_tree_element(out, &elem.tag, &elem.attrs, &elem.children, false),
            Rewrite::Emit(e) => write_tree_element(out, &e.tag, &e.attrs, &elem.children, e.closed),
        },
        Node::Text(text) => push_escaped_text(out, text),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Raw(html) => out.push_str(&to_amp_html(html)),
    }
}

fn write_tree_element(
    out: &mut String,
    tag: &str,
    attrs: &[(String, String)],
    children: &[Node],
    closed: bool,
) {
    push_start_tag(out, tag, attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if closed {
        push_end_tag(out, tag);
    } else if !is_void(tag) {
        for child in children {
            convert_node(out, child);
        }
        push_end_tag(out, tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tree::Element;

    static FORBIDDEN_ATTR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)style=|on[a-z]+=").unwrap());

    /// Invariants every converted fragment satisfies.
    fn assert_amp_clean(out: &str) {
        let lower = out.to_ascii_lowercase();
        assert!(!lower.contains("<script"), "script left in {out}");
        assert!(!lower.contains("<iframe"), "iframe left in {out}");
        assert!(!FORBIDDEN_ATTR.is_match(out), "style or handler left in {out}");
    }

    #[test]
    fn test_img_exact_output() {
        assert_eq!(
            to_amp_html(r#"<img src="a.png" width="100" height="50" alt="x">"#),
            r#"<amp-img src="a.png" width="100" height="50" alt="x" layout="responsive"></amp-img>"#
        );
    }

    #[test]
    fn test_img_defaults_and_attribute_order() {
        assert_eq!(
            to_amp_html(r#"<p><img alt="cat" src="c.png" class="pic"/></p>"#),
            r#"<p><amp-img src="c.png" width="800" height="600" alt="cat" layout="responsive"></amp-img></p>"#
        );
    }

    #[test]
    fn test_strips_style_script_handlers() {
        let html = r#"<div style="color:red" onclick="x()"><p>Hi</p><script>alert(1)</script></div>"#;
        let out = to_amp_html(html);

        assert_eq!(out, "<div><p>Hi</p></div>");
        assert_amp_clean(&out);
    }

    #[test]
    fn test_multiline_script_removed() {
        let html = "<p>a</p><script type=\"module\">\nlet x = 1 < 2;\nconsole.log(x);\n</script><p>b</p>";
        assert_eq!(to_amp_html(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_unclosed_script_removed() {
        assert_eq!(to_amp_html("<p>a</p><script>tail"), "<p>a</p>");
    }

    #[test]
    fn test_iframe_becomes_amp_iframe() {
        let out = to_amp_html(r#"<iframe src="https://v.example/1" sandbox="allow-forms"></iframe>"#);
        assert_eq!(
            out,
            r#"<amp-iframe src="https://v.example/1" sandbox="allow-scripts allow-same-origin"></amp-iframe>"#
        );
    }

    #[test]
    fn test_case_variations() {
        let out = to_amp_html(r#"<DIV STYLE="x" OnClick="y()"><IMG SRC="a.png"><IFRAME SRC="v"></IFRAME></DIV>"#);

        assert_amp_clean(&out);
        assert!(out.contains(r#"<amp-img src="a.png" width="800" height="600" alt="" layout="responsive"></amp-img>"#));
        assert!(out.contains("<amp-iframe"));
        assert!(out.contains("</amp-iframe>"));
    }

    #[test]
    fn test_text_and_entities_pass_through() {
        let html = "<p>a &amp; b&nbsp;c</p><!-- note --><br>";
        assert_eq!(to_amp_html(html), html);
    }

    #[test]
    fn test_single_quoted_value_is_requoted() {
        assert_eq!(
            to_amp_html(r#"<a title='say "hi"' style="x">t</a>"#),
            r#"<a title="say &quot;hi&quot;">t</a>"#
        );
    }

    #[test]
    fn test_pattern_fallback() {
        let html = r#"<div style="a"><img width="10" src="p.png" onload="f()"><iframe src="v"></iframe><script>
x()
</script><span onclick="g()">s</span></div>"#;
        let out = rewrite_patterns(html);

        assert_eq!(
            out,
            r#"<div><amp-img src="p.png" width="10" height="600" alt="" layout="responsive"></amp-img><amp-iframe src="v" sandbox="allow-scripts allow-same-origin"></amp-iframe><span>s</span></div>"#
        );
    }

    #[test]
    fn test_prefixed_style_and_handlers_stripped() {
        let html = r#"<div data-onclick="x" data-style="y" x-OnLoad=z class="c">a<span ng-style="s" data-on-click="k">b</span></div>"#;
        let out = to_amp_html(html);

        assert_eq!(out, r#"<div class="c">a<span data-on-click="k">b</span></div>"#);
        assert_amp_clean(&out);
    }

    #[test]
    fn test_pattern_fallback_unquoted_attributes() {
        let html = "<div style=color:red onclick=f()>a</div><!-- unclosed";
        let out = to_amp_html(html);

        assert_eq!(out, "<div>a</div><!-- unclosed");
        assert_amp_clean(&out);

        let out = rewrite_patterns(r#"<p data-style='x' data-onclick=go class="c">t</p>"#);
        assert_eq!(out, r#"<p class="c">t</p>"#);
        assert_amp_clean(&out);
    }

    #[test]
    fn test_convert_tree() {
        let tree = ContentTree::new(vec![
            Element::new("h2").attr("style", "x").child("Intro").into(),
            Element::new("p")
                .child("a < b ")
                .child(Element::new("img").attr("src", "a.png").attr("alt", "\"q\""))
                .into(),
            Element::new("script").child("alert(1)").into(),
            Element::new("iframe").attr("src", "v").into(),
            Node::Raw(r#"<span onclick="f()">raw</span>"#.into()),
        ]);

        assert_eq!(
            convert_tree(&tree),
            concat!(
                "<h2>Intro</h2>",
                r#"<p>a &lt; b <amp-img src="a.png" width="800" height="600" alt="&quot;q&quot;" layout="responsive"></amp-img></p>"#,
                r#"<amp-iframe src="v" sandbox="allow-scripts allow-same-origin"></amp-iframe>"#,
                "<span>raw</span>",
            )
        );
    }

    #[test]
    fn test_tree_and_string_paths_agree() {
        let tree = ContentTree::new(vec![
            Element::new("div")
                .attr("class", "c")
                .attr("onmouseover", "x")
                .child(Element::new("img").attr("src", "a.png").attr("width", "5"))
                .into(),
        ]);

        assert_eq!(convert_tree(&tree), to_amp_html(&tree.to_html()));
    }
}

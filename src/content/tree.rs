//! Parsed markup tree of a document body.
//!
//! A small hast-like model: elements with ordered attributes, text, comments,
//! and raw markup passed through untouched. Attribute values and text are
//! stored unescaped; [`ContentTree::to_html`] escapes on output.

/// Elements that never take an end tag in HTML serialization.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One node of the body tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// Pre-rendered markup, emitted verbatim.
    Raw(String),
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in source order, values unescaped.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Root of a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(elem)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_owned())
    }
}

impl ContentTree {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Wrap already-rendered HTML as a single raw node.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            children: vec![Node::Raw(html.into())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            write_node(&mut out, node);
        }
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => {
            push_start_tag(out, &elem.tag, elem.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            if !is_void(&elem.tag) {
                for child in &elem.children {
                    write_node(out, child);
                }
                push_end_tag(out, &elem.tag);
            }
        }
        Node::Text(text) => push_escaped_text(out, text),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Raw(html) => out.push_str(html),
    }
}

// ============================================================================
// Serialization helpers (shared with the AMP tree walker)
// ============================================================================

/// Whether `tag` is an HTML void element.
pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Write `<tag k="v" ...>` with escaped attribute values.
pub(crate) fn push_start_tag<'a>(
    out: &mut String,
    tag: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        push_escaped_attr(out, value);
        out.push('"');
    }
    out.push('>');
}

pub(crate) fn push_end_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

pub(crate) fn push_escaped_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_nested() {
        let tree = ContentTree::new(vec![
            Element::new("h1").child("Title").into(),
            Element::new("p")
                .child("see ")
                .child(Element::new("a").attr("href", "/x").child("x"))
                .into(),
        ]);

        assert_eq!(tree.to_html(), r#"<h1>Title</h1><p>see <a href="/x">x</a></p>"#);
    }

    #[test]
    fn test_to_html_void_elements_have_no_end_tag() {
        let tree = ContentTree::new(vec![
            Element::new("img").attr("src", "a.png").into(),
            Element::new("br").into(),
        ]);
        assert_eq!(tree.to_html(), r#"<img src="a.png"><br>"#);
    }

    #[test]
    fn test_to_html_escapes() {
        let tree = ContentTree::new(vec![
            Element::new("p")
                .attr("title", r#"say "hi" & go"#)
                .child("1 < 2 & 3 > 2")
                .into(),
        ]);
        assert_eq!(
            tree.to_html(),
            r#"<p title="say &quot;hi&quot; &amp; go">1 &lt; 2 &amp; 3 &gt; 2</p>"#
        );
    }

    #[test]
    fn test_raw_and_comment_pass_through() {
        let tree = ContentTree::new(vec![
            Node::Comment(" note ".into()),
            Node::Raw("<b>&nbsp;</b>".into()),
        ]);
        assert_eq!(tree.to_html(), "<!-- note --><b>&nbsp;</b>");
    }

    #[test]
    fn test_from_html() {
        let tree = ContentTree::from_html("<p>hi</p>");
        assert!(!tree.is_empty());
        assert_eq!(tree.to_html(), "<p>hi</p>");
        assert!(ContentTree::default().is_empty());
    }

    #[test]
    fn test_is_void_case_insensitive() {
        assert!(is_void("IMG"));
        assert!(!is_void("iframe"));
    }
}

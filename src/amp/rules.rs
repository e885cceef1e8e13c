//! Element rewrite rules for the AMP dialect.
//!
//! Shared by the event-based string converter and the tree walker, so both
//! produce the same markup for the same element.
//!
//! | Source | Result |
//! |--------|--------|
//! | `<script>` | removed with its content |
//! | `<img src>` | `<amp-img src width height alt layout="responsive"></amp-img>` |
//! | `<iframe>` | `<amp-iframe ... sandbox="allow-scripts allow-same-origin">` |
//! | `style`, `on*` attributes | dropped from every element |
//!
//! Tag and attribute names compare case-insensitively. Attribute values are
//! copied as given; escaping is the caller's concern.

/// Ordered attribute list.
pub type Attrs = Vec<(String, String)>;

pub const AMP_IMG: &str = "amp-img";
pub const AMP_IFRAME: &str = "amp-iframe";
pub const IFRAME_SANDBOX: &str = "allow-scripts allow-same-origin";

const DEFAULT_WIDTH: &str = "800";
const DEFAULT_HEIGHT: &str = "600";

/// What to do with one source element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Already valid; write the source element unchanged.
    Keep,
    /// Drop the element and everything inside it.
    Remove,
    /// Write this element in place of the source one.
    Emit(Emitted),
}

/// A rewritten start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub tag: String,
    pub attrs: Attrs,
    /// Closed right after the start tag; source children are not carried over.
    pub closed: bool,
}

/// Decide how an element with `tag` and `attrs` appears in AMP output.
pub fn rewrite_element(tag: &str, attrs: &[(String, String)]) -> Rewrite {
    if tag.eq_ignore_ascii_case("script") {
        return Rewrite::Remove;
    }

    if tag.eq_ignore_ascii_case("img")
        && let Some(src) = find_attr(attrs, "src")
    {
        return Rewrite::Emit(amp_img(src, attrs));
    }

    if tag.eq_ignore_ascii_case("iframe") {
        return Rewrite::Emit(amp_iframe(attrs));
    }

    if attrs.iter().any(|(name, _)| is_disallowed_attr(name)) {
        Rewrite::Emit(Emitted {
            tag: tag.to_owned(),
            attrs: allowed_attrs(attrs),
            closed: false,
        })
    } else {
        Rewrite::Keep
    }
}

/// Name of the end tag to write for a source end tag, `None` to drop it.
pub fn rewrite_end_tag(tag: &str) -> Option<&str> {
    if tag.eq_ignore_ascii_case("iframe") {
        Some(AMP_IFRAME)
    } else if tag.eq_ignore_ascii_case("img") || tag.eq_ignore_ascii_case("script") {
        None
    } else {
        Some(tag)
    }
}

/// Inline styles and event handlers, including prefixed forms.
///
/// A name is dropped when it ends in `style` (`style`, `data-style`) or ends
/// in `on` followed by word characters (`onclick`, `data-onLoad`). Written
/// back out, no kept name can form `style=` or `on<letters>=`.
pub fn is_disallowed_attr(name: &str) -> bool {
    let name = name.as_bytes();
    ends_with_style(name) || has_handler_suffix(name)
}

fn ends_with_style(name: &[u8]) -> bool {
    name.len() >= 5 && name[name.len() - 5..].eq_ignore_ascii_case(b"style")
}

fn has_handler_suffix(name: &[u8]) -> bool {
    name.windows(2).enumerate().any(|(i, pair)| {
        let rest = &name[i + 2..];
        pair.eq_ignore_ascii_case(b"on")
            && !rest.is_empty()
            && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
    })
}

fn find_attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn allowed_attrs(attrs: &[(String, String)]) -> Attrs {
    attrs
        .iter()
        .filter(|(name, _)| !is_disallowed_attr(name))
        .cloned()
        .collect()
}

fn amp_img(src: &str, attrs: &[(String, String)]) -> Emitted {
    // Only plain pixel counts carry over.
    let dimension = |name, default| {
        find_attr(attrs, name)
            .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(default)
    };

    Emitted {
        tag: AMP_IMG.to_owned(),
        attrs: vec![
            ("src".into(), src.into()),
            ("width".into(), dimension("width", DEFAULT_WIDTH).into()),
            ("height".into(), dimension("height", DEFAULT_HEIGHT).into()),
            ("alt".into(), find_attr(attrs, "alt").unwrap_or_default().into()),
            ("layout".into(), "responsive".into()),
        ],
        closed: true,
    }
}

fn amp_iframe(attrs: &[(String, String)]) -> Emitted {
    let mut attrs = allowed_attrs(attrs);
    attrs.retain(|(name, _)| !name.eq_ignore_ascii_case("sandbox"));
    attrs.push(("sandbox".into(), IFRAME_SANDBOX.into()));

    Emitted {
        tag: AMP_IFRAME.to_owned(),
        attrs,
        closed: false,
    }
}

//! quick-xml helpers for reading and writing HTML.
//!
//! Reading is lenient (no end-name or syntax checks) so that ordinary HTML
//! such as void elements tokenizes without errors.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{self, Cursor, Write};

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Create a configured reader from content bytes.
#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader
}

/// Create an in-memory writer with a capacity hint.
#[inline]
pub fn create_xml_writer(capacity: usize) -> XmlWriter {
    Writer::new(Cursor::new(Vec::with_capacity(capacity)))
}

/// Build a start tag from already-escaped attribute pairs.
///
/// Values are written verbatim between double quotes.
pub fn build_elem<K, V>(tag: &str, attrs: &[(K, V)]) -> BytesStart<'static>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut elem = BytesStart::new(tag.to_owned());
    for (k, v) in attrs {
        elem.push_attribute((k.as_ref().as_bytes(), v.as_ref().as_bytes()));
    }
    elem
}

/// Write a text element: `<tag>text</tag>`, escaping `text`.
#[inline]
pub fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write an element whose body is raw text (`<style>`, JSON-LD `<script>`).
///
/// The body is not escaped; entities are not decoded inside raw-text elements.
pub fn write_raw_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    body: &str,
) -> io::Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::from_escaped(body)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write a start tag with escaped attributes: `<tag attr1="val1" ...>`.
pub fn write_start(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))
}

#[inline]
pub fn write_end(writer: &mut XmlWriter, tag: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

/// Write a void element with attributes.
///
/// Emitted in HTML form (no self-closing slash).
#[inline]
pub fn write_void_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
    write_start(writer, tag, attrs)
}

/// Write an external script with optional `async`.
pub fn write_script(writer: &mut XmlWriter, src: &str, async_attr: bool) -> io::Result<()> {
    let mut elem = BytesStart::new("script");
    if async_attr {
        elem.push_attribute(("async", ""));
    }
    elem.push_attribute(("src", src));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}

/// Append pre-rendered markup without escaping.
#[inline]
pub fn write_raw(writer: &mut XmlWriter, markup: &str) -> io::Result<()> {
    writer.get_mut().write_all(markup.as_bytes())
}

/// Consume the writer and return its buffer as a string.
pub fn into_string(writer: XmlWriter) -> String {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

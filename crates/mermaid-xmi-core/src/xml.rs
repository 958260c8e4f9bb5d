//! In-memory XML element tree.
//!
//! The XMI generator builds a [`Document`] out of [`Element`]s and hands it to
//! the caller, which serializes it with [`Document::to_xml_string`] or
//! [`Document::write_to`]. Serialization goes through a `quick_xml` writer;
//! attributes keep their insertion order so the output is stable for a given
//! tree.
//!
//! Only what XMI needs is modeled: named elements with attributes and child
//! elements. There are no text nodes.
//!
//! Attribute values may hold any string. Markup characters are escaped by
//! `quick_xml::escape`; tab, line feed and carriage return become character
//! references so that a reader does not normalize them to spaces. Characters
//! that XML 1.0 cannot represent (most C0 controls, `U+FFFE`, `U+FFFF`) are
//! written as `U+FFFD REPLACEMENT CHARACTER` so the document always parses.

use std::{
    borrow::Cow,
    io::{self, Write as _},
};

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesEnd, BytesStart, Event},
};

/// XML declaration written ahead of the root element.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

/// A named XML element with ordered attributes and child elements.
///
/// # Examples
///
/// ```
/// use mermaid_xmi_core::xml::{Document, Element};
///
/// let guard = Element::new("uml:guard")
///     .with_attribute("xmi:id", "_g1")
///     .with_child(Element::new("uml:specification").with_attribute("value", "x < 3"));
///
/// let xml = Document::new(guard).to_xml_string().unwrap();
/// assert!(xml.ends_with(r#"<uml:guard xmi:id="_g1"><uml:specification value="x &lt; 3"/></uml:guard>"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute and return the element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a child and return the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing the value in place if the name already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Append a child and return a mutable reference to it.
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The qualified element name, e.g. `uml:lifeline`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first, pre-order iteration over all elements below this one.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Iterate over all descendants named `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |element| element.name == name)
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            let value = attribute_value(value);
            start.push_attribute((name.as_bytes(), value.as_bytes()));
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Matches the `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn xml_chars(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        return Cow::Borrowed(value);
    }
    value
        .chars()
        .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

fn attribute_value(value: &str) -> String {
    let chars = xml_chars(value);
    let escaped = escape(&*chars);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped.into_owned();
    }
    escaped
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

/// A complete XML document: a root element serialized after an XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize the document, XML declaration included.
    ///
    /// # Errors
    ///
    /// Only fails if the writer rejects the tree, which an in-memory buffer
    /// does not do in practice.
    pub fn to_xml_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// Stream the serialized document into `writer` as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{XML_DECLARATION}")?;

        let mut xml = Writer::new(writer);
        self.root.write(&mut xml)?;
        xml.into_inner().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::new("a")
            .with_attribute("id", "1")
            .with_child(
                Element::new("b")
                    .with_attribute("id", "2")
                    .with_child(Element::new("c").with_attribute("id", "3")),
            )
            .with_child(Element::new("c").with_attribute("id", "4"))
    }

    /// Serialized root element, without the declaration line.
    fn render(element: Element) -> String {
        let xml = Document::new(element).to_xml_string().unwrap();
        xml.strip_prefix(XML_DECLARATION)
            .and_then(|rest| rest.strip_prefix('\n'))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(render(Element::new("uml:lifeline")), "<uml:lifeline/>");
    }

    #[test]
    fn test_attribute_order_preserved() {
        let element = Element::new("x")
            .with_attribute("z", "1")
            .with_attribute("a", "2")
            .with_attribute("m", "3");

        assert_eq!(render(element), r#"<x z="1" a="2" m="3"/>"#);
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut element = Element::new("x").with_attribute("name", "old");
        element.set_attribute("name", "new");

        assert_eq!(element.attribute("name"), Some("new"));
        assert_eq!(element.attributes().count(), 1);
    }

    #[test]
    fn test_markup_characters_escaped() {
        let xml = render(Element::new("x").with_attribute("v", "a & b <c> \"d\" 'e'"));

        assert_eq!(
            xml,
            r#"<x v="a &amp; b &lt;c&gt; &quot;d&quot; &apos;e&apos;"/>"#
        );
    }

    #[test]
    fn test_whitespace_written_as_references() {
        let xml = render(Element::new("x").with_attribute("v", "a\tb\r\nc"));

        assert_eq!(xml, r#"<x v="a&#9;b&#13;&#10;c"/>"#);
    }

    #[test]
    fn test_escaping_keeps_multibyte_text() {
        let element = Element::new("x").with_attribute("v", "Ölpumpe & Kühlung");

        assert_eq!(render(element), r#"<x v="Ölpumpe &amp; Kühlung"/>"#);
    }

    #[test]
    fn test_non_xml_characters_replaced() {
        assert_eq!(xml_chars("plain\ttext"), Cow::Borrowed("plain\ttext"));
        assert_eq!(xml_chars("A\u{1}B\u{c}C\u{fffe}"), "A\u{fffd}B\u{fffd}C\u{fffd}");

        let xml = render(Element::new("x").with_attribute("v", "bell\u{7}"));
        assert_eq!(xml, "<x v=\"bell\u{fffd}\"/>");
    }

    #[test]
    fn test_nested_serialization() {
        assert_eq!(
            render(tree()),
            r#"<a id="1"><b id="2"><c id="3"/></b><c id="4"/></a>"#
        );
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = tree();
        let ids: Vec<_> = root
            .descendants()
            .filter_map(|element| element.attribute("id"))
            .collect();

        assert_eq!(ids, ["2", "3", "4"]);
    }

    #[test]
    fn test_find_all() {
        let root = tree();

        assert_eq!(root.find_all("c").count(), 2);
        assert_eq!(root.find_all("missing").count(), 0);
    }

    #[test]
    fn test_push_child_returns_child() {
        let mut root = Element::new("root");
        root.push_child(Element::new("operand"))
            .push_child(Element::new("guard"));

        assert_eq!(render(root), "<root><operand><guard/></operand></root>");
    }

    #[test]
    fn test_document_serialization() {
        let document = Document::new(Element::new("uml:Model"));
        let xml = document.to_xml_string().unwrap();

        assert_eq!(xml, "<?xml version='1.0' encoding='utf-8'?>\n<uml:Model/>");

        let mut buffer = Vec::new();
        document.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), xml);
    }
}

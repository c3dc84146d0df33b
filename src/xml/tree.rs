use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{InspectError, Result};

/// A parsed XML element with only its element children kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order, values unescaped
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// This element and all descendants named `tag`, in document order.
    pub fn find_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_named(tag, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.name == tag {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(tag, found);
        }
    }

    fn from_start(start: &BytesStart<'_>) -> quick_xml::Result<Self> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr?;
            element.attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }
        Ok(element)
    }
}

/// A parsed document; always has exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse `text` into an element tree.
    ///
    /// Text, comments, CDATA and processing instructions are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| InspectError::malformed(reader.buffer_position(), e))?;
            let position = reader.buffer_position();

            match event {
                Event::Start(start) => {
                    let element = Element::from_start(&start)
                        .map_err(|e| InspectError::malformed(position, e))?;
                    open.push(element);
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start)
                        .map_err(|e| InspectError::malformed(position, e))?;
                    attach(element, &mut open, &mut root, position)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| InspectError::malformed(position, "unexpected closing tag"))?;
                    attach(element, &mut open, &mut root, position)?;
                }
                Event::Text(content) if open.is_empty() => {
                    if !content.iter().all(u8::is_ascii_whitespace) {
                        return Err(InspectError::malformed(
                            position,
                            "text outside the root element",
                        ));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(InspectError::malformed(
                reader.buffer_position(),
                format!("unclosed element <{}>", unclosed.name),
            ));
        }

        let root = root
            .ok_or_else(|| InspectError::malformed(reader.buffer_position(), "no root element"))?;
        tracing::debug!("parsed document with root <{}>", root.name);
        Ok(Self { root })
    }

    /// All elements named `tag`, in document order.
    pub fn find_by_tag_name(&self, tag: &str) -> Vec<&Element> {
        self.root.find_by_tag_name(tag)
    }
}

fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
    position: usize,
) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(InspectError::malformed(
                position,
                format!("second root element <{}>", element.name),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements() {
        let doc = Document::parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Project version=\"1.0\">\n  <!-- tracks -->\n  <Track name=\"Kick &amp; Snare\">text</Track>\n  <Arrangement><Lanes/></Arrangement>\n</Project>",
        )
        .unwrap();

        assert_eq!(doc.root.name, "Project");
        assert_eq!(doc.root.attribute("version"), Some("1.0"));
        let names: Vec<_> = doc.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Track", "Arrangement"]);
        assert_eq!(doc.root.children[0].attribute("name"), Some("Kick & Snare"));
        assert!(doc.root.children[0].children.is_empty());
    }

    #[test]
    fn keeps_attribute_order() {
        let doc = Document::parse("<Clip z=\"1\" a=\"2\" m=\"3\"/>").unwrap();
        let keys: Vec<_> = doc.root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn finds_in_document_order() {
        let doc = Document::parse(
            "<Root><Lane id=\"1\"><Lane id=\"2\"/></Lane><Clips/><Lane id=\"3\"/></Root>",
        )
        .unwrap();
        let ids: Vec<_> = doc
            .find_by_tag_name("Lane")
            .iter()
            .map(|e| e.attribute("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(doc.find_by_tag_name("Root").len(), 1);
        assert!(doc.find_by_tag_name("lane").is_empty());
    }

    #[test]
    fn rejects_malformed_markup() {
        for bad in [
            "<Root><Lane></Root>",
            "<Root>",
            "",
            "<A/><B/>",
            "plain text",
            "</Root>",
        ] {
            assert!(
                matches!(Document::parse(bad), Err(InspectError::MalformedXml { .. })),
                "accepted {bad:?}"
            );
        }
    }
}

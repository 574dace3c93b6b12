//! Minimal element tree built from `quick-xml` events
//!
//! The credential listing is small, so it is read into memory whole and
//! queried by element name.

use super::errors::CredentialError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// An XML element with its attributes, text and children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content, whitespace-trimmed
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parses a document and returns its root element
    pub fn parse(input: &str) -> Result<Self, CredentialError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(Self::open(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = Self::open(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    if let Some(current) = stack.last_mut() {
                        let value = text.unescape().map_err(|e| malformed(e.to_string()))?;
                        current.text.push_str(&value);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(malformed(format!(
                        "{e} at position {}",
                        reader.buffer_position()
                    )));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(malformed(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn open(start: &BytesStart<'_>) -> Result<Self, CredentialError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| malformed(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// First direct child with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Non-empty text of the first direct child with the given name
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// All descendants (not including `self`) with the given name, in document order
    #[must_use]
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        for child in &self.children {
            collect_named(child, name, &mut found);
        }
        found
    }
}

fn collect_named<'a>(element: &'a XmlElement, name: &str, found: &mut Vec<&'a XmlElement>) {
    if element.name == name {
        found.push(element);
    }
    for child in &element.children {
        collect_named(child, name, found);
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), CredentialError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(malformed("multiple root elements"))
    }
}

fn malformed(reason: impl Into<String>) -> CredentialError {
    CredentialError::MalformedResponse(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = XmlElement::parse(
            r#"<?xml version="1.0"?>
<root>
  <item kind="a">first &amp; only</item>
  <empty/>
  <nested><item>inner</item></nested>
</root>"#,
        )
        .unwrap();

        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.child_text("item"), Some("first & only"));
        assert_eq!(
            root.child("item").unwrap().attributes,
            vec![("kind".to_string(), "a".to_string())]
        );
        assert_eq!(root.child_text("empty"), None);
        assert_eq!(root.descendants_named("item").len(), 2);
    }

    #[test]
    fn test_cdata_is_text() {
        let root = XmlElement::parse("<a><![CDATA[x < y]]></a>").unwrap();
        assert_eq!(root.text, "x < y");
    }

    #[test]
    fn test_mismatched_tags_are_malformed() {
        let err = XmlElement::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedResponse(_)));
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        let err = XmlElement::parse("<a><b>").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_document_is_malformed() {
        assert!(XmlElement::parse("").is_err());
        assert!(XmlElement::parse("not xml at all").is_err());
    }
}

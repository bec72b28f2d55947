//! XML text to element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlElement, XmlNode};
use crate::errors::{AnaforaError, AnaforaResult};

/// Parse an XML document into its root element.
///
/// Whitespace-only text between elements is dropped and text content is
/// trimmed, so indentation in the source does not leak into field values.
pub fn parse_document(xml: &str) -> AnaforaResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent
                        .children
                        .push(XmlNode::Text(text.unescape()?.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    parent.children.push(XmlNode::Text(text));
                }
            }
            Event::Eof => break,
            // Declarations, comments and processing instructions carry no annotation data.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(AnaforaError::UnclosedElement { element: open.name });
    }

    root.ok_or_else(|| AnaforaError::MissingElement {
        element: "root".to_string(),
    })
}

fn element_from_start(start: &BytesStart<'_>) -> AnaforaResult<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Attach a closed element to its parent, or make it the root.
fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

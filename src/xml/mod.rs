//! Generic element tree over an Anafora XML file.
//!
//! The annotation model never touches XML events directly. It reads from and
//! flushes back into this owned tree, which is produced by [`parse_document`]
//! and printed by [`to_pretty_string`].

mod parse;
mod write;

pub use parse::parse_document;
pub use write::to_pretty_string;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

/// An owned XML element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf element holding a single text node.
    ///
    /// An empty `text` produces an element with no children, which prints
    /// as a self-closing tag.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Iterate over child elements with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First child element with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children
            .iter_mut()
            .filter_map(XmlNode::as_element_mut)
            .find(|e| e.name == name)
    }

    /// Follow a chain of child tag names, e.g. `["info", "progress"]`.
    pub fn path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    pub fn path_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        let mut element = self;
        for name in path {
            element = element.child_mut(name)?;
        }
        Some(element)
    }

    /// First child with the given name, appending an empty one when absent.
    pub fn ensure_child(&mut self, name: &str) -> &mut XmlElement {
        let index = match self
            .children
            .iter()
            .position(|n| n.as_element().map_or(false, |e| e.name == name))
        {
            Some(index) => index,
            None => {
                self.children.push(XmlNode::Element(XmlElement::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[index] {
            XmlNode::Element(element) => element,
            XmlNode::Text(_) => unreachable!("position() only matches element nodes"),
        }
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Text of the first child named `name`, or `""` when it is missing.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name).map(XmlElement::text).unwrap_or_default()
    }

    /// Replace all children with a single text node (none when `text` is empty).
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Set the text of the first child named `name`, creating it when absent.
    pub fn set_child_text(&mut self, name: &str, text: impl Into<String>) {
        self.ensure_child(name).set_text(text);
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }
}

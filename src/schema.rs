//! The `<schema>` block of an annotation file.

use serde::{Deserialize, Serialize};

use crate::xml::XmlElement;

/// Schema reference: `<schema path="./" protocol="file">temporal.schema.xml</schema>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub path: String,
    pub protocol: String,
    pub value: String,
}

impl Schema {
    /// Read a schema element. Missing attributes and text read as empty.
    pub fn from_element(element: &XmlElement) -> Self {
        Self {
            path: element.attribute("path").unwrap_or_default().to_string(),
            protocol: element.attribute("protocol").unwrap_or_default().to_string(),
            value: element.text(),
        }
    }

    pub(crate) fn write_into(&self, element: &mut XmlElement) {
        set_attribute(element, "path", &self.path);
        set_attribute(element, "protocol", &self.protocol);
        element.set_text(self.value.clone());
    }
}

fn set_attribute(element: &mut XmlElement, key: &str, value: &str) {
    match element.attributes.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value.to_string(),
        None if value.is_empty() => {}
        None => element.attributes.push((key.to_string(), value.to_string())),
    }
}

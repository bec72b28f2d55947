//! Named properties attached to entities and relations.

use serde::{Deserialize, Serialize};

use crate::xml::XmlElement;

/// A `<properties>` child such as `<DocTimeRel>BEFORE</DocTimeRel>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    /// Index of the source node among the `<properties>` children, `None`
    /// for properties added in memory.
    #[serde(skip)]
    pub(crate) slot: Option<usize>,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            slot: None,
        }
    }

    /// Both sides name the same property and both carry a value.
    ///
    /// Values need not be equal; that is what [`Property::agrees_with`] checks.
    pub fn is_aligned_with(&self, other: &Property) -> bool {
        self.name == other.name && !self.value.is_empty() && !other.value.is_empty()
    }

    pub fn agrees_with(&self, other: &Property) -> bool {
        self.name == other.name && self.value == other.value
    }
}

/// Read the valued properties of an annotation element.
///
/// Children without a name or without text are treated as absent.
pub(crate) fn properties_of(element: &XmlElement) -> Vec<Property> {
    let container = match element.child("properties") {
        Some(container) => container,
        None => return Vec::new(),
    };

    container
        .children
        .iter()
        .enumerate()
        .filter_map(|(slot, node)| {
            let child = node.as_element()?;
            let value = child.text();
            if child.name.is_empty() || value.is_empty() {
                return None;
            }
            Some(Property {
                name: child.name.clone(),
                value,
                slot: Some(slot),
            })
        })
        .collect()
}

/// Copy property values back into the `<properties>` container.
///
/// Properties read from the file overwrite the node they came from; new ones
/// are appended as fresh children.
pub(crate) fn flush_properties(element: &mut XmlElement, properties: &mut [Property]) {
    let container = element.ensure_child("properties");
    for property in properties.iter_mut() {
        let existing = property
            .slot
            .and_then(|slot| container.children.get_mut(slot))
            .and_then(|node| node.as_element_mut());
        match existing {
            Some(node) => node.set_text(property.value.clone()),
            None => {
                container.push_element(XmlElement::with_text(
                    property.name.clone(),
                    property.value.clone(),
                ));
                property.slot = Some(container.children.len() - 1);
            }
        }
    }
}

/// Set the first property called `name`, appending it when absent.
///
/// An empty value removes the property; the slot it was read from is
/// recorded in `cleared` so the stale node can be blanked on flush.
pub(crate) fn assign(properties: &mut Vec<Property>, cleared: &mut Vec<usize>, name: &str, value: String) {
    let position = properties.iter().position(|p| p.name == name);
    match (position, value.is_empty()) {
        (Some(index), true) => {
            let removed = properties.remove(index);
            cleared.extend(removed.slot);
        }
        (Some(index), false) => properties[index].value = value,
        (None, true) => {}
        (None, false) => properties.push(Property::new(name, value)),
    }
}

/// Blank the `<properties>` children at the given slots.
pub(crate) fn clear_slots(element: &mut XmlElement, slots: &[usize]) {
    let container = match element.child_mut("properties") {
        Some(container) => container,
        None => return,
    };
    for slot in slots {
        if let Some(node) = container.children.get_mut(*slot).and_then(|n| n.as_element_mut()) {
            node.set_text("");
        }
    }
}

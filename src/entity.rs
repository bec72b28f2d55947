//! Annotated spans of source text.

use std::collections::BTreeMap;

use crate::errors::AnaforaResult;
use crate::id::{self, AnnotationId};
use crate::property::{self, Property};
use crate::span::{Span, SpanSet};
use crate::xml::XmlElement;

/// An `<entity>` element: a typed span set with properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: String,
    spans: SpanSet,
    entity_type: String,
    parents_type: String,
    properties: Vec<Property>,
    /// Property slots whose value was cleared in memory.
    cleared_slots: Vec<usize>,
    source: XmlElement,
}

impl Entity {
    /// Build an entity from its element.
    ///
    /// Missing `id`, `type` and `parentsType` read as empty strings. The span
    /// is required: an absent or malformed span fails construction.
    pub(crate) fn from_element(element: &XmlElement) -> AnaforaResult<Self> {
        let spans = SpanSet::parse(&element.child_text("span"))?;
        Ok(Self {
            id: element.child_text("id"),
            spans,
            entity_type: element.child_text("type"),
            parents_type: element.child_text("parentsType"),
            properties: property::properties_of(element),
            cleared_slots: Vec::new(),
            source: element.clone(),
        })
    }

    /// Build a fresh entity with an empty `<properties/>` block.
    pub(crate) fn create(id: String, spans: SpanSet, entity_type: &str, parents_type: &str) -> Self {
        let mut source = XmlElement::new("entity");
        source.push_element(XmlElement::with_text("id", id.clone()));
        source.push_element(XmlElement::with_text("span", spans.to_string()));
        source.push_element(XmlElement::with_text("type", entity_type));
        source.push_element(XmlElement::with_text("parentsType", parents_type));
        source.push_element(XmlElement::new("properties"));

        Self {
            id,
            spans,
            entity_type: entity_type.to_string(),
            parents_type: parents_type.to_string(),
            properties: Vec::new(),
            cleared_slots: Vec::new(),
            source,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The parsed id, when it is well formed.
    pub fn annotation_id(&self) -> AnaforaResult<AnnotationId> {
        AnnotationId::parse(&self.id)
    }

    /// Annotator recorded in the id (`gold` for pre-annotations).
    pub fn annotator(&self) -> &str {
        id::annotator_of(&self.id)
    }

    pub fn spans(&self) -> &SpanSet {
        &self.spans
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn parents_type(&self) -> &str {
        &self.parents_type
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Value of the first property called `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Distinct property names, sorted.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_disjointed(&self) -> bool {
        self.spans.is_disjointed()
    }

    pub fn start_span(&self) -> usize {
        self.spans.start()
    }

    pub fn end_span(&self) -> usize {
        self.spans.end()
    }

    /// Returns true if one of this entity's spans contains `span`.
    pub fn covers(&self, span: &Span) -> bool {
        self.spans.covers(span)
    }

    pub fn preannotated(&self) -> bool {
        self.id.ends_with("@gold")
    }

    /// Alignment test used for IAA: identical span sets.
    pub fn is_aligned_with(&self, other: &Entity) -> bool {
        self.spans == other.spans
    }

    pub fn agrees_with(&self, other: &Entity) -> bool {
        self.entity_type == other.entity_type
    }

    /// The scalar fields of the element, keyed by tag name.
    pub fn fields(&self) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        fields.insert("id", self.id.clone());
        fields.insert("span", self.spans.to_string());
        fields.insert("type", self.entity_type.clone());
        fields.insert("parentsType", self.parents_type.clone());
        fields
    }

    /// Fields where both entities carry the same non-empty value.
    ///
    /// These are agreements, not differences; see [`Entity::differences`].
    pub fn diff(&self, other: &Entity) -> BTreeMap<&'static str, [String; 2]> {
        let other_fields = other.fields();
        self.fields()
            .into_iter()
            .filter_map(|(field, value)| {
                let theirs = other_fields.get(field)?;
                if !theirs.is_empty() && *theirs == value {
                    Some((field, [value, theirs.clone()]))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Fields whose values differ, as `[self, other]`.
    pub fn differences(&self, other: &Entity) -> BTreeMap<&'static str, [String; 2]> {
        let other_fields = other.fields();
        self.fields()
            .into_iter()
            .filter_map(|(field, value)| {
                let theirs = other_fields.get(field)?;
                if *theirs != value {
                    Some((field, [value, theirs.clone()]))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn number_of_diffs(&self, other: &Entity) -> usize {
        self.differences(other).len()
    }

    pub fn set_type(&mut self, entity_type: impl Into<String>) {
        self.entity_type = entity_type.into();
    }

    pub fn set_parents_type(&mut self, parents_type: impl Into<String>) {
        self.parents_type = parents_type.into();
    }

    pub fn set_spans(&mut self, spans: SpanSet) {
        self.spans = spans;
    }

    /// Set the first property called `name`, adding it when absent.
    ///
    /// An empty value removes the property, since valueless properties are
    /// treated as missing.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        property::assign(&mut self.properties, &mut self.cleared_slots, name, value.into());
    }

    /// The source element with every model field copied back into it.
    pub(crate) fn to_element(&self) -> XmlElement {
        let mut element = self.source.clone();
        element.set_child_text("id", self.id.clone());
        element.set_child_text("span", self.spans.to_string());
        element.set_child_text("type", self.entity_type.clone());
        element.set_child_text("parentsType", self.parents_type.clone());

        let mut properties = self.properties.clone();
        property::flush_properties(&mut element, &mut properties);
        property::clear_slots(&mut element, &self.cleared_slots);
        element
    }
}

//! Typed links between entities.
//!
//! A relation stores the ids of the entities it links inside ordinary
//! properties. Which property names hold references depends on the relation
//! kind, which is fixed once from the `type` field and the `Type` property.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AnaforaResult;
use crate::id::{self, AnnotationId};
use crate::property::{self, Property};
use crate::xml::XmlElement;

/// Property holding a relation's subtype, e.g. `CONTAINS` on a TLINK.
pub const SUBTYPE_PROPERTY: &str = "Type";

/// The closed set of relation variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationKind {
    Tlink,
    /// A TLINK whose subtype is `CONTAINS-SUBEVENT`.
    ContainsSubevent,
    IdenticalChain,
    SetSubset,
    WholePart,
    Generic,
}

impl RelationKind {
    /// Classify a relation from its `type` field and optional subtype.
    ///
    /// Comparison is ASCII case-insensitive.
    pub fn classify(relation_type: &str, subtype: Option<&str>) -> Self {
        let relation_type = relation_type.trim();
        if relation_type.eq_ignore_ascii_case("tlink") {
            match subtype {
                Some(sub) if sub.trim().eq_ignore_ascii_case("contains-subevent") => {
                    RelationKind::ContainsSubevent
                }
                _ => RelationKind::Tlink,
            }
        } else if relation_type.eq_ignore_ascii_case("identical") {
            RelationKind::IdenticalChain
        } else if relation_type.eq_ignore_ascii_case("set/subset") {
            RelationKind::SetSubset
        } else if relation_type.eq_ignore_ascii_case("whole/part") {
            RelationKind::WholePart
        } else {
            RelationKind::Generic
        }
    }

    /// The `(head, tail)` reference property names, `None` for generic relations.
    pub fn roles(&self) -> Option<(&'static str, &'static str)> {
        match self {
            RelationKind::Tlink | RelationKind::ContainsSubevent => Some(("Source", "Target")),
            RelationKind::IdenticalChain => Some(("FirstInstance", "Coreferring_String")),
            RelationKind::SetSubset => Some(("Set", "Subset")),
            RelationKind::WholePart => Some(("Whole", "Part")),
            RelationKind::Generic => None,
        }
    }

    /// Property names that hold entity references for this kind.
    pub fn reference_names(&self) -> &'static [&'static str] {
        match self {
            RelationKind::Tlink | RelationKind::ContainsSubevent => &["Source", "Target"],
            RelationKind::IdenticalChain => &["FirstInstance", "Coreferring_String"],
            RelationKind::SetSubset => &["Set", "Subset"],
            RelationKind::WholePart => &["Whole", "Part"],
            RelationKind::Generic => &[
                "Source",
                "Target",
                "FirstInstance",
                "Coreferring_String",
                "Set",
                "Subset",
                "Whole",
                "Part",
            ],
        }
    }

    /// Both plain and contains-subevent TLINKs.
    pub fn is_tlink(&self) -> bool {
        matches!(self, RelationKind::Tlink | RelationKind::ContainsSubevent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Tlink => "tlink",
            RelationKind::ContainsSubevent => "contains-subevent",
            RelationKind::IdenticalChain => "identical",
            RelationKind::SetSubset => "set/subset",
            RelationKind::WholePart => "whole/part",
            RelationKind::Generic => "generic",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `<relation>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    id: String,
    relation_type: String,
    parents_type: String,
    properties: Vec<Property>,
    subtype: Option<String>,
    kind: RelationKind,
    cleared_slots: Vec<usize>,
    source: XmlElement,
}

impl Relation {
    pub(crate) fn from_element(element: &XmlElement) -> Self {
        let properties = property::properties_of(element);
        let relation_type = element.child_text("type");
        let subtype = subtype_of(&properties);
        let kind = RelationKind::classify(&relation_type, subtype.as_deref());

        Self {
            id: element.child_text("id"),
            relation_type,
            parents_type: element.child_text("parentsType"),
            properties,
            subtype,
            kind,
            cleared_slots: Vec::new(),
            source: element.clone(),
        }
    }

    pub(crate) fn create(
        id: String,
        relation_type: &str,
        parents_type: &str,
        properties: Vec<Property>,
    ) -> Self {
        let mut source = XmlElement::new("relation");
        source.push_element(XmlElement::with_text("id", id.clone()));
        source.push_element(XmlElement::with_text("type", relation_type));
        source.push_element(XmlElement::with_text("parentsType", parents_type));
        source.push_element(XmlElement::new("properties"));

        let subtype = subtype_of(&properties);
        let kind = RelationKind::classify(relation_type, subtype.as_deref());
        Self {
            id,
            relation_type: relation_type.to_string(),
            parents_type: parents_type.to_string(),
            properties,
            subtype,
            kind,
            cleared_slots: Vec::new(),
            source,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn annotation_id(&self) -> AnaforaResult<AnnotationId> {
        AnnotationId::parse(&self.id)
    }

    pub fn annotator(&self) -> &str {
        id::annotator_of(&self.id)
    }

    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }

    pub fn parents_type(&self) -> &str {
        &self.parents_type
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn preannotated(&self) -> bool {
        self.id.ends_with("@gold")
    }

    /// Referenced entity ids, in property order.
    pub fn entity_ids(&self) -> Vec<&str> {
        let names = self.kind.reference_names();
        self.properties
            .iter()
            .filter(|p| names.iter().any(|n| n.eq_ignore_ascii_case(&p.name)))
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Id held by the head role (`Source`, `FirstInstance`, `Set`, `Whole`).
    pub fn head_id(&self) -> Option<&str> {
        let (head, _) = self.kind.roles()?;
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(head))
            .map(|p| p.value.as_str())
    }

    /// Ids held by the tail role, in property order.
    pub fn tail_ids(&self) -> Vec<&str> {
        match self.kind.roles() {
            Some((_, tail)) => self
                .properties
                .iter()
                .filter(|p| p.name.eq_ignore_ascii_case(tail))
                .map(|p| p.value.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Documents named by this relation's own id and by its references.
    pub fn documents(&self) -> BTreeSet<&str> {
        id::document_of(&self.id)
            .into_iter()
            .chain(self.entity_ids().into_iter().filter_map(id::document_of))
            .collect()
    }

    /// Returns true if the relation spans more than one source document.
    pub fn is_cross_doc(&self) -> bool {
        self.documents().len() > 1
    }

    /// Both relations reference the same set of entity ids.
    pub fn has_same_entities(&self, other: &Relation) -> bool {
        let ours: BTreeSet<&str> = self.entity_ids().into_iter().collect();
        let theirs: BTreeSet<&str> = other.entity_ids().into_iter().collect();
        ours == theirs
    }

    pub fn set_parents_type(&mut self, parents_type: impl Into<String>) {
        self.parents_type = parents_type.into();
    }

    /// Set a property value. Changing the subtype property reclassifies the relation.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        let is_subtype = name.eq_ignore_ascii_case(SUBTYPE_PROPERTY);
        // reuse the spelling already in the file
        let name = self
            .properties
            .iter()
            .find(|p| is_subtype && p.name.eq_ignore_ascii_case(name))
            .map_or_else(|| name.to_string(), |p| p.name.clone());
        property::assign(&mut self.properties, &mut self.cleared_slots, &name, value.into());
        if is_subtype {
            self.subtype = subtype_of(&self.properties);
            self.kind = RelationKind::classify(&self.relation_type, self.subtype.as_deref());
        }
    }

    pub(crate) fn set_subtype(&mut self, subtype: &str) {
        self.set_property(SUBTYPE_PROPERTY, subtype);
    }

    pub(crate) fn to_element(&self) -> XmlElement {
        let mut element = self.source.clone();
        element.set_child_text("id", self.id.clone());
        element.set_child_text("type", self.relation_type.clone());
        element.set_child_text("parentsType", self.parents_type.clone());

        let mut properties = self.properties.clone();
        property::flush_properties(&mut element, &mut properties);
        property::clear_slots(&mut element, &self.cleared_slots);
        element
    }
}

fn subtype_of(properties: &[Property]) -> Option<String> {
    properties
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(SUBTYPE_PROPERTY))
        .map(|p| p.value.clone())
}

//! Entity-level differences between two annotations of the same text.

use std::collections::{BTreeMap, BTreeSet};

use anafora::Entity;
use serde::Serialize;

use crate::align::align_entities;

/// Prefix for property entries in [`EntityChange::fields`].
pub const PROPERTY_PREFIX: &str = "properties.";

/// An aligned entity pair whose contents differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityChange {
    pub left_id: String,
    pub right_id: String,
    pub span: String,
    /// Differing fields as `[left, right]`. Ids are not compared.
    pub fields: BTreeMap<String, [String; 2]>,
}

/// What separates two annotation sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentDiff {
    /// Ids of entities whose span set has no counterpart on the right.
    pub only_left: Vec<String>,
    /// Ids of entities whose span set has no counterpart on the left.
    pub only_right: Vec<String>,
    pub changed: Vec<EntityChange>,
}

impl DocumentDiff {
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty() && self.changed.is_empty()
    }
}

/// Compare two entity lists.
///
/// Entities are aligned on span sets. Aligned pairs are compared on type,
/// parents type and every property value; a property present on one side only
/// shows an empty string on the other.
pub fn diff_documents(left: &[&Entity], right: &[&Entity]) -> DocumentDiff {
    let alignment = align_entities(left.iter().copied(), right.iter().copied());

    let changed = alignment
        .matched()
        .filter_map(|(a, b)| {
            let fields = changed_fields(a, b);
            if fields.is_empty() {
                None
            } else {
                Some(EntityChange {
                    left_id: a.id().to_string(),
                    right_id: b.id().to_string(),
                    span: a.spans().to_string(),
                    fields,
                })
            }
        })
        .collect();

    DocumentDiff {
        only_left: alignment.left_only().map(|e| e.id().to_string()).collect(),
        only_right: alignment.right_only().map(|e| e.id().to_string()).collect(),
        changed,
    }
}

fn changed_fields(a: &Entity, b: &Entity) -> BTreeMap<String, [String; 2]> {
    let mut fields: BTreeMap<String, [String; 2]> = a
        .differences(b)
        .into_iter()
        .filter(|(field, _)| *field != "id")
        .map(|(field, values)| (field.to_string(), values))
        .collect();

    let names: BTreeSet<&str> = a.property_names().into_iter().chain(b.property_names()).collect();
    for name in names {
        let ours = a.property(name).unwrap_or_default();
        let theirs = b.property(name).unwrap_or_default();
        if ours != theirs {
            fields.insert(
                format!("{}{}", PROPERTY_PREFIX, name),
                [ours.to_string(), theirs.to_string()],
            );
        }
    }
    fields
}

//! Agreement counts per entity type, property name and relation type.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ops::AddAssign;

use anafora::{Document, Entity, Relation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{align, align_entities, align_properties, Alignment};

/// How many annotations of one category were seen and how many agreed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementCounts {
    pub agree: usize,
    pub total: usize,
}

impl AgreementCounts {
    pub fn new(agree: usize, total: usize) -> Self {
        Self { agree, total }
    }

    /// `agree / total`, or `None` when nothing was counted.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.agree as f64 / self.total as f64)
        }
    }
}

impl AddAssign for AgreementCounts {
    fn add_assign(&mut self, other: Self) {
        self.agree += other.agree;
        self.total += other.total;
    }
}

/// Counts keyed by category name, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgreementTable {
    rows: BTreeMap<String, AgreementCounts>,
}

impl AgreementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with a zeroed row for every key.
    pub fn seeded<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            rows: keys
                .into_iter()
                .map(|key| (key.to_string(), AgreementCounts::default()))
                .collect(),
        }
    }

    fn row(&mut self, key: &str) -> &mut AgreementCounts {
        self.rows.entry(key.to_string()).or_default()
    }

    /// Count one annotation of `key`, agreeing or not.
    pub fn record(&mut self, key: &str, agrees: bool) {
        let row = self.row(key);
        row.total += 1;
        if agrees {
            row.agree += 1;
        }
    }

    pub fn get(&self, key: &str) -> Option<&AgreementCounts> {
        self.rows.get(key)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &AgreementCounts)> {
        self.rows.iter().map(|(key, counts)| (key.as_str(), counts))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every row.
    pub fn overall(&self) -> AgreementCounts {
        self.rows
            .values()
            .fold(AgreementCounts::default(), |mut sum, counts| {
                sum += *counts;
                sum
            })
    }
}

/// Count one side of an aligned pair.
///
/// `own` adds to its category's total, and also to `agree` when the partner
/// exists and `agrees` accepts it.
fn record_side<T, U>(
    table: &mut AgreementTable,
    own: Option<&T>,
    partner: Option<&U>,
    key: impl Fn(&T) -> &str,
    agrees: impl Fn(&T, &U) -> bool,
) {
    if let Some(own) = own {
        let agreed = partner.map_or(false, |partner| agrees(own, partner));
        table.record(key(own), agreed);
    }
}

/// Agreement on entity types.
///
/// Entities align on identical span sets. Each entity adds 1 to its type's
/// total; it also adds 1 to `agree` when its partner has the same type. A
/// perfectly matched pair therefore counts 2/2 and a one-sided entity 0/1.
pub fn entity_agreement_by_type(left: &[&Entity], right: &[&Entity]) -> AgreementTable {
    let mut table = AgreementTable::seeded(
        left.iter()
            .chain(right.iter())
            .map(|entity| entity.entity_type()),
    );

    let alignment = align_entities(left.iter().copied(), right.iter().copied());
    for (a, b) in alignment.pairs() {
        let a = *a;
        let b = *b;
        record_side(&mut table, a, b, Entity::entity_type, |x, y| x.agrees_with(y));
        record_side(&mut table, b, a, Entity::entity_type, |x, y| x.agrees_with(y));
    }

    debug!(
        matched = alignment.matched_count(),
        types = table.len(),
        "entity type agreement"
    );
    table
}

/// Agreement on property values of aligned entities.
///
/// For a matched pair where both entities carry properties, the properties
/// are aligned by name and counted like types, agreeing on equal values.
/// When only one side of a matched pair has properties they add to `total`
/// only. Entities without a partner contribute nothing, so property totals
/// undercount one-sided annotations.
pub fn property_agreement_by_name(left: &[&Entity], right: &[&Entity]) -> AgreementTable {
    let mut table = AgreementTable::seeded(
        left.iter()
            .chain(right.iter())
            .flat_map(|entity| entity.properties().iter().map(|p| p.name.as_str())),
    );

    let alignment = align_entities(left.iter().copied(), right.iter().copied());
    for (a, b) in alignment.matched() {
        match (a.properties().is_empty(), b.properties().is_empty()) {
            (false, false) => {
                let properties = align_properties(a, b);
                for (pa, pb) in properties.pairs() {
                    let pa = *pa;
                    let pb = *pb;
                    record_side(&mut table, pa, pb, |p| p.name.as_str(), |x, y| x.agrees_with(y));
                    record_side(&mut table, pb, pa, |p| p.name.as_str(), |x, y| x.agrees_with(y));
                }
            }
            (false, true) => a.properties().iter().for_each(|p| table.record(&p.name, false)),
            (true, false) => b.properties().iter().for_each(|p| table.record(&p.name, false)),
            (true, true) => {}
        }
    }

    debug!(names = table.len(), "property agreement");
    table
}

/// Agreement on relations, given the entity alignment of the two documents.
///
/// Only relations whose entity ids all belong to the aligned entities count,
/// so a scope or type filter applied to the entities also limits the
/// relations. A relation's entity ids are translated through the entity
/// alignment; two relations align when the translated set equals the other
/// relation's set. Aligned relations agree when they share type and subtype.
/// Relations are keyed by their `type` field.
pub fn relation_agreement_by_type(
    left: &Document,
    right: &Document,
    entities: &Alignment<&Entity, &Entity>,
) -> AgreementTable {
    let left_ids: HashSet<&str> = entities
        .pairs()
        .iter()
        .filter_map(|(a, _)| a.map(Entity::id))
        .collect();
    let right_ids: HashSet<&str> = entities
        .pairs()
        .iter()
        .filter_map(|(_, b)| b.map(Entity::id))
        .collect();
    let left_relations: Vec<&Relation> = in_scope(left, &left_ids).collect();
    let right_relations: Vec<&Relation> = in_scope(right, &right_ids).collect();

    let mut table = AgreementTable::seeded(
        left_relations
            .iter()
            .chain(&right_relations)
            .map(|r| r.relation_type()),
    );

    let mapping: HashMap<&str, &str> = entities
        .matched()
        .map(|(a, b)| (a.id(), b.id()))
        .collect();

    let alignment = align(left_relations, right_relations, |a, b| {
        match translated_ids(a, &mapping) {
            Some(ids) => !ids.is_empty() && ids == b.entity_ids().into_iter().collect::<BTreeSet<_>>(),
            None => false,
        }
    });

    let same_label = |x: &&Relation, y: &&Relation| {
        x.relation_type() == y.relation_type() && x.subtype() == y.subtype()
    };
    for (a, b) in alignment.pairs() {
        record_side(&mut table, a.as_ref(), b.as_ref(), |r| r.relation_type(), same_label);
        record_side(&mut table, b.as_ref(), a.as_ref(), |r| r.relation_type(), same_label);
    }

    debug!(
        matched = alignment.matched_count(),
        types = table.len(),
        "relation agreement"
    );
    table
}

/// Relations referencing at least one entity, all of them in `ids`.
fn in_scope<'a>(document: &'a Document, ids: &'a HashSet<&'a str>) -> impl Iterator<Item = &'a Relation> + 'a {
    document.relations().filter(move |relation| {
        let referenced = relation.entity_ids();
        !referenced.is_empty() && referenced.iter().all(|id| ids.contains(*id))
    })
}

/// The relation's entity ids mapped to their aligned partners, `None` when
/// any of them has no partner.
fn translated_ids<'a>(relation: &Relation, mapping: &HashMap<&str, &'a str>) -> Option<BTreeSet<&'a str>> {
    relation
        .entity_ids()
        .into_iter()
        .map(|id| mapping.get(id).copied())
        .collect()
}

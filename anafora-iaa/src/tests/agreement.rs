use super::{document, entity, load_fixture, HACO, MPWE};
use crate::{
    align_documents, align_entities, entity_agreement_by_type, property_agreement_by_name,
    relation_agreement_by_type, AgreementCounts, IaaConfig,
};

fn counts(agree: usize, total: usize) -> Option<AgreementCounts> {
    Some(AgreementCounts::new(agree, total))
}

#[test]
fn test_matched_pair_counts_twice() {
    let a = document("doc", &entity("1@e@doc@a", "0,5", "Markable", &[]));
    let b = document("doc", &entity("1@e@doc@b", "0,5", "Markable", &[]));

    let table = entity_agreement_by_type(&a.entities().collect::<Vec<_>>(), &b.entities().collect::<Vec<_>>());
    assert_eq!(table.get("Markable").copied(), counts(2, 2));
}

#[test]
fn test_different_spans_never_agree() {
    let a = document("doc", &entity("1@e@doc@a", "0,5", "Markable", &[]));
    let b = document("doc", &entity("1@e@doc@b", "0,6", "Markable", &[]));

    let table = entity_agreement_by_type(&a.entities().collect::<Vec<_>>(), &b.entities().collect::<Vec<_>>());
    assert_eq!(table.get("Markable").copied(), counts(0, 2));
    assert_eq!(table.overall().ratio(), Some(0.0));
}

#[test]
fn test_disjoint_span_order_matters() {
    let a = document("doc", &entity("1@e@doc@a", "0,5;10,15", "EVENT", &[]));
    let b = document("doc", &entity("1@e@doc@b", "10,15;0,5", "EVENT", &[]));

    let table = entity_agreement_by_type(&a.entities().collect::<Vec<_>>(), &b.entities().collect::<Vec<_>>());
    assert_eq!(table.get("EVENT").copied(), counts(0, 2));
}

#[test]
fn test_fixture_entity_types() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);
    let config = IaaConfig::standard();

    let table = entity_agreement_by_type(&config.select(&left), &config.select(&right));
    assert_eq!(table.get("EVENT").copied(), counts(4, 6));
    assert_eq!(table.get("TIMEX3").copied(), counts(2, 4));
    assert_eq!(table.overall(), AgreementCounts::new(6, 10));
}

#[test]
fn test_fixture_properties() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);
    let config = IaaConfig::standard();

    let table = property_agreement_by_name(&config.select(&left), &config.select(&right));
    assert_eq!(table.get("Class").copied(), counts(2, 2));
    // 5@e has DocTimeRel, its partner 8@e has no properties at all
    assert_eq!(table.get("DocTimeRel").copied(), counts(4, 5));
    assert_eq!(table.get("Polarity").copied(), counts(0, 2));
    assert_eq!(table.overall(), AgreementCounts::new(6, 9));
}

#[test]
fn test_unmatched_entities_add_no_property_counts() {
    let a = document(
        "doc",
        &entity("1@e@doc@a", "0,5", "EVENT", &[("DocTimeRel", "BEFORE")]),
    );
    let b = document(
        "doc",
        &entity("1@e@doc@b", "6,9", "EVENT", &[("DocTimeRel", "BEFORE")]),
    );

    let table = property_agreement_by_name(&a.entities().collect::<Vec<_>>(), &b.entities().collect::<Vec<_>>());
    // seeded but never counted
    assert_eq!(table.get("DocTimeRel").copied(), counts(0, 0));
    assert_eq!(table.overall().ratio(), None);
}

#[test]
fn test_properties_on_both_sides_align_by_name() {
    let a = document(
        "doc",
        &entity("1@e@doc@a", "0,5", "EVENT", &[("DocTimeRel", "BEFORE"), ("Degree", "MOST")]),
    );
    let b = document(
        "doc",
        &entity("1@e@doc@b", "0,5", "EVENT", &[("Polarity", "POS"), ("DocTimeRel", "BEFORE")]),
    );

    let table = property_agreement_by_name(&a.entities().collect::<Vec<_>>(), &b.entities().collect::<Vec<_>>());
    assert_eq!(table.get("DocTimeRel").copied(), counts(2, 2));
    assert_eq!(table.get("Degree").copied(), counts(0, 1));
    assert_eq!(table.get("Polarity").copied(), counts(0, 1));
}

#[test]
fn test_fixture_relations() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);

    let entities = align_documents(&left, &right);
    let table = relation_agreement_by_type(&left, &right, &entities);
    // CONTAINS pair agrees, OVERLAP vs BEFORE does not
    assert_eq!(table.get("TLINK").copied(), counts(2, 4));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_relations_outside_the_selection_are_not_counted() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);

    // every haco tlink touches an EVENT; mpwe's 1@e -> 8@e links two TIMEX3s
    let config = IaaConfig::standard().with_entity_types(["TIMEX3"]);
    let left_entities = config.select(&left);
    let right_entities = config.select(&right);
    let entities = align_entities(left_entities.iter().copied(), right_entities.iter().copied());

    let table = relation_agreement_by_type(&left, &right, &entities);
    assert_eq!(table.get("TLINK").copied(), counts(0, 1));
}

#[test]
fn test_relations_between_selected_events() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);

    // only the two CONTAINS links join EVENTs on both sides
    let config = IaaConfig::standard().with_entity_types(["EVENT"]);
    let left_entities = config.select(&left);
    let right_entities = config.select(&right);
    let entities = align_entities(left_entities.iter().copied(), right_entities.iter().copied());

    let table = relation_agreement_by_type(&left, &right, &entities);
    assert_eq!(table.get("TLINK").copied(), counts(2, 2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_annotator_scope() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);
    let config = IaaConfig::annotator_only();

    let table = entity_agreement_by_type(&config.select(&left), &config.select(&right));
    assert_eq!(table.get("EVENT").copied(), counts(2, 4));
    assert_eq!(table.get("TIMEX3").copied(), counts(0, 2));
}

#[test]
fn test_entity_type_filter() {
    let left = load_fixture(HACO);
    let right = load_fixture(MPWE);
    let config = IaaConfig::standard().with_entity_types(["TIMEX3"]);

    let table = entity_agreement_by_type(&config.select(&left), &config.select(&right));
    assert_eq!(table.get("TIMEX3").copied(), counts(2, 4));
    assert_eq!(table.get("EVENT").copied(), None);
}

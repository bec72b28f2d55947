use std::path::Path;

use super::{document, entity, load_fixture, HACO, MPWE};
use crate::{format_report, AgreementCounts, IaaConfig, IaaError, IaaReport};

fn fixture_report(config: &IaaConfig) -> IaaReport {
    IaaReport::compute(&load_fixture(HACO), &load_fixture(MPWE), config)
}

#[test]
fn test_sides() {
    let report = fixture_report(&IaaConfig::standard());
    assert_eq!(report.left.document, "ID054_clinic_158");
    assert_eq!(report.left.annotator, "haco1069");
    assert_eq!(report.left.entities, 5);
    assert_eq!(report.right.annotator, "mpwe7720");
    assert_eq!(report.right.entities, 5);
}

#[test]
fn test_diff() {
    let report = fixture_report(&IaaConfig::standard());
    let diff = &report.diff;

    assert_eq!(diff.only_left, vec!["6@e@ID054_clinic_158@haco1069".to_string()]);
    assert_eq!(diff.only_right, vec!["9@e@ID054_clinic_158@mpwe7720".to_string()]);
    assert_eq!(diff.changed.len(), 2);

    let polarity = &diff.changed[0];
    assert_eq!(polarity.span, "45,53");
    assert_eq!(
        polarity.fields.get("properties.Polarity"),
        Some(&["POS".to_string(), "NEG".to_string()])
    );
    // ids differ on every other pair but are never reported
    assert!(diff.changed.iter().all(|c| !c.fields.contains_key("id")));

    let retyped = &diff.changed[1];
    assert_eq!(retyped.left_id, "5@e@ID054_clinic_158@haco1069");
    assert_eq!(retyped.right_id, "8@e@ID054_clinic_158@mpwe7720");
    assert_eq!(
        retyped.fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["properties.DocTimeRel", "type"]
    );
}

#[test]
fn test_identical_annotations_have_empty_diff() {
    let xml = entity("1@e@doc@a", "0,5", "EVENT", &[("DocTimeRel", "AFTER")]);
    let report = IaaReport::compute(&document("doc", &xml), &document("doc", &xml), &IaaConfig::standard());

    assert!(report.diff.is_empty());
    assert_eq!(report.entity_types.overall(), AgreementCounts::new(2, 2));
    assert_eq!(report.relations.as_ref().map(|r| r.is_empty()), Some(true));
}

#[test]
fn test_relations_can_be_switched_off() {
    let config = IaaConfig {
        relations: false,
        ..IaaConfig::standard()
    };
    let report = fixture_report(&config);
    assert!(report.relations.is_none());

    let json = report.to_json().unwrap();
    assert!(!json.contains("\"relations\""));
    assert!(!format_report(&report).contains("Relations"));
}

#[test]
fn test_json() {
    let report = fixture_report(&IaaConfig::standard());
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["left"]["annotator"], "haco1069");
    assert_eq!(value["entity_types"]["EVENT"]["agree"], 4);
    assert_eq!(value["entity_types"]["EVENT"]["total"], 6);
    assert_eq!(value["properties"]["Polarity"]["total"], 2);
    assert_eq!(value["relations"]["TLINK"]["agree"], 2);
    assert_eq!(
        value["diff"]["changed"][0]["fields"]["properties.Polarity"],
        serde_json::json!(["POS", "NEG"])
    );
}

#[test]
fn test_format_report() {
    let report = fixture_report(&IaaConfig::standard());

    insta::assert_snapshot!(format_report(&report), @r###"
    Agreement: ID054_clinic_158 [haco1069] (5 entities) vs ID054_clinic_158 [mpwe7720] (5 entities)

    Entity types
      type     agree  total  ratio
      EVENT        4      6  0.667
      TIMEX3       2      4  0.500
      overall      6     10  0.600

    Properties
      property    agree  total  ratio
      Class           2      2  1.000
      DocTimeRel      4      5  0.800
      Polarity        0      2  0.000
      overall         6      9  0.667

    Relations
      relation  agree  total  ratio
      TLINK         2      4  0.500
      overall       2      4  0.500

    Differences
      only in haco1069: 6@e@ID054_clinic_158@haco1069
      only in mpwe7720: 9@e@ID054_clinic_158@mpwe7720
      2@e@ID054_clinic_158@gold ~ 2@e@ID054_clinic_158@gold [45,53]
        properties.Polarity: "POS" vs "NEG"
      5@e@ID054_clinic_158@haco1069 ~ 8@e@ID054_clinic_158@mpwe7720 [83,92]
        properties.DocTimeRel: "AFTER" vs ""
        type: "EVENT" vs "TIMEX3"
    "###);
}

#[test]
fn test_compare_files() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let report =
        IaaReport::compare_files(fixtures.join(HACO), fixtures.join(MPWE), &IaaConfig::annotator_only())
            .unwrap();
    assert_eq!(report.left.entities, 3);
    assert_eq!(report.entity_types.get("EVENT"), Some(&AgreementCounts::new(2, 4)));
    // every tlink touches a pre-annotated entity
    assert_eq!(report.relations.as_ref().map(|table| table.is_empty()), Some(true));

    match IaaReport::compare_files(fixtures.join("missing.xml"), fixtures.join(MPWE), &IaaConfig::standard()) {
        Err(IaaError::Annotation(_)) => {}
        other => panic!("expected an annotation error, got {:?}", other.map(|_| ())),
    }
}

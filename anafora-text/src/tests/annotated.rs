use anafora::Span;

use super::{fixture_path, load_fixture, RAW};
use crate::{AnnotatedText, RawText, TextError, TextSpan};

fn entity_id(number: u32) -> String {
    format!("{}@e@ID054_clinic_160@gold", number)
}

#[test]
fn test_sections() {
    let text = load_fixture();
    let sections: Vec<(&str, usize, usize)> = text
        .sections()
        .iter()
        .map(|s| (s.id.as_str(), s.start, s.end))
        .collect();
    assert_eq!(sections, vec![("20112", 65, 178), ("20103", 188, 299)]);

    let first = text.section("20112").unwrap();
    assert_eq!(
        first.text,
        "\nPatient seen today at Clinique Médicale for follow-up of knee pain.\n"
    );
    assert!(text.has_section("20103"));
    assert!(!text.has_section("20104"));
}

#[test]
fn test_regex_search_stays_inside_sections() {
    let text = load_fixture();

    // the meta line carries the date twice but lies outside every section
    assert_eq!(text.raw().find_spans("03/05/2016").unwrap().len(), 2);
    assert!(text.find_text_spans_by_regex("03/05/2016").unwrap().is_empty());

    let found = text.find_text_spans_by_regex("[Pp]ain").unwrap();
    assert_eq!(
        found,
        vec![
            TextSpan::new(155, 159, "pain").in_section("20112"),
            TextSpan::new(240, 244, "Pain").in_section("20103"),
        ]
    );
}

#[test]
fn test_find_by_span() {
    let text = load_fixture();

    let found = text.find_text_spans_by_span(Span::new(226, 232).unwrap());
    assert_eq!(found, vec![TextSpan::new(226, 232, "400 mg").in_section("20103")]);

    // straddles the gap between sections
    assert!(text.find_text_spans_by_span(Span::new(170, 200).unwrap()).is_empty());
    // before the first section
    assert!(text.find_text_spans_by_span(Span::new(0, 5).unwrap()).is_empty());
}

#[test]
fn test_sections_matching() {
    let text = load_fixture();

    let ids: Vec<&str> = text
        .sections_matching(r"\d+ mg")
        .unwrap()
        .into_iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["20103"]);
    assert_eq!(text.sections_matching("(?i)pain").unwrap().len(), 2);
    assert!(matches!(text.sections_matching("("), Err(TextError::Pattern(_))));
}

#[test]
fn test_entity_text() {
    let text = load_fixture();
    let document = text.document();

    let follow_up = document.entity(&entity_id(2)).unwrap();
    assert_eq!(text.entity_text(follow_up), "follow-up");

    // disjoint spans are joined with a space
    let improved = document.entity(&entity_id(5)).unwrap();
    assert_eq!(text.entity_text(improved), "Pain improved");

    assert_eq!(text.span_text(&Span::new(106, 111).unwrap()), Some("today"));
}

#[test]
fn test_annotations_at() {
    let text = load_fixture();

    let knee = TextSpan::new(150, 154, "knee");
    assert!(text.is_annotation(&knee));
    let ids: Vec<&str> = text.annotations_at(&knee).iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![entity_id(3), entity_id(7)]);

    let pain = TextSpan::new(155, 159, "pain");
    assert!(!text.is_annotation(&pain));
    assert_eq!(text.annotations_at(&pain).len(), 1);

    // each half of a disjoint entity is not an annotation on its own
    assert!(!text.is_annotation(&TextSpan::new(240, 244, "Pain")));

    let reversed = TextSpan::new(154, 150, "knee");
    assert!(!text.is_annotation(&reversed));
    assert!(text.annotations_at(&reversed).is_empty());
}

#[test]
fn test_load_errors() {
    let missing = AnnotatedText::load(fixture_path("missing.xml"), fixture_path(RAW));
    assert!(matches!(missing, Err(TextError::Annotation(_))));

    match RawText::load(fixture_path("missing.txt")) {
        Err(TextError::Io { path, .. }) => assert!(path.ends_with("missing.txt")),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn test_raw_text_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[start section id=\"1\"]\nbody\n[end section id=\"1\"]").unwrap();

    let raw = RawText::load(file.path()).unwrap();
    assert_eq!(raw.name(), file.path().file_name().unwrap().to_string_lossy());
    insta::assert_debug_snapshot!(raw.sections(), @r###"
    [
        Section {
            id: "1",
            start: 0,
            end: 44,
            text: "body",
        },
    ]
    "###);
}

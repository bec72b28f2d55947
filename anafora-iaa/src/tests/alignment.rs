use proptest::prelude::*;

use super::{document, entity};
use crate::{align, align_documents};

/// Span strings drawn from a small pool so that collisions are common.
fn span_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0,5".to_string()),
        Just("6,9".to_string()),
        Just("10,15;20,25".to_string()),
        Just("30,31".to_string()),
    ]
}

proptest! {
    /// Every item lands in exactly one pair and no right item is reused.
    #[test]
    fn alignment_is_total(
        left in prop::collection::vec(0u8..6, 0..12),
        right in prop::collection::vec(0u8..6, 0..12),
    ) {
        let alignment = align(left.clone(), right.clone(), |a, b| a == b);
        prop_assert_eq!(alignment.len(), left.len() + right.len() - alignment.matched_count());

        let mut lefts: Vec<u8> = alignment.pairs().iter().filter_map(|(l, _)| *l).collect();
        let mut rights: Vec<u8> = alignment.pairs().iter().filter_map(|(_, r)| *r).collect();
        let (mut expected_left, mut expected_right) = (left.clone(), right.clone());
        lefts.sort_unstable();
        rights.sort_unstable();
        expected_left.sort_unstable();
        expected_right.sort_unstable();
        prop_assert_eq!(lefts, expected_left);
        prop_assert_eq!(rights, expected_right);
    }

    /// Matched pairs satisfy the predicate and come first, in left order.
    #[test]
    fn matched_pairs_come_first(
        left in prop::collection::vec(0u8..4, 0..10),
        right in prop::collection::vec(0u8..4, 0..10),
    ) {
        let alignment = align(left.iter().enumerate(), right.clone(), |(_, a), b| *a == b);
        let matched = alignment.matched_count();

        for (index, (l, r)) in alignment.pairs().iter().enumerate() {
            if index < matched {
                let ((_, a), b) = (l.unwrap(), r.unwrap());
                prop_assert_eq!(*a, b);
            } else {
                prop_assert!(l.is_none() || r.is_none());
            }
        }

        let positions: Vec<usize> = alignment.matched().map(|((i, _), _)| *i).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    /// Entities never align across different span sets.
    #[test]
    fn entities_align_on_equal_spans(
        left in prop::collection::vec(span_strategy(), 0..6),
        right in prop::collection::vec(span_strategy(), 0..6),
    ) {
        let body = |spans: &[String], annotator: &str| -> String {
            spans
                .iter()
                .enumerate()
                .map(|(i, span)| entity(&format!("{}@e@doc@{}", i + 1, annotator), span, "EVENT", &[]))
                .collect()
        };
        let a = document("doc", &body(&left, "a"));
        let b = document("doc", &body(&right, "b"));

        let alignment = align_documents(&a, &b);
        for (x, y) in alignment.matched() {
            prop_assert_eq!(x.spans(), y.spans());
        }
        for x in alignment.left_only() {
            prop_assert!(alignment.right_only().all(|y| y.spans() != x.spans()));
        }
    }
}

#[test]
fn test_entity_alignment_is_order_sensitive() {
    // every entity shares one span, so pairs follow file order and ignore type
    let a = document(
        "doc",
        &[
            entity("1@e@doc@a", "0,5", "EVENT", &[]),
            entity("2@e@doc@a", "0,5", "TIMEX3", &[]),
        ]
        .concat(),
    );
    let b = document(
        "doc",
        &[
            entity("1@e@doc@b", "0,5", "TIMEX3", &[]),
            entity("2@e@doc@b", "0,5", "EVENT", &[]),
        ]
        .concat(),
    );

    let pairs: Vec<(&str, &str)> = align_documents(&a, &b)
        .matched()
        .map(|(x, y)| (x.id(), y.id()))
        .collect();
    assert_eq!(pairs, vec![("1@e@doc@a", "1@e@doc@b"), ("2@e@doc@a", "2@e@doc@b")]);

    let reversed: Vec<(&str, &str)> = align_documents(&b, &a)
        .matched()
        .map(|(x, y)| (x.id(), y.id()))
        .collect();
    assert_eq!(reversed, vec![("1@e@doc@b", "1@e@doc@a"), ("2@e@doc@b", "2@e@doc@a")]);
}

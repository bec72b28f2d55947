//! Greedy one-to-one alignment of two annotation lists.
//!
//! Every left item takes the first still-unconsumed right item accepted by
//! the predicate. The result depends on input order and is not symmetric:
//! swapping the inputs can produce different pairs.

use anafora::{Document, Entity, Property};
use tracing::trace;

/// The pairs produced by [`align`].
///
/// Pairs come in three runs: matched pairs in left order, then left
/// leftovers, then right leftovers in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<L, R> {
    pairs: Vec<(Option<L>, Option<R>)>,
    matched: usize,
    left_only: usize,
}

impl<L, R> Alignment<L, R> {
    pub fn pairs(&self) -> &[(Option<L>, Option<R>)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(Option<L>, Option<R>)> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.matched
    }

    /// Pairs with an item on both sides.
    pub fn matched(&self) -> impl Iterator<Item = (&L, &R)> {
        self.pairs[..self.matched]
            .iter()
            .filter_map(|(l, r)| Some((l.as_ref()?, r.as_ref()?)))
    }

    /// Left items with no partner.
    pub fn left_only(&self) -> impl Iterator<Item = &L> {
        self.pairs[self.matched..self.matched + self.left_only]
            .iter()
            .filter_map(|(l, _)| l.as_ref())
    }

    /// Right items with no partner.
    pub fn right_only(&self) -> impl Iterator<Item = &R> {
        self.pairs[self.matched + self.left_only..]
            .iter()
            .filter_map(|(_, r)| r.as_ref())
    }
}

/// Pair up `left` and `right` greedily using `is_aligned`.
///
/// Every input item appears in exactly one pair, and a right item is never
/// matched twice, so the output has `len(left) + len(right) - matched` pairs.
pub fn align<L, R, I, J, F>(left: I, right: J, mut is_aligned: F) -> Alignment<L, R>
where
    I: IntoIterator<Item = L>,
    J: IntoIterator<Item = R>,
    F: FnMut(&L, &R) -> bool,
{
    let mut remaining: Vec<Option<R>> = right.into_iter().map(Some).collect();
    let mut pairs = Vec::with_capacity(remaining.len());
    let mut leftovers = Vec::new();

    for l in left {
        let hit = remaining
            .iter()
            .position(|slot| slot.as_ref().map_or(false, |r| is_aligned(&l, r)));
        match hit {
            Some(index) => {
                let r = remaining[index].take();
                pairs.push((Some(l), r));
            }
            None => leftovers.push(l),
        }
    }

    let matched = pairs.len();
    let left_only = leftovers.len();
    pairs.extend(leftovers.into_iter().map(|l| (Some(l), None)));
    pairs.extend(remaining.into_iter().flatten().map(|r| (None, Some(r))));

    trace!(matched, left_only, pairs = pairs.len(), "aligned");
    Alignment {
        pairs,
        matched,
        left_only,
    }
}

/// Align entities on identical span sets.
pub fn align_entities<'a, 'b>(
    left: impl IntoIterator<Item = &'a Entity>,
    right: impl IntoIterator<Item = &'b Entity>,
) -> Alignment<&'a Entity, &'b Entity> {
    align(left, right, |a, b| a.is_aligned_with(b))
}

/// Align every entity of two documents.
pub fn align_documents<'a, 'b>(
    left: &'a Document,
    right: &'b Document,
) -> Alignment<&'a Entity, &'b Entity> {
    align_entities(left.entities(), right.entities())
}

/// Align the properties of two entities on name, ignoring empty values.
pub fn align_properties<'a, 'b>(
    left: &'a Entity,
    right: &'b Entity,
) -> Alignment<&'a Property, &'b Property> {
    align(left.properties(), right.properties(), |a, b| a.is_aligned_with(b))
}

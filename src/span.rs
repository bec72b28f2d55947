//! Character spans as written in Anafora `<span>` elements.
//!
//! A span string is a `;`-separated list of `start,end` pairs, e.g.
//! `"120,128"` for a contiguous entity or `"120,128;140,145"` for a
//! disjoint one.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{AnaforaError, AnaforaResult};

/// A half-open character range `start..end`, always with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span, rejecting `start > end`.
    pub fn new(start: usize, end: usize) -> AnaforaResult<Self> {
        if start > end {
            return Err(AnaforaError::malformed_span(
                &format!("{},{}", start, end),
                "start is after end",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

/// The ordered, non-empty span list of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    /// Parse a span string.
    ///
    /// Every segment must be a `start,end` pair of non-negative integers with
    /// `start <= end`; anything else is a [`AnaforaError::MalformedSpan`].
    pub fn parse(input: &str) -> AnaforaResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AnaforaError::malformed_span(input, "empty span"));
        }

        let spans = trimmed
            .split(';')
            .map(|segment| parse_segment(input, segment))
            .collect::<AnaforaResult<Vec<_>>>()?;

        Ok(Self { spans })
    }

    /// Build a set from a single contiguous range.
    pub fn contiguous(start: usize, end: usize) -> AnaforaResult<Self> {
        Ok(Self {
            spans: vec![Span::new(start, end)?],
        })
    }

    /// Build a set from a list of spans, rejecting an empty list.
    pub fn from_spans(spans: Vec<Span>) -> AnaforaResult<Self> {
        if spans.is_empty() {
            return Err(AnaforaError::malformed_span("", "empty span"));
        }
        if let Some(reversed) = spans.iter().find(|span| span.start > span.end) {
            return Err(AnaforaError::malformed_span(
                &reversed.to_string(),
                "start is after end",
            ));
        }
        Ok(Self { spans })
    }

    pub fn is_disjointed(&self) -> bool {
        self.spans.len() > 1
    }

    /// Start of the first span.
    pub fn start(&self) -> usize {
        self.spans[0].start
    }

    /// End of the last span (the only span when contiguous).
    pub fn end(&self) -> usize {
        self.spans[self.spans.len() - 1].end
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[Span] {
        &self.spans
    }

    /// As `(start, end)` tuples in span-string order.
    pub fn to_pairs(&self) -> Vec<(usize, usize)> {
        self.spans.iter().map(|s| (s.start, s.end)).collect()
    }

    /// Returns true if any span of this set contains `span`.
    pub fn covers(&self, span: &Span) -> bool {
        self.spans.iter().any(|s| s.contains(span))
    }
}

fn parse_segment(input: &str, segment: &str) -> AnaforaResult<Span> {
    let (start, end) = segment
        .split_once(',')
        .ok_or_else(|| AnaforaError::malformed_span(input, format!("segment {:?} has no ','", segment)))?;
    let start = parse_offset(input, start)?;
    let end = parse_offset(input, end)?;
    if start > end {
        return Err(AnaforaError::malformed_span(
            input,
            format!("segment {:?} starts after it ends", segment),
        ));
    }
    Ok(Span { start, end })
}

fn parse_offset(input: &str, offset: &str) -> AnaforaResult<usize> {
    offset
        .trim()
        .parse::<usize>()
        .map_err(|e| AnaforaError::malformed_span(input, format!("offset {:?}: {}", offset, e)))
}

impl FromStr for SpanSet {
    type Err = AnaforaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpanSet::parse(s)
    }
}

impl fmt::Display for SpanSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", span)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SpanSet {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

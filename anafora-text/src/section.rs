//! `[start section id="..."]` ... `[end section id="..."]` blocks of clinical notes.

use anafora::Span;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::TextResult;
use crate::raw_text::RawText;
use crate::text_span::TextSpan;

static SECTION_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[start section id=.*?\[end section id=").expect("Invalid section block regex")
});

static SECTION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[start section id="(.*)""#).expect("Invalid section id regex"));

/// A section of the raw text.
///
/// `start..end` runs from the opening `[start section` marker to the end of
/// the `[end section id=` marker, in characters. `text` holds the lines in
/// between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Section {
    /// `start <= position < end`.
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    pub fn contains_span(&self, span: &Span) -> bool {
        self.contains(span.start()) && self.contains(span.end())
    }

    /// Matches of `pattern` lying entirely inside this section.
    pub fn find_text_spans_by_regex(&self, raw: &RawText, pattern: &str) -> TextResult<Vec<TextSpan>> {
        let regex = Regex::new(pattern)?;
        Ok(self.keep_inside(raw.text_spans(&regex)))
    }

    /// The text at `span`, if the span lies inside this section.
    pub fn text_span(&self, raw: &RawText, span: Span) -> Option<TextSpan> {
        if !self.contains_span(&span) {
            return None;
        }
        let text = raw.span_text(&span)?;
        Some(TextSpan::new(span.start(), span.end(), text).in_section(&self.id))
    }

    /// Whether `pattern` matches anywhere in the section text.
    pub fn matches(&self, pattern: &str) -> TextResult<bool> {
        Ok(Regex::new(pattern)?.is_match(&self.text))
    }

    pub(crate) fn keep_inside(&self, spans: Vec<TextSpan>) -> Vec<TextSpan> {
        spans
            .into_iter()
            .filter(|span| span.span().is_some_and(|span| self.contains_span(&span)))
            .map(|span| span.in_section(&self.id))
            .collect()
    }
}

pub(crate) fn parse_sections(raw: &RawText) -> Vec<Section> {
    let sections: Vec<Section> = raw
        .matches(&SECTION_BLOCK)
        .filter_map(|(span, block)| {
            let lines: Vec<&str> = block.split('\n').collect();
            let id = match SECTION_ID.captures(lines[0]).and_then(|c| c.get(1)) {
                Some(id) => id.as_str().to_string(),
                None => {
                    warn!(start = span.start(), "section without an id");
                    return None;
                }
            };
            let text = if lines.len() > 2 {
                lines[1..lines.len() - 1].join("\n")
            } else {
                String::new()
            };
            Some(Section {
                id,
                start: span.start(),
                end: span.end(),
                text,
            })
        })
        .collect();

    debug!(name = %raw.name(), sections = sections.len(), "parsed sections");
    sections
}

//! The raw text an annotation file refers to.
//!
//! Anafora spans count characters, not bytes. `RawText` keeps a table of
//! character boundaries so that regex matches (which report byte offsets)
//! and span lookups agree on the same positions.

use std::fs;
use std::path::Path;

use anafora::Span;
use regex::Regex;
use tracing::debug;

use crate::errors::{TextError, TextResult};
use crate::section::{parse_sections, Section};
use crate::text_span::TextSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    name: String,
    text: String,
    /// Byte offset of every character, followed by the text length.
    boundaries: Vec<usize>,
}

impl RawText {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            name: name.into(),
            text,
            boundaries,
        }
    }

    /// Read a raw text file. The file name becomes the text's name.
    pub fn load(path: impl AsRef<Path>) -> TextResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(name = %name, chars = text.chars().count(), "loaded raw text");
        Ok(Self::new(text, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The characters `start..end`, with `end` clamped to the text.
    ///
    /// Returns `None` when `start` lies past the (clamped) end.
    pub fn substring(&self, start: usize, end: usize) -> Option<&str> {
        let end = end.min(self.len());
        if start > end {
            return None;
        }
        Some(&self.text[self.boundaries[start]..self.boundaries[end]])
    }

    pub fn span_text(&self, span: &Span) -> Option<&str> {
        self.substring(span.start(), span.end())
    }

    /// Spans of every match of `pattern`.
    pub fn find_spans(&self, pattern: &str) -> TextResult<Vec<Span>> {
        let regex = Regex::new(pattern)?;
        Ok(self.matches(&regex).map(|(span, _)| span).collect())
    }

    /// Every match of `pattern` with its text.
    pub fn find_spans_with_text(&self, pattern: &str) -> TextResult<Vec<TextSpan>> {
        let regex = Regex::new(pattern)?;
        Ok(self.text_spans(&regex))
    }

    /// Spans running from each `start_marker` to the nearest following
    /// `end_marker`, across line breaks. Both markers are patterns.
    pub fn find_spans_between(&self, start_marker: &str, end_marker: &str) -> TextResult<Vec<Span>> {
        let regex = Regex::new(&format!("(?s)(?:{}).*?(?:{})", start_marker, end_marker))?;
        Ok(self.matches(&regex).map(|(span, _)| span).collect())
    }

    /// The `[start section ...]` blocks of this text, in order.
    pub fn sections(&self) -> Vec<Section> {
        parse_sections(self)
    }

    pub(crate) fn text_spans(&self, regex: &Regex) -> Vec<TextSpan> {
        self.matches(regex)
            .map(|(span, text)| TextSpan::new(span.start(), span.end(), text))
            .collect()
    }

    pub(crate) fn matches<'a>(&'a self, regex: &'a Regex) -> impl Iterator<Item = (Span, &'a str)> + 'a {
        regex.find_iter(&self.text).filter_map(move |m| {
            let span = Span::new(self.char_offset(m.start()), self.char_offset(m.end())).ok()?;
            Some((span, m.as_str()))
        })
    }

    /// Character index of a byte offset on a character boundary.
    fn char_offset(&self, byte: usize) -> usize {
        self.boundaries.partition_point(|&offset| offset < byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_counts_characters() {
        let raw = RawText::new("Clinique Médicale visit", "note");
        assert_eq!(raw.len(), 23);
        assert_eq!(raw.substring(9, 17), Some("Médicale"));
        assert_eq!(raw.substring(18, 100), Some("visit"));
        assert_eq!(raw.substring(30, 40), None);
        assert_eq!(raw.substring(5, 3), None);
    }

    #[test]
    fn test_find_spans_reports_character_offsets() {
        let raw = RawText::new("é pain, ü pain", "note");
        let spans = raw.find_spans("pain").unwrap();
        assert_eq!(spans, vec![Span::new(2, 6).unwrap(), Span::new(10, 14).unwrap()]);
        assert_eq!(raw.span_text(&spans[1]), Some("pain"));
    }

    #[test]
    fn test_find_spans_between_crosses_lines() {
        let raw = RawText::new("<a>one\ntwo</a> <a>three</a>", "note");
        let spans = raw.find_spans_between("<a>", "</a>").unwrap();
        assert_eq!(spans, vec![Span::new(0, 14).unwrap(), Span::new(15, 27).unwrap()]);
    }

    #[test]
    fn test_invalid_pattern() {
        let raw = RawText::new("text", "note");
        assert!(matches!(raw.find_spans("(unclosed"), Err(TextError::Pattern(_))));
    }
}

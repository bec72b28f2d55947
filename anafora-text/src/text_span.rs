//! A located piece of raw text.

use anafora::Span;
use serde::Serialize;

/// Where to cut a [`TextSpan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Truncation {
    /// A character index into the span's text.
    Index(usize),
    /// The first occurrence of this string in the span's text.
    Marker(String),
}

impl From<usize> for Truncation {
    fn from(index: usize) -> Self {
        Truncation::Index(index)
    }
}

impl From<&str> for Truncation {
    fn from(marker: &str) -> Self {
        Truncation::Marker(marker.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// Id of the section the span was found in.
    pub section: Option<String>,
}

impl TextSpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            section: None,
        }
    }

    pub fn in_section(mut self, id: impl Into<String>) -> Self {
        self.section = Some(id.into());
        self
    }

    /// `None` when the offsets are reversed.
    pub fn span(&self) -> Option<Span> {
        Span::new(self.start, self.end).ok()
    }

    /// Drop everything before the cut point.
    ///
    /// A marker is dropped along with what precedes it. Returns `false` and
    /// leaves the span unchanged when the marker is absent or the index lies
    /// past the text.
    pub fn truncate_from_start(&mut self, truncation: impl Into<Truncation>) -> bool {
        let index = match truncation.into() {
            Truncation::Index(index) => index,
            Truncation::Marker(marker) => match self.find(&marker) {
                Some(index) => index + marker.chars().count(),
                None => return false,
            },
        };
        if index > self.char_len() {
            return false;
        }

        self.text = self.text.chars().skip(index).collect();
        self.start += index;
        true
    }

    /// Drop the cut point and everything after it.
    ///
    /// Returns `false` and leaves the span unchanged when the marker is
    /// absent or the index lies past the text.
    pub fn truncate_from_end(&mut self, truncation: impl Into<Truncation>) -> bool {
        let index = match truncation.into() {
            Truncation::Index(index) => index,
            Truncation::Marker(marker) => match self.find(&marker) {
                Some(index) => index,
                None => return false,
            },
        };
        let len = self.char_len();
        if index > len {
            return false;
        }

        self.text = self.text.chars().take(index).collect();
        self.end = self.end.saturating_sub(len - index);
        true
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character index of the first occurrence of `marker`.
    fn find(&self, marker: &str) -> Option<usize> {
        let byte = self.text.find(marker)?;
        Some(self.text[..byte].chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dose() -> TextSpan {
        TextSpan::new(216, 238, "Ibuprofen 400 mg daily")
    }

    #[test]
    fn test_truncate_from_end_by_marker() {
        let mut span = dose();
        assert!(span.truncate_from_end(" 400"));
        assert_eq!(span, TextSpan::new(216, 225, "Ibuprofen"));
    }

    #[test]
    fn test_truncate_from_start_by_marker() {
        let mut span = dose();
        assert!(span.truncate_from_start("mg "));
        assert_eq!(span, TextSpan::new(233, 238, "daily"));
    }

    #[test]
    fn test_truncate_by_index() {
        let mut span = dose();
        assert!(span.truncate_from_start(10));
        assert!(span.truncate_from_end(3));
        assert_eq!(span, TextSpan::new(226, 229, "400"));
    }

    #[test]
    fn test_missing_marker_leaves_span_alone() {
        let mut span = dose();
        assert!(!span.truncate_from_start("aspirin"));
        assert!(!span.truncate_from_end(Truncation::Marker("aspirin".into())));
        assert!(!span.truncate_from_end(99));
        assert_eq!(span, dose());
    }

    #[test]
    fn test_truncation_counts_characters() {
        let mut span = TextSpan::new(10, 18, "Médicale").in_section("20112");
        assert!(span.truncate_from_start("é"));
        assert_eq!(span.text, "dicale");
        assert_eq!(span.start, 12);
        assert_eq!(span.section.as_deref(), Some("20112"));
    }

    #[test]
    fn test_truncation_of_text_longer_than_its_offsets() {
        let mut span = TextSpan::new(0, 3, "a long text");
        assert!(span.truncate_from_end(1));
        assert_eq!(span.text, "a");
        assert_eq!(span.end, 0);
        assert_eq!(span.span(), Span::new(0, 0).ok());

        let reversed = TextSpan::new(5, 2, "ab");
        assert_eq!(reversed.span(), None);
    }
}

//! An annotation file paired with the raw text it annotates.

use std::path::Path;

use anafora::{Document, Entity, Span};
use regex::Regex;
use tracing::debug;

use crate::errors::TextResult;
use crate::raw_text::RawText;
use crate::section::Section;
use crate::text_span::TextSpan;

#[derive(Debug, Clone)]
pub struct AnnotatedText {
    document: Document,
    raw: RawText,
    sections: Vec<Section>,
}

impl AnnotatedText {
    pub fn new(document: Document, raw: RawText) -> Self {
        let sections = raw.sections();
        debug!(
            document = %document.name(),
            sections = sections.len(),
            entities = document.entity_count(),
            "paired annotations with raw text"
        );
        Self {
            document,
            raw,
            sections,
        }
    }

    pub fn load(annotation: impl AsRef<Path>, raw: impl AsRef<Path>) -> TextResult<Self> {
        let document = Document::load(annotation)?;
        let raw = RawText::load(raw)?;
        Ok(Self::new(document, raw))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn raw(&self) -> &RawText {
        &self.raw
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Matches of `pattern` inside any section, in section order.
    ///
    /// Text outside every section is never searched.
    pub fn find_text_spans_by_regex(&self, pattern: &str) -> TextResult<Vec<TextSpan>> {
        let regex = Regex::new(pattern)?;
        let matches = self.raw.text_spans(&regex);
        Ok(self
            .sections
            .iter()
            .flat_map(|section| section.keep_inside(matches.clone()))
            .collect())
    }

    /// The text at `span`, once for every section containing it.
    pub fn find_text_spans_by_span(&self, span: Span) -> Vec<TextSpan> {
        let mut found = Vec::new();
        for section in &self.sections {
            if section.start > span.end() {
                break;
            }
            if let Some(text_span) = section.text_span(&self.raw, span) {
                found.push(text_span);
            }
        }
        found
    }

    /// Sections whose text matches `pattern` anywhere.
    pub fn sections_matching(&self, pattern: &str) -> TextResult<Vec<&Section>> {
        let regex = Regex::new(pattern)?;
        Ok(self
            .sections
            .iter()
            .filter(|section| regex.is_match(&section.text))
            .collect())
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// The entity's span texts joined by a single space.
    pub fn entity_text(&self, entity: &Entity) -> String {
        entity
            .spans()
            .iter()
            .filter_map(|span| self.raw.span_text(span))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn span_text(&self, span: &Span) -> Option<&str> {
        self.raw.span_text(span)
    }

    /// Whether some entity has exactly this span.
    pub fn is_annotation(&self, text_span: &TextSpan) -> bool {
        let Some(span) = text_span.span() else {
            return false;
        };
        self.document
            .entities()
            .any(|entity| entity.spans().as_slice() == [span])
    }

    /// Entities with a span containing the text span.
    pub fn annotations_at(&self, text_span: &TextSpan) -> Vec<&Entity> {
        match text_span.span() {
            Some(span) => self.document.entities_covering(&span),
            None => Vec::new(),
        }
    }
}

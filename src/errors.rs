//! Error types for the annotation model.
//!
//! Missing optional text nodes are not errors: they read as the empty string.
//! Structural problems that downstream span arithmetic or id lookups cannot
//! recover from are surfaced here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, querying or writing a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum AnaforaError {
    /// A span segment is not a well-formed `start,end` integer pair.
    #[error("malformed span {span:?}: {reason}")]
    MalformedSpan { span: String, reason: String },

    /// An id does not follow `<number>@<kind>@<document>@<annotator>`.
    #[error("malformed annotation id {id:?}: {reason}")]
    MalformedId { id: String, reason: String },

    /// A relation (or caller) referenced an id absent from the document.
    #[error("unresolved reference to {id:?}")]
    UnresolvedReference { id: String },

    /// An operation only defined for one annotation kind received the other.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A required structural element is absent.
    #[error("missing <{element}> element")]
    MissingElement { element: String },

    /// The input ended before an element was closed.
    #[error("unclosed <{element}> element")]
    UnclosedElement { element: String },

    /// The XML itself could not be read.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Reading or writing an annotation file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnaforaError {
    pub(crate) fn malformed_span(span: &str, reason: impl Into<String>) -> Self {
        AnaforaError::MalformedSpan {
            span: span.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unresolved(id: &str) -> Self {
        AnaforaError::UnresolvedReference { id: id.to_string() }
    }
}

/// Result type for annotation operations.
pub type AnaforaResult<T> = Result<T, AnaforaError>;

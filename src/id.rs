//! Structured annotation identifiers.
//!
//! Anafora ids look like `12@e@ID054_clinic_158@gold`: a sequence number, the
//! annotation kind (`e` entity, `r` relation), the document name and the
//! annotator. Sequence numbers are only unique within one document, so any
//! lookup across documents keys on the full string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AnaforaError, AnaforaResult};

/// Annotator name reserved for pre-annotated (gold) material.
pub const GOLD_ANNOTATOR: &str = "gold";

/// Which table an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    Entity,
    Relation,
}

impl IdKind {
    pub fn code(&self) -> &'static str {
        match self {
            IdKind::Entity => "e",
            IdKind::Relation => "r",
        }
    }
}

/// A parsed `<number>@<kind>@<document>@<annotator>` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId {
    pub number: u64,
    pub kind: IdKind,
    pub document: String,
    pub annotator: String,
}

impl AnnotationId {
    pub fn new(number: u64, kind: IdKind, document: &str, annotator: &str) -> Self {
        Self {
            number,
            kind,
            document: document.to_string(),
            annotator: annotator.to_string(),
        }
    }

    pub fn parse(raw: &str) -> AnaforaResult<Self> {
        let malformed = |reason: &str| AnaforaError::MalformedId {
            id: raw.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = raw.trim().split('@').collect();
        if parts.len() != 4 {
            return Err(malformed("expected four '@'-separated parts"));
        }

        let number = parts[0]
            .parse::<u64>()
            .map_err(|_| malformed("sequence number is not an integer"))?;
        let kind = match parts[1] {
            "e" => IdKind::Entity,
            "r" => IdKind::Relation,
            _ => return Err(malformed("kind must be 'e' or 'r'")),
        };

        Ok(Self {
            number,
            kind,
            document: parts[2].to_string(),
            annotator: parts[3].to_string(),
        })
    }

    pub fn is_gold(&self) -> bool {
        self.annotator == GOLD_ANNOTATOR
    }
}

impl FromStr for AnnotationId {
    type Err = AnaforaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotationId::parse(s)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}@{}@{}",
            self.number,
            self.kind.code(),
            self.document,
            self.annotator
        )
    }
}

/// Sequence number of a raw id, if its first part is an integer.
pub fn sequence_number(raw: &str) -> Option<u64> {
    raw.trim().split('@').next()?.parse().ok()
}

/// Annotator part of a raw id (the text after the last `@`).
pub fn annotator_of(raw: &str) -> &str {
    raw.rsplit('@').next().unwrap_or(raw)
}

/// Document part of a raw id, when the id is well formed.
pub fn document_of(raw: &str) -> Option<&str> {
    let mut parts = raw.trim().split('@');
    let _number = parts.next()?;
    let _kind = parts.next()?;
    let document = parts.next()?;
    parts.next()?;
    Some(document)
}

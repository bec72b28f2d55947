//! Typed model of Anafora annotation files.
//!
//! An Anafora file is an XML document holding entities (typed character
//! spans) and relations (typed links between entities) over one raw text.
//! This crate reads such a file into a [`Document`], keeps an id index over
//! its entities and a per-kind partition of its relations, and writes every
//! edit back out as XML.
//!
//! ## Modules
//!
//! - [`xml`] - Owned element tree, parsing and pretty-printing
//! - [`span`] - `start,end;start,end` span strings
//! - [`id`] - `<number>@<kind>@<document>@<annotator>` identifiers
//! - [`entity`], [`relation`], [`property`] - Annotation models
//! - [`document`] - One annotation file with its indexes and mutations
//! - [`corpus`] - Several documents, for cross-document references
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use anafora::Document;
//!
//! let xml = r#"<data>
//!   <info><progress>completed</progress><savetime>now</savetime></info>
//!   <annotations>
//!     <entity><id>1@e@note@gold</id><span>0,7</span><type>EVENT</type></entity>
//!   </annotations>
//! </data>"#;
//!
//! let mut doc = Document::parse(xml, "note.xml").unwrap();
//! let added = doc.add_entity("gold", (20, 30), "Markable", "TemporalEntities").unwrap();
//! assert_eq!(added.id(), "2@e@note@gold");
//! ```

pub mod annotation;
pub mod corpus;
pub mod document;
pub mod entity;
pub mod errors;
pub mod id;
pub mod property;
pub mod relation;
pub mod schema;
pub mod span;
pub mod xml;

pub use annotation::AnnotationRef;
pub use corpus::Corpus;
pub use document::Document;
pub use entity::Entity;
pub use errors::{AnaforaError, AnaforaResult};
pub use id::{AnnotationId, IdKind, GOLD_ANNOTATOR};
pub use property::Property;
pub use relation::{Relation, RelationKind};
pub use schema::Schema;
pub use span::{Span, SpanSet};

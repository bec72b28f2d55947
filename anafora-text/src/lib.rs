//! Raw-text access for Anafora annotation files.
//!
//! Anafora stores annotations apart from the text they mark up. This crate
//! loads that text, finds spans in it by pattern, splits clinical notes into
//! their `[start section id="..."]` blocks, and resolves entity spans back to
//! the words they cover.
//!
//! ## Modules
//!
//! - [`raw_text`] - Character-offset text with pattern search
//! - [`section`] - Section markers and per-section search
//! - [`text_span`] - Located text and truncation
//! - [`annotated`] - Annotations and raw text together
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use anafora_text::RawText;
//!
//! let raw = RawText::new("Seen at Clinique Médicale for knee pain.", "note");
//! let spans = raw.find_spans("knee pain").unwrap();
//! assert_eq!((spans[0].start(), spans[0].end()), (30, 39));
//! ```

pub mod annotated;
pub mod errors;
pub mod raw_text;
pub mod section;
pub mod text_span;

pub use annotated::AnnotatedText;
pub use errors::{TextError, TextResult};
pub use raw_text::RawText;
pub use section::Section;
pub use text_span::{TextSpan, Truncation};

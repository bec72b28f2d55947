//! Inter-annotator agreement for Anafora annotation files.
//!
//! Two annotators mark up the same raw text independently; this crate aligns
//! their entities on identical span sets and counts how often they agree.
//!
//! ## Modules
//!
//! - [`align`] - Greedy one-to-one alignment engine
//! - [`agreement`] - Per-type, per-property and per-relation agreement counts
//! - [`diff`] - Field-level differences between aligned entities
//! - [`config`] - Entity scope and type filters, loadable from TOML
//! - [`report`] - Everything above for one document pair, serializable to JSON
//! - [`formatter`] - Plain-text rendering of reports
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```no_run
//! use anafora_iaa::{format_report, IaaConfig, IaaReport};
//!
//! let report = IaaReport::compare_files(
//!     "ID054_clinic_158.Temporal.haco1069.completed.xml",
//!     "ID054_clinic_158.Temporal.mpwe7720.completed.xml",
//!     &IaaConfig::standard(),
//! )
//! .unwrap();
//! println!("{}", format_report(&report));
//! ```

pub mod agreement;
pub mod align;
pub mod config;
pub mod diff;
pub mod errors;
pub mod formatter;
pub mod report;

pub use agreement::{
    entity_agreement_by_type, property_agreement_by_name, relation_agreement_by_type,
    AgreementCounts, AgreementTable,
};
pub use align::{align, align_documents, align_entities, align_properties, Alignment};
pub use config::{EntityScope, IaaConfig};
pub use diff::{diff_documents, DocumentDiff, EntityChange};
pub use errors::{IaaError, IaaResult};
pub use formatter::{format_diff, format_report, format_table};
pub use report::{IaaReport, Side};

//! Agreement between two annotations of one document, bundled for output.

use anafora::Document;
use serde::Serialize;
use tracing::info;

use crate::agreement::{
    entity_agreement_by_type, property_agreement_by_name, relation_agreement_by_type,
    AgreementTable,
};
use crate::align::align_entities;
use crate::config::IaaConfig;
use crate::diff::{diff_documents, DocumentDiff};
use crate::errors::IaaResult;

/// Which annotation a side of the report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Side {
    pub document: String,
    pub annotator: String,
    /// Entities selected for comparison.
    pub entities: usize,
}

impl Side {
    fn of(document: &Document, entities: usize) -> Self {
        Self {
            document: document.name().to_string(),
            annotator: document.annotator().to_string(),
            entities,
        }
    }
}

/// Type, property and relation agreement plus the entity diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IaaReport {
    pub left: Side,
    pub right: Side,
    pub entity_types: AgreementTable,
    pub properties: AgreementTable,
    /// Absent when relation agreement is switched off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<AgreementTable>,
    pub diff: DocumentDiff,
}

impl IaaReport {
    pub fn compute(left: &Document, right: &Document, config: &IaaConfig) -> Self {
        let left_entities = config.select(left);
        let right_entities = config.select(right);

        let relations = if config.relations {
            let alignment =
                align_entities(left_entities.iter().copied(), right_entities.iter().copied());
            Some(relation_agreement_by_type(left, right, &alignment))
        } else {
            None
        };

        let report = Self {
            left: Side::of(left, left_entities.len()),
            right: Side::of(right, right_entities.len()),
            entity_types: entity_agreement_by_type(&left_entities, &right_entities),
            properties: property_agreement_by_name(&left_entities, &right_entities),
            relations,
            diff: diff_documents(&left_entities, &right_entities),
        };

        info!(
            left = %report.left.annotator,
            right = %report.right.annotator,
            agree = report.entity_types.overall().agree,
            total = report.entity_types.overall().total,
            "computed agreement"
        );
        report
    }

    /// Load two files and compare them.
    pub fn compare_files(
        left: impl AsRef<std::path::Path>,
        right: impl AsRef<std::path::Path>,
        config: &IaaConfig,
    ) -> IaaResult<Self> {
        let left = Document::load(left)?;
        let right = Document::load(right)?;
        Ok(Self::compute(&left, &right, config))
    }

    pub fn to_json(&self) -> IaaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

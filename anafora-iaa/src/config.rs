//! Which annotations an agreement report looks at.

use std::fs;
use std::path::Path;

use anafora::{Document, Entity};
use serde::{Deserialize, Serialize};

use crate::errors::{IaaError, IaaResult};

/// Entity subset selected by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityScope {
    /// Every entity.
    #[default]
    All,
    /// Only entities created by the annotator (id not ending in `@gold`).
    AnnotatorOnly,
    /// Only pre-annotated `@gold` entities.
    PreannotatedOnly,
}

impl EntityScope {
    pub fn includes(&self, entity: &Entity) -> bool {
        match self {
            EntityScope::All => true,
            EntityScope::AnnotatorOnly => !entity.preannotated(),
            EntityScope::PreannotatedOnly => entity.preannotated(),
        }
    }
}

/// Agreement report configuration.
///
/// Loadable from TOML:
///
/// ```toml
/// scope = "annotator-only"
/// entity_types = ["EVENT", "TIMEX3"]
/// relations = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IaaConfig {
    pub scope: EntityScope,
    /// Entity types to compare; empty means every type.
    pub entity_types: Vec<String>,
    /// Whether to compute relation agreement.
    pub relations: bool,
}

impl IaaConfig {
    /// Every entity and relation.
    pub fn standard() -> Self {
        Self {
            scope: EntityScope::All,
            entity_types: Vec::new(),
            relations: true,
        }
    }

    /// Only what the annotator added on top of the pre-annotation.
    pub fn annotator_only() -> Self {
        Self {
            scope: EntityScope::AnnotatorOnly,
            ..Self::standard()
        }
    }

    /// Restrict to the given entity types.
    pub fn with_entity_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.entity_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Load from a TOML file. Missing keys take their standard values.
    pub fn load(path: &Path) -> IaaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| IaaError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| IaaError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn includes(&self, entity: &Entity) -> bool {
        self.scope.includes(entity)
            && (self.entity_types.is_empty()
                || self.entity_types.iter().any(|t| t == entity.entity_type()))
    }

    /// The document's entities this configuration selects, in file order.
    pub fn select<'a>(&self, document: &'a Document) -> Vec<&'a Entity> {
        document.entities().filter(|e| self.includes(e)).collect()
    }
}

impl Default for IaaConfig {
    fn default() -> Self {
        Self::standard()
    }
}

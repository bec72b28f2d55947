//! A borrowed view over either annotation kind.

use std::collections::BTreeSet;

use crate::entity::Entity;
use crate::errors::{AnaforaError, AnaforaResult};
use crate::relation::Relation;

/// An entity or a relation looked up by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationRef<'a> {
    Entity(&'a Entity),
    Relation(&'a Relation),
}

impl<'a> AnnotationRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            AnnotationRef::Entity(entity) => entity.id(),
            AnnotationRef::Relation(relation) => relation.id(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AnnotationRef::Entity(_) => "entity",
            AnnotationRef::Relation(_) => "relation",
        }
    }

    pub fn as_entity(&self) -> Option<&'a Entity> {
        match self {
            AnnotationRef::Entity(entity) => Some(entity),
            AnnotationRef::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&'a Relation> {
        match self {
            AnnotationRef::Relation(relation) => Some(relation),
            AnnotationRef::Entity(_) => None,
        }
    }

    /// Compare the referenced entity sets of two relations.
    ///
    /// Only relations reference entities; passing an entity on either side
    /// is a [`AnaforaError::TypeMismatch`].
    pub fn same_entity_set(&self, other: &AnnotationRef<'_>) -> AnaforaResult<bool> {
        let ours = self.relation_or_mismatch()?;
        let theirs = other.relation_or_mismatch()?;
        let ours: BTreeSet<&str> = ours.entity_ids().into_iter().collect();
        let theirs: BTreeSet<&str> = theirs.entity_ids().into_iter().collect();
        Ok(ours == theirs)
    }

    fn relation_or_mismatch(&self) -> AnaforaResult<&'a Relation> {
        self.as_relation().ok_or(AnaforaError::TypeMismatch {
            expected: "relation",
            found: self.kind_name(),
        })
    }
}

//! One annotation file: metadata, the entity table and the relation list.
//!
//! A [`Document`] is assembled once from the element tree. Entities are
//! indexed by their full id string and relations are partitioned by
//! [`RelationKind`]; every mutation goes through the document so these
//! indexes stay in step with the annotation list.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::annotation::AnnotationRef;
use crate::entity::Entity;
use crate::errors::{AnaforaError, AnaforaResult};
use crate::id::{self, IdKind};
use crate::property::Property;
use crate::relation::{Relation, RelationKind, SUBTYPE_PROPERTY};
use crate::schema::Schema;
use crate::span::{Span, SpanSet};
use crate::xml::{self, XmlElement, XmlNode};

/// Relation `type` written by [`Document::add_tlink`].
pub const TLINK_TYPE: &str = "TLINK";
/// Relation `parentsType` written by [`Document::add_tlink`].
pub const TEMPORAL_RELATIONS: &str = "TemporalRelations";

/// A child of `<annotations>`, in file order.
#[derive(Debug, Clone)]
enum Annotation {
    Entity(Entity),
    Relation(Relation),
    /// Elements kept only so they are written back unchanged: unknown tags
    /// and entities whose id was already taken.
    Verbatim(XmlElement),
}

impl Annotation {
    fn as_entity(&self) -> Option<&Entity> {
        match self {
            Annotation::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    fn as_relation(&self) -> Option<&Relation> {
        match self {
            Annotation::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    fn to_element(&self) -> XmlElement {
        match self {
            Annotation::Entity(entity) => entity.to_element(),
            Annotation::Relation(relation) => relation.to_element(),
            Annotation::Verbatim(element) => element.clone(),
        }
    }
}

/// An Anafora annotation file.
#[derive(Debug, Clone)]
pub struct Document {
    filename: String,
    name: String,
    /// `data/info/progress`, e.g. `completed`.
    pub status: String,
    /// `data/info/savetime`.
    pub savetime: String,
    pub schema: Schema,
    annotations: Vec<Annotation>,
    entity_index: HashMap<String, usize>,
    entity_order: Vec<usize>,
    relation_index: HashMap<String, usize>,
    relation_order: Vec<usize>,
    tlinks: Vec<usize>,
    partitions: BTreeMap<RelationKind, Vec<usize>>,
    /// The parsed tree with `<annotations>` emptied; refilled by [`Document::to_tree`].
    root: XmlElement,
}

impl Document {
    /// Parse annotation XML. `filename` names the file the text came from.
    pub fn parse(xml: &str, filename: &str) -> AnaforaResult<Self> {
        Self::from_tree(xml::parse_document(xml)?, filename)
    }

    pub fn load(path: impl AsRef<Path>) -> AnaforaResult<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|source| AnaforaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&xml, &filename)
    }

    /// Build a document from an already parsed `<data>` tree.
    pub fn from_tree(mut root: XmlElement, filename: &str) -> AnaforaResult<Self> {
        if root.name != "data" {
            return Err(AnaforaError::MissingElement {
                element: "data".to_string(),
            });
        }

        let status = root
            .path(&["info", "progress"])
            .map(XmlElement::text)
            .unwrap_or_default();
        let savetime = root
            .path(&["info", "savetime"])
            .map(XmlElement::text)
            .unwrap_or_default();
        let schema = root
            .child("schema")
            .map(Schema::from_element)
            .unwrap_or_default();

        let children = match root.child_mut("annotations") {
            Some(container) => std::mem::take(&mut container.children),
            None => Vec::new(),
        };

        let mut seen = BTreeSet::new();
        let mut annotations = Vec::with_capacity(children.len());
        for node in children {
            let element = match node {
                XmlNode::Element(element) => element,
                XmlNode::Text(_) => continue,
            };
            let annotation = match element.name.as_str() {
                "entity" => {
                    let entity = Entity::from_element(&element)?;
                    if seen.insert(entity.id().to_string()) {
                        Annotation::Entity(entity)
                    } else {
                        warn!(id = %entity.id(), filename, "duplicate entity id, keeping the first");
                        Annotation::Verbatim(element)
                    }
                }
                "relation" => Annotation::Relation(Relation::from_element(&element)),
                _ => Annotation::Verbatim(element),
            };
            annotations.push(annotation);
        }

        let mut document = Self {
            filename: filename.to_string(),
            name: document_name(filename),
            status,
            savetime,
            schema,
            annotations,
            entity_index: HashMap::new(),
            entity_order: Vec::new(),
            relation_index: HashMap::new(),
            relation_order: Vec::new(),
            tlinks: Vec::new(),
            partitions: BTreeMap::new(),
            root,
        };
        document.reindex();

        debug!(
            document = %document.name,
            entities = document.entity_order.len(),
            relations = document.relation_order.len(),
            "assembled document"
        );
        Ok(document)
    }

    /// Rebuild every derived index from the annotation list.
    fn reindex(&mut self) {
        self.entity_index.clear();
        self.entity_order.clear();
        self.relation_index.clear();
        self.relation_order.clear();
        self.tlinks.clear();
        self.partitions.clear();

        for (position, annotation) in self.annotations.iter().enumerate() {
            match annotation {
                Annotation::Entity(entity) => {
                    self.entity_index.insert(entity.id().to_string(), position);
                    self.entity_order.push(position);
                }
                Annotation::Relation(relation) => {
                    self.relation_index
                        .entry(relation.id().to_string())
                        .or_insert(position);
                    self.relation_order.push(position);
                    if relation.kind().is_tlink() {
                        self.tlinks.push(position);
                    }
                    self.partitions
                        .entry(relation.kind())
                        .or_default()
                        .push(position);
                }
                Annotation::Verbatim(_) => {}
            }
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The filename up to its first `.`; the document part of minted ids.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- entities ----

    /// Entities in file order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entity_order
            .iter()
            .filter_map(move |&position| self.annotations[position].as_entity())
    }

    pub fn entity_count(&self) -> usize {
        self.entity_order.len()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        let position = *self.entity_index.get(id)?;
        self.annotations[position].as_entity()
    }

    /// Mutable access for field edits. The id itself cannot change.
    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        let position = *self.entity_index.get(id)?;
        match &mut self.annotations[position] {
            Annotation::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn contains_entity(&self, id: &str) -> bool {
        self.entity_index.contains_key(id)
    }

    /// Distinct entity types, sorted.
    pub fn entity_types(&self) -> Vec<&str> {
        let types: BTreeSet<&str> = self.entities().map(Entity::entity_type).collect();
        types.into_iter().collect()
    }

    /// Distinct entity property names, sorted.
    pub fn property_names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .entities()
            .flat_map(|entity| entity.properties().iter().map(|p| p.name.as_str()))
            .collect();
        names.into_iter().collect()
    }

    /// The annotator of the first entity not marked `gold`.
    ///
    /// Falls back to the first entity's annotator, then to `""`.
    pub fn annotator(&self) -> &str {
        self.entities()
            .map(Entity::annotator)
            .find(|annotator| *annotator != id::GOLD_ANNOTATOR)
            .or_else(|| self.entities().next().map(Entity::annotator))
            .unwrap_or("")
    }

    pub fn preannotated_entities(&self) -> Vec<&Entity> {
        self.entities().filter(|e| e.preannotated()).collect()
    }

    pub fn annotator_entities(&self) -> Vec<&Entity> {
        self.entities().filter(|e| !e.preannotated()).collect()
    }

    /// Entities with a span containing `span`.
    pub fn entities_covering(&self, span: &Span) -> Vec<&Entity> {
        self.entities().filter(|e| e.covers(span)).collect()
    }

    /// Largest entity sequence number, 0 for a document without entities.
    pub fn max_entity_id(&self) -> u64 {
        self.entities()
            .filter_map(|e| id::sequence_number(e.id()))
            .max()
            .unwrap_or(0)
    }

    /// Largest relation sequence number, 0 for a document without relations.
    pub fn max_relation_id(&self) -> u64 {
        self.relations()
            .filter_map(|r| id::sequence_number(r.id()))
            .max()
            .unwrap_or(0)
    }

    // ---- relations ----

    /// Relations in file order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_at(&self.relation_order)
    }

    fn relations_at<'a>(&'a self, positions: &'a [usize]) -> impl Iterator<Item = &'a Relation> + 'a {
        positions
            .iter()
            .filter_map(move |&position| self.annotations[position].as_relation())
    }

    pub fn relation_count(&self) -> usize {
        self.relation_order.len()
    }

    /// The first relation with the given id.
    pub fn relation(&self, id: &str) -> Option<&Relation> {
        let position = *self.relation_index.get(id)?;
        self.annotations[position].as_relation()
    }

    /// Plain and contains-subevent TLINKs.
    pub fn tlinks(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_at(&self.tlinks)
    }

    pub fn relations_of_kind(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> + '_ {
        let positions = self
            .partitions
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default();
        self.relations_at(positions)
    }

    pub fn contains_subevent_tlinks(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_of_kind(RelationKind::ContainsSubevent)
    }

    pub fn identical_chains(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_of_kind(RelationKind::IdenticalChain)
    }

    pub fn set_subsets(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_of_kind(RelationKind::SetSubset)
    }

    pub fn whole_parts(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_of_kind(RelationKind::WholePart)
    }

    pub fn generic_relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations_of_kind(RelationKind::Generic)
    }

    /// Resolve every entity a relation references.
    pub fn relation_entities(&self, relation: &Relation) -> AnaforaResult<Vec<&Entity>> {
        relation
            .entity_ids()
            .into_iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    /// Resolve the head entity, `None` for relations without roles.
    pub fn relation_head(&self, relation: &Relation) -> AnaforaResult<Option<&Entity>> {
        relation.head_id().map(|id| self.resolve(id)).transpose()
    }

    pub fn relation_tail(&self, relation: &Relation) -> AnaforaResult<Vec<&Entity>> {
        relation
            .tail_ids()
            .into_iter()
            .map(|id| self.resolve(id))
            .collect()
    }

    fn resolve(&self, id: &str) -> AnaforaResult<&Entity> {
        self.entity(id).ok_or_else(|| AnaforaError::unresolved(id))
    }

    /// Look up an entity or relation by id. Entities are searched first.
    pub fn annotation(&self, id: &str) -> Option<AnnotationRef<'_>> {
        self.entity(id)
            .map(AnnotationRef::Entity)
            .or_else(|| self.relation(id).map(AnnotationRef::Relation))
    }

    // ---- mutation ----

    /// Append a contiguous entity and return it.
    ///
    /// The new id is `{max entity id + 1}@e@{name}@{annotator}`.
    pub fn add_entity(
        &mut self,
        annotator: &str,
        span: (usize, usize),
        entity_type: &str,
        parents_type: &str,
    ) -> AnaforaResult<&Entity> {
        let spans = SpanSet::contiguous(span.0, span.1)?;
        let id = id::AnnotationId::new(self.max_entity_id() + 1, IdKind::Entity, &self.name, annotator)
            .to_string();
        debug!(document = %self.name, id = %id, "adding entity");

        let position = self.annotations.len();
        self.annotations.push(Annotation::Entity(Entity::create(
            id.clone(),
            spans,
            entity_type,
            parents_type,
        )));
        self.entity_index.insert(id.clone(), position);
        self.entity_order.push(position);

        self.annotations[position]
            .as_entity()
            .ok_or_else(|| AnaforaError::unresolved(&id))
    }

    /// Append a TLINK from `source_id` to `target_id` with subtype `tlink_type`.
    ///
    /// References naming this document must resolve; ids naming another
    /// document are accepted as cross-document links.
    pub fn add_tlink(
        &mut self,
        annotator: &str,
        source_id: &str,
        target_id: &str,
        tlink_type: &str,
    ) -> AnaforaResult<&Relation> {
        for reference in [source_id, target_id] {
            match id::document_of(reference) {
                Some(document) if document != self.name => {
                    warn!(id = %reference, document = %self.name, "tlink references another document");
                }
                _ => {
                    self.resolve(reference)?;
                }
            }
        }

        let id = id::AnnotationId::new(
            self.max_relation_id() + 1,
            IdKind::Relation,
            &self.name,
            annotator,
        )
        .to_string();
        debug!(document = %self.name, id = %id, source = source_id, target = target_id, "adding tlink");

        let mut properties = vec![Property::new("Source", source_id)];
        if !tlink_type.is_empty() {
            properties.push(Property::new(SUBTYPE_PROPERTY, tlink_type));
        }
        properties.push(Property::new("Target", target_id));

        self.annotations.push(Annotation::Relation(Relation::create(
            id.clone(),
            TLINK_TYPE,
            TEMPORAL_RELATIONS,
            properties,
        )));
        self.reindex();

        self.relation(&id)
            .ok_or_else(|| AnaforaError::unresolved(&id))
    }

    /// Detach a relation, updating every index before returning it.
    pub fn remove_relation(&mut self, id: &str) -> AnaforaResult<Relation> {
        let position = *self
            .relation_index
            .get(id)
            .ok_or_else(|| AnaforaError::unresolved(id))?;
        let removed = self.annotations.remove(position);
        self.reindex();
        debug!(document = %self.name, id, "removed relation");

        match removed {
            Annotation::Relation(relation) => Ok(relation),
            _ => Err(AnaforaError::unresolved(id)),
        }
    }

    /// Rewrite a relation's `Type` property and move it to its new partition.
    pub fn set_relation_subtype(&mut self, id: &str, subtype: &str) -> AnaforaResult<()> {
        let position = *self
            .relation_index
            .get(id)
            .ok_or_else(|| AnaforaError::unresolved(id))?;
        match &mut self.annotations[position] {
            Annotation::Relation(relation) => {
                let before = relation.kind();
                relation.set_subtype(subtype);
                debug!(id, from = %before, to = %relation.kind(), "relation subtype changed");
            }
            _ => return Err(AnaforaError::unresolved(id)),
        }
        self.reindex();
        Ok(())
    }

    // ---- output ----

    /// The element tree with every model field copied back into it.
    pub fn to_tree(&self) -> XmlElement {
        let mut root = self.root.clone();

        let has_info = root.child("info").is_some();
        if has_info || !self.status.is_empty() || !self.savetime.is_empty() {
            let info = root.ensure_child("info");
            info.set_child_text("progress", self.status.clone());
            info.set_child_text("savetime", self.savetime.clone());
        }

        if let Some(schema) = root.child_mut("schema") {
            self.schema.write_into(schema);
        } else if self.schema != Schema::default() {
            let mut schema = XmlElement::new("schema");
            self.schema.write_into(&mut schema);
            root.push_element(schema);
        }

        let container = root.ensure_child("annotations");
        container.children = self
            .annotations
            .iter()
            .map(|annotation| XmlNode::Element(annotation.to_element()))
            .collect();
        root
    }

    /// Pretty-printed XML for the current state.
    pub fn to_xml_string(&self) -> AnaforaResult<String> {
        xml::to_pretty_string(&self.to_tree())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> AnaforaResult<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        fs::write(path, xml).map_err(|source| AnaforaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved document");
        Ok(())
    }
}

/// File name without directories, cut at the first `.`.
fn document_name(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    match base.split_once('.') {
        Some((name, _)) => name.to_string(),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_name() {
        assert_eq!(
            document_name("ID054_clinic_158.Temporal-Relation.gold.completed.xml"),
            "ID054_clinic_158"
        );
        assert_eq!(document_name("corpus/doc7.xml"), "doc7");
        assert_eq!(document_name("plain"), "plain");
    }

    #[test]
    fn test_root_must_be_data() {
        let err = Document::parse("<annotations/>", "x.xml").unwrap_err();
        assert!(matches!(err, AnaforaError::MissingElement { .. }));
    }

    #[test]
    fn test_minimal_document() {
        let doc = Document::parse("<data><annotations/></data>", "empty.xml").unwrap();
        assert_eq!(doc.name(), "empty");
        assert_eq!(doc.status, "");
        assert_eq!(doc.entity_count(), 0);
        assert_eq!(doc.annotator(), "");
        assert_eq!(doc.max_entity_id(), 0);
        assert_eq!(doc.max_relation_id(), 0);
    }
}

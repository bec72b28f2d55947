//! Several documents resolved together, for relations that cross files.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::document::Document;
use crate::entity::Entity;
use crate::errors::{AnaforaError, AnaforaResult};
use crate::id;
use crate::relation::Relation;

/// Documents keyed by name.
///
/// Sequence numbers repeat between documents, so entity lookups here always
/// use the full id string and route on its document part.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    by_name: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every path into a new corpus.
    pub fn load<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> AnaforaResult<Self> {
        let mut corpus = Self::new();
        for path in paths {
            corpus.insert(Document::load(path)?);
        }
        Ok(corpus)
    }

    /// Add a document, replacing any document with the same name.
    pub fn insert(&mut self, document: Document) {
        let name = document.name().to_string();
        match self.by_name.get(&name) {
            Some(&index) => {
                warn!(document = %name, "replacing document already in corpus");
                self.documents[index] = document;
            }
            None => {
                debug!(document = %name, "adding document to corpus");
                self.by_name.insert(name, self.documents.len());
                self.documents.push(document);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn document(&self, name: &str) -> Option<&Document> {
        self.by_name.get(name).map(|&index| &self.documents[index])
    }

    /// Resolve a full entity id through the document it names.
    pub fn entity(&self, id: &str) -> AnaforaResult<&Entity> {
        id::document_of(id)
            .and_then(|name| self.document(name))
            .and_then(|document| document.entity(id))
            .ok_or_else(|| AnaforaError::unresolved(id))
    }

    /// Resolve every entity a relation references, whichever file holds it.
    pub fn relation_entities(&self, relation: &Relation) -> AnaforaResult<Vec<&Entity>> {
        relation
            .entity_ids()
            .into_iter()
            .map(|id| self.entity(id))
            .collect()
    }

    /// Relations of every document that reference more than one document.
    pub fn cross_document_relations(&self) -> Vec<&Relation> {
        self.documents
            .iter()
            .flat_map(|document| document.relations())
            .filter(|relation| relation.is_cross_doc())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, body: &str) -> Document {
        let xml = format!("<data><annotations>{}</annotations></data>", body);
        Document::parse(&xml, &format!("{}.xml", name)).unwrap()
    }

    #[test]
    fn test_resolves_across_documents() {
        let mut corpus = Corpus::new();
        corpus.insert(doc(
            "a",
            "<entity><id>1@e@a@gold</id><span>0,4</span><type>EVENT</type></entity>\
             <relation><id>1@r@a@gold</id><type>IDENTICAL</type><properties>\
             <FirstInstance>1@e@a@gold</FirstInstance><Coreferring_String>1@e@b@gold</Coreferring_String>\
             </properties></relation>",
        ));
        corpus.insert(doc(
            "b",
            "<entity><id>1@e@b@gold</id><span>5,9</span><type>EVENT</type></entity>",
        ));

        assert_eq!(corpus.len(), 2);
        // same sequence number, different documents
        assert_eq!(corpus.entity("1@e@a@gold").unwrap().start_span(), 0);
        assert_eq!(corpus.entity("1@e@b@gold").unwrap().start_span(), 5);

        let cross = corpus.cross_document_relations();
        assert_eq!(cross.len(), 1);
        let entities = corpus.relation_entities(cross[0]).unwrap();
        assert_eq!(entities.len(), 2);

        assert!(corpus.document("a").unwrap().relation_entities(cross[0]).is_err());
    }

    #[test]
    fn test_unknown_document_is_unresolved() {
        let corpus = Corpus::new();
        assert!(matches!(
            corpus.entity("1@e@nowhere@gold"),
            Err(AnaforaError::UnresolvedReference { .. })
        ));
        assert!(corpus.entity("not-an-id").is_err());
    }
}

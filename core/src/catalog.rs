use crate::document::{DocId, Document};
use crate::error::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Authoritative id to record mapping used to hydrate search hits.
#[derive(Debug, Default)]
pub struct Catalog {
    docs: HashMap<DocId, Document>,
}

impl Catalog {
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub(crate) fn insert(&mut self, doc: Document) -> Result<&Document> {
        if doc.id == 0 {
            return Err(Error::InvalidDocumentId);
        }
        match self.docs.entry(doc.id) {
            Entry::Occupied(_) => Err(Error::DuplicateDocument(doc.id)),
            Entry::Vacant(slot) => Ok(slot.insert(doc)),
        }
    }
}

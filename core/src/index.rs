use crate::document::{DocId, Document, Field};
use crate::tokenizer::tokenize;
use std::collections::HashMap;

pub type TermId = u32;

/// A term's occurrences within one document, counted per indexed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub field_freqs: [u32; Field::COUNT],
}

impl Posting {
    /// Frequency inside `scope`, or across every indexed field when unscoped.
    pub fn frequency(&self, scope: Option<Field>) -> u32 {
        match scope {
            Some(field) => self.field_freqs[field.slot()],
            None => self.field_freqs.iter().sum(),
        }
    }
}

/// Term to postings mapping. Postings within a term keep corpus order.
///
/// There is no way to mutate an index once [`IndexBuilder::finish`] hands it
/// out, so it can be shared across threads without locking.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    postings: Vec<Vec<Posting>>,
    doc_lengths: HashMap<DocId, u32>,
    num_docs: u32,
}

impl InvertedIndex {
    pub fn build(documents: &[Document]) -> Self {
        let mut builder = IndexBuilder::new();
        for doc in documents {
            builder.add(doc);
        }
        builder.finish()
    }

    /// Postings for `term`; empty when the term never occurred.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.dictionary
            .get(term)
            .map(|&tid| self.postings[tid as usize].as_slice())
            .unwrap_or(&[])
    }

    /// Number of indexed tokens in the document, zero for unknown ids.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.dictionary.len()
    }
}

/// Accumulates postings during the build phase.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: InvertedIndex,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every field of `doc` and return the number of tokens seen.
    /// A document without any tokens is still counted, it just never matches.
    pub fn add(&mut self, doc: &Document) -> u32 {
        let index = &mut self.index;
        let mut counts: HashMap<TermId, [u32; Field::COUNT]> = HashMap::new();
        let mut length = 0u32;
        for field in Field::ALL {
            for term in tokenize(doc.field(field)) {
                let next_id = index.postings.len() as TermId;
                let tid = *index.dictionary.entry(term).or_insert(next_id);
                if tid == next_id {
                    index.postings.push(Vec::new());
                }
                counts.entry(tid).or_insert([0; Field::COUNT])[field.slot()] += 1;
                length += 1;
            }
        }
        for (tid, field_freqs) in counts {
            index.postings[tid as usize].push(Posting { doc_id: doc.id, field_freqs });
        }
        index.doc_lengths.insert(doc.id, length);
        index.num_docs += 1;
        length
    }

    pub fn finish(self) -> InvertedIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new(1, "Red Shoes", "Footwear"),
            Document::new(2, "Blue Shoes shoes", "Footwear"),
            Document::new(3, "Red Book", "Books"),
        ]
    }

    #[test]
    fn postings_follow_insertion_order() {
        let index = InvertedIndex::build(&corpus());
        let ids: Vec<DocId> = index.postings("red").iter().map(|p| p.doc_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(index.postings("footwear").len(), 2);
    }

    #[test]
    fn frequencies_are_counted_per_field() {
        let index = InvertedIndex::build(&corpus());
        let posting = &index.postings("shoes")[1];
        assert_eq!(posting.doc_id, 2);
        assert_eq!(posting.frequency(None), 2);
        assert_eq!(posting.frequency(Some(Field::Name)), 2);
        assert_eq!(posting.frequency(Some(Field::Category)), 0);
        assert_eq!(index.doc_length(2), 4);
    }

    #[test]
    fn unknown_terms_have_no_postings() {
        let index = InvertedIndex::build(&corpus());
        assert!(index.postings("nonexistentterm").is_empty());
    }

    #[test]
    fn empty_document_is_counted_but_unindexed() {
        let mut builder = IndexBuilder::new();
        assert_eq!(builder.add(&Document::new(9, "", "")), 0);
        let index = builder.finish();
        assert_eq!(index.num_docs(), 1);
        assert_eq!(index.num_terms(), 0);
        assert_eq!(index.doc_length(9), 0);
    }
}

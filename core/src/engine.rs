use crate::catalog::Catalog;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::executor::{execute, Page, ScoredResult, Scoring};
use crate::index::{IndexBuilder, InvertedIndex};
use crate::query::parse;
use std::time::Instant;

/// Inverted index and catalog built from the same corpus in one pass.
///
/// Both halves are read-only after [`SearchEngine::build`] returns; wrap the
/// engine in an `Arc` to share it between request handlers.
#[derive(Debug)]
pub struct SearchEngine {
    index: InvertedIndex,
    catalog: Catalog,
    scoring: Scoring,
}

impl SearchEngine {
    /// Build the index and catalog. Documents without any indexable text are
    /// kept in the catalog but never match. A zero or repeated id aborts the
    /// build, since the catalog could no longer mirror the index.
    pub fn build<I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let start = Instant::now();
        let mut builder = IndexBuilder::new();
        let mut catalog = Catalog::default();
        let mut empty_docs = 0usize;
        for doc in documents {
            let doc = catalog.insert(doc)?;
            if builder.add(doc) == 0 {
                tracing::debug!(doc_id = doc.id, "document has no indexable terms");
                empty_docs += 1;
            }
        }
        let index = builder.finish();
        if empty_docs > 0 {
            tracing::warn!(empty_docs, "documents indexed without terms");
        }
        tracing::info!(
            num_docs = index.num_docs(),
            num_terms = index.num_terms(),
            took_ms = start.elapsed().as_millis() as u64,
            "index build complete"
        );
        Ok(Self { index, catalog, scoring: Scoring::default() })
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    /// Parse `q`, rank the matches and return the hydrated page.
    pub fn search(&self, q: &str, page: Page) -> Result<Vec<Document>> {
        let query = parse(q)?;
        let results = execute(&query, &self.index, page, self.scoring)?;
        self.hydrate(&results)
    }

    /// Map ranked ids back to catalog records, preserving order.
    pub fn hydrate(&self, results: &[ScoredResult]) -> Result<Vec<Document>> {
        results
            .iter()
            .map(|hit| {
                self.catalog.get(hit.doc_id).cloned().ok_or_else(|| {
                    tracing::error!(doc_id = hit.doc_id, "catalog desync: indexed id has no record");
                    Error::CatalogDesync(hit.doc_id)
                })
            })
            .collect()
    }
}

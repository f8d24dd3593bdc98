use crate::document::DocId;
use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::query::StructuredQuery;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Relevance formula applied to each candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scoring {
    /// Sum of the matched terms' frequencies in the document.
    #[default]
    TermFrequency,
    /// Term frequency sum divided by the document's token count.
    LengthNormalized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResult {
    pub doc_id: DocId,
    pub score: f32,
}

/// A validated `(limit, offset)` window over the ranked candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn new(limit: i64, offset: i64) -> Result<Self> {
        if limit <= 0 {
            return Err(Error::InvalidLimit(limit));
        }
        if offset < 0 {
            return Err(Error::InvalidOffset(offset));
        }
        Ok(Self {
            limit: usize::try_from(limit).unwrap_or(usize::MAX),
            offset: usize::try_from(offset).unwrap_or(usize::MAX),
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: Self::DEFAULT_LIMIT, offset: 0 }
    }
}

/// Descending score, then ascending id.
fn rank_order(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// Score every document matching at least one query term and return the
/// requested page of the ranking.
///
/// Matching is disjunctive: a candidate needs one term, and each further term
/// it contains adds to its score. Terms scoped to a field only count
/// occurrences inside that field. The index is only read, so any number of
/// callers may run this concurrently.
pub fn execute(
    query: &StructuredQuery,
    index: &InvertedIndex,
    page: Page,
    scoring: Scoring,
) -> Result<Vec<ScoredResult>> {
    if page.limit == 0 {
        return Err(Error::InvalidLimit(0));
    }
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut tf_sums: HashMap<DocId, u32> = HashMap::new();
    for term in &query.terms {
        for posting in index.postings(&term.text) {
            let tf = posting.frequency(term.field);
            if tf == 0 {
                continue;
            }
            *tf_sums.entry(posting.doc_id).or_insert(0) += tf;
        }
    }

    let total_hits = tf_sums.len();
    tracing::debug!(terms = query.terms.len(), total_hits, "scored candidates");
    if page.offset >= total_hits {
        return Ok(Vec::new());
    }

    // One division per candidate, so equal ratios produce equal scores.
    let mut ranked: Vec<ScoredResult> = tf_sums
        .into_iter()
        .map(|(doc_id, tf)| {
            let score = match scoring {
                Scoring::TermFrequency => tf as f32,
                Scoring::LengthNormalized => tf as f32 / index.doc_length(doc_id).max(1) as f32,
            };
            ScoredResult { doc_id, score }
        })
        .collect();
    // Only the first offset + limit entries need to be in order.
    let end = page.offset.saturating_add(page.limit);
    if end < ranked.len() {
        ranked.select_nth_unstable_by(end - 1, rank_order);
        ranked.truncate(end);
    }
    ranked.sort_unstable_by(rank_order);
    Ok(ranked.split_off(page.offset))
}

pub mod catalog;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod error;
pub mod executor;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use catalog::Catalog;
pub use document::{DocId, Document, Field};
pub use engine::SearchEngine;
pub use error::{Error, Result};
pub use executor::{execute, Page, ScoredResult, Scoring};
pub use index::{IndexBuilder, InvertedIndex, Posting, TermId};
pub use query::{parse, QueryTerm, StructuredQuery};

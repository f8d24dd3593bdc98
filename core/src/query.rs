use crate::document::Field;
use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use std::collections::HashSet;

/// A single normalized term, optionally scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryTerm {
    pub text: String,
    pub field: Option<Field>,
}

impl QueryTerm {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), field: None }
    }

    pub fn in_field(text: impl Into<String>, field: Field) -> Self {
        Self { text: text.into(), field: Some(field) }
    }
}

/// Parsed form of a free-text query. Terms are unique and keep the order in
/// which they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredQuery {
    pub terms: Vec<QueryTerm>,
}

impl StructuredQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Parse a query string.
///
/// Words are split on whitespace and run through the index tokenizer. A word
/// of the form `field:value` with a known field name scopes the terms of
/// `value` to that field; any other colon is an ordinary separator.
///
/// Input with no visible characters is rejected with [`Error::EmptyQuery`].
/// Input that merely tokenizes to nothing (e.g. `"!!"`) yields an empty query.
pub fn parse(input: &str) -> Result<StructuredQuery> {
    if input.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    let mut seen: HashSet<QueryTerm> = HashSet::new();
    let mut terms = Vec::new();
    for word in input.split_whitespace() {
        let (field, text) = match word.split_once(':') {
            Some((prefix, rest)) => match prefix.parse::<Field>() {
                Ok(field) => (Some(field), rest),
                Err(()) => (None, word),
            },
            None => (None, word),
        };
        for token in tokenize(text) {
            let term = QueryTerm { text: token, field };
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
    }
    Ok(StructuredQuery { terms })
}

use crate::DocId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("query parameter 'q' is required")]
    EmptyQuery,

    #[error("limit must be positive, got {0}")]
    InvalidLimit(i64),

    #[error("offset must not be negative, got {0}")]
    InvalidOffset(i64),

    /// The executor produced an id the catalog does not hold.
    #[error("document {0} is indexed but missing from the catalog")]
    CatalogDesync(DocId),

    #[error("duplicate document id {0}")]
    DuplicateDocument(DocId),

    #[error("document ids must be positive")]
    InvalidDocumentId,
}

impl Error {
    /// Errors caused by caller input rather than engine state.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EmptyQuery | Error::InvalidLimit(_) | Error::InvalidOffset(_))
    }
}

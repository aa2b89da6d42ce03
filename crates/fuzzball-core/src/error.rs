//! Search error types

use thiserror::Error;

use crate::sequence::DocumentId;

/// Errors surfaced while building a searcher
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// A corpus entry could not be decoded into code points
    #[error("corpus entry {document} is not valid UTF-8: {source}")]
    InvalidEntry {
        document: DocumentId,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

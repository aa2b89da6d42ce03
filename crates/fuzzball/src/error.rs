//! Error types for the FuzzBall command line.

use std::path::PathBuf;

use fuzzball_core::SearchError;
use thiserror::Error;

/// Error type for CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A corpus file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error while writing results
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus could not be indexed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using the CLI Error.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the pagescout core.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Per-document and per-image failures during a corpus scan are caught
/// and skipped inside the scan itself; the variants here are the ones
/// that reach callers.
#[derive(Debug, Error)]
pub enum Error {
    /// A corpus file could not be opened or parsed. Scoped to that
    /// single document and handled by skipping it.
    #[error("cannot read document {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    /// Empty or whitespace-only search query
    #[error("search query is empty")]
    EmptyQuery,

    /// Query that cannot be compiled into a matcher
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An uploaded image buffer could not be decoded to pixels
    #[error("image could not be decoded: {0}")]
    UndecodableImage(String),

    /// IO error (corpus directory enumeration)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::UndecodableImage(err.to_string())
    }
}

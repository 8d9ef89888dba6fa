//! Search result records
//!
//! Plain records for the I/O layer to render. The core returns match
//! span offsets rather than pre-rendered markup so it stays
//! renderer-agnostic; escaping and highlighting are the caller's job.

use serde::Serialize;

/// One text hit: a context snippet and where the query sits inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    /// File name of the document containing the hit
    pub document: String,
    /// 1-based page number
    pub page: usize,
    /// Up to 50 characters of context on each side of the hit
    pub snippet: String,
    /// Byte range of the matched query text within `snippet`
    pub match_span: (usize, usize),
}

/// Best-scoring page for an image query.
///
/// "No match" is `Option::<ImageHit>::None`, never a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHit {
    /// File name of the document containing the best page
    pub document: String,
    /// 1-based page number
    pub page: usize,
    /// Count of accepted feature correspondences
    pub score: usize,
}

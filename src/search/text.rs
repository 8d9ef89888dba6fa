//! Corpus-wide text search
//!
//! Case-insensitive substring search over every page of every corpus
//! document, with a bounded context window around each occurrence.

use regex::{Regex, RegexBuilder};

use crate::corpus::{Corpus, ScanOptions};
use crate::error::{Error, Result};

use super::types::TextMatch;

/// Maximum context characters captured on each side of a hit
pub const CONTEXT_CHARS: usize = 50;

/// Search the corpus for a query substring, case-insensitively.
///
/// Results preserve document enumeration order, then page order, then
/// in-page offset order. Overlapping context windows are reported
/// independently; nothing is deduplicated. An empty corpus or a query
/// with no hits returns `Ok(vec![])`.
pub fn search_text(corpus: &Corpus, query: &str) -> Result<Vec<TextMatch>> {
    let pattern = build_pattern(query)?;

    let mut results = Vec::new();
    for page in corpus.pages(ScanOptions::text_only())? {
        for (snippet, span) in page_snippets(&page.text, &pattern) {
            results.push(TextMatch {
                document: page.document.clone(),
                page: page.number,
                snippet,
                match_span: span,
            });
        }
    }

    tracing::debug!("text search for {:?}: {} hits", query, results.len());
    Ok(results)
}

/// Compile the query into a case-insensitive literal matcher.
///
/// Validation happens here, before any document is opened.
fn build_pattern(query: &str) -> Result<Regex> {
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidQuery(e.to_string()))
}

/// Every occurrence of the pattern in one page's text, as
/// (snippet, span-within-snippet) pairs in offset order.
fn page_snippets(text: &str, pattern: &Regex) -> Vec<(String, (usize, usize))> {
    pattern
        .find_iter(text)
        .map(|m| snippet_around(text, m.start(), m.end()))
        .collect()
}

/// Cut a context window of up to `CONTEXT_CHARS` characters on each
/// side of the byte range `start..end`, shorter at page boundaries.
/// Returns the snippet and the byte span of the hit within it.
fn snippet_around(text: &str, start: usize, end: usize) -> (String, (usize, usize)) {
    let prefix_len: usize = text[..start]
        .chars()
        .rev()
        .take(CONTEXT_CHARS)
        .map(|c| c.len_utf8())
        .sum();
    let suffix_len: usize = text[end..]
        .chars()
        .take(CONTEXT_CHARS)
        .map(|c| c.len_utf8())
        .sum();

    let snippet_start = start - prefix_len;
    let snippet_end = end + suffix_len;

    (
        text[snippet_start..snippet_end].to_string(),
        (start - snippet_start, end - snippet_start),
    )
}

//! Corpus accessor
//!
//! Enumerates PDF documents in a folder and yields per-page text and
//! per-page raster content with page numbers.

mod accessor;
mod types;

pub use accessor::{Corpus, Pages};
pub use types::{Page, ScanOptions};

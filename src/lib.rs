//! Pagescout
//!
//! Locates source pages in a PDF corpus two ways: free-text substring
//! search with context snippets, and similarity search against a photo
//! scored with binary feature descriptors. The surrounding I/O layer
//! (HTTP, uploads, templating) calls into this crate with plain inputs
//! and renders the returned records.
//!
//! # Modules
//!
//! - `corpus`: enumerates PDFs and walks their pages lazily
//! - `search`: the text and image search engines
//! - `vision`: grayscale decode, keypoint descriptors, similarity scoring
//! - `pdf`: low-level PDF access via MuPDF

pub mod config;
pub mod corpus;
pub mod error;
pub mod pdf;
pub mod search;
pub mod vision;

pub use config::Config;
pub use corpus::{Corpus, Page, ScanOptions};
pub use error::{Error, Result};
pub use search::{match_image, search_text, ImageHit, TextMatch};
pub use vision::{decode_image, FeatureMatcher};

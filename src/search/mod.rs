//! Search engines over the corpus
//!
//! - `text`: substring search with context snippets
//! - `image`: best-page selection for an uploaded photo

mod image;
mod text;
mod types;

pub use image::{match_image, MIN_CONFIDENCE};
pub use text::{search_text, CONTEXT_CHARS};
pub use types::{ImageHit, TextMatch};

//! Low-level PDF access via MuPDF
//!
//! Provides per-document text extraction and page rasterization.

mod document;

pub use document::{PdfFile, RASTER_SCALE};

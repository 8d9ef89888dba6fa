//! Corpus scan types

use image::RgbImage;

/// One page of one corpus document, materialized for a single scan.
///
/// Pixel data is owned transiently by the scan that produced it and is
/// dropped when the request-scoped operation returns.
pub struct Page {
    /// File name of the owning document
    pub document: String,
    /// 1-based page number
    pub number: usize,
    /// Extracted plain text (empty when the scan skips text)
    pub text: String,
    /// Decoded raster content of the page, RGB order
    pub images: Vec<RgbImage>,
}

/// Selects what a corpus scan materializes per page.
///
/// Text search never pays for rasterization and image matching never
/// pays for text extraction.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub extract_text: bool,
    pub extract_images: bool,
}

impl ScanOptions {
    pub fn text_only() -> Self {
        ScanOptions {
            extract_text: true,
            extract_images: false,
        }
    }

    pub fn images_only() -> Self {
        ScanOptions {
            extract_text: false,
            extract_images: true,
        }
    }
}

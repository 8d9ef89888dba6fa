//! PDF document access using MuPDF
//!
//! MuPDF's fz_context is not thread-safe; every `PdfFile` owns its own
//! document handle and is used from a single thread for the duration
//! of one request-scoped scan.

use std::path::{Path, PathBuf};

use image::RgbImage;
use mupdf::{Colorspace, Document, Matrix};

use crate::error::{Error, Result};

/// Scale factor for page rasterization.
///
/// 72 dpi base times two keeps enough detail for corner detection on
/// embedded figures without ballooning scan memory.
pub const RASTER_SCALE: f32 = 2.0;

/// A single opened PDF from the corpus
pub struct PdfFile {
    name: String,
    doc: Document,
    page_count: usize,
}

impl PdfFile {
    /// Open a PDF from a corpus path.
    ///
    /// Validates that the page count is readable so a truncated or
    /// corrupt file fails here rather than mid-scan.
    pub fn open(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let read_err = |e: mupdf::Error| Error::DocumentRead {
            path: PathBuf::from(path),
            reason: e.to_string(),
        };

        let path_str = path.to_string_lossy();
        let doc = Document::open(path_str.as_ref()).map_err(read_err)?;
        let page_count = doc.page_count().map_err(read_err)? as usize;

        Ok(Self {
            name,
            doc,
            page_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Extract the plain text of a page (0-indexed)
    pub fn page_text(&self, index: usize) -> Result<String> {
        let page = self.doc.load_page(index as i32).map_err(self.err())?;
        page.to_text().map_err(self.err())
    }

    /// Rasterize a page (0-indexed) to an RGB pixel matrix
    pub fn rasterize_page(&self, index: usize, scale: f32) -> Result<RgbImage> {
        let page = self.doc.load_page(index as i32).map_err(self.err())?;

        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        // to_pixmap signature: (ctm, colorspace, alpha, show_extras) -> Pixmap
        let pixmap = page
            .to_pixmap(&matrix, &colorspace, false, false)
            .map_err(self.err())?;

        let width = pixmap.width() as u32;
        let height = pixmap.height() as u32;
        let samples = pixmap.samples();
        let n = pixmap.n() as usize; // components per pixel

        let mut buffer = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let offset = (y * width as usize + x) * n;
                let r = samples.get(offset).copied().unwrap_or(0);
                let g = samples.get(offset + 1).copied().unwrap_or(r);
                let b = samples.get(offset + 2).copied().unwrap_or(r);
                buffer.extend_from_slice(&[r, g, b]);
            }
        }

        RgbImage::from_raw(width, height, buffer).ok_or_else(|| Error::DocumentRead {
            path: PathBuf::from(&self.name),
            reason: format!("page {} produced a malformed pixel buffer", index + 1),
        })
    }

    fn err(&self) -> impl Fn(mupdf::Error) -> Error + '_ {
        move |e| Error::DocumentRead {
            path: PathBuf::from(&self.name),
            reason: e.to_string(),
        }
    }
}

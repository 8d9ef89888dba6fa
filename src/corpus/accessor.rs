//! Corpus accessor
//!
//! Enumerates the PDF files in the corpus directory and walks their
//! pages lazily. Every scan is a fresh pass: nothing is cached between
//! calls, and a new iterator re-reads the directory.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pdf::{PdfFile, RASTER_SCALE};

use super::types::{Page, ScanOptions};

/// Read-only handle on the corpus directory
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the PDF files in the corpus, sorted by file name.
    ///
    /// Sorting keeps enumeration order (and therefore result order and
    /// tie-breaking) stable across runs and filesystems.
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if path.is_file() && is_pdf {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Walk every page of every document, one pass, lazily.
    ///
    /// Documents that cannot be opened are skipped with a warning and
    /// the scan continues; only a failure to enumerate the corpus
    /// directory itself is an error.
    pub fn pages(&self, options: ScanOptions) -> Result<Pages> {
        let docs = self.documents()?;
        tracing::info!("scanning corpus at {:?}: {} documents", self.root, docs.len());
        Ok(Pages {
            options,
            docs: docs.into_iter(),
            current: None,
        })
    }
}

/// Lazy page iterator over the whole corpus
pub struct Pages {
    options: ScanOptions,
    docs: std::vec::IntoIter<PathBuf>,
    current: Option<OpenDocument>,
}

struct OpenDocument {
    file: PdfFile,
    next_index: usize,
}

impl Iterator for Pages {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        loop {
            if let Some(open) = self.current.as_mut() {
                if open.next_index < open.file.page_count() {
                    let index = open.next_index;
                    open.next_index += 1;
                    match load_page(&open.file, index, self.options) {
                        Ok(page) => return Some(page),
                        Err(e) => {
                            tracing::warn!(
                                "skipping page {} of {}: {}",
                                index + 1,
                                open.file.name(),
                                e
                            );
                            continue;
                        }
                    }
                }
                self.current = None;
            }

            let path = self.docs.next()?;
            match PdfFile::open(&path) {
                Ok(file) => {
                    self.current = Some(OpenDocument {
                        file,
                        next_index: 0,
                    });
                }
                Err(e) => {
                    tracing::warn!("skipping unreadable document: {}", e);
                }
            }
        }
    }
}

fn load_page(file: &PdfFile, index: usize, options: ScanOptions) -> Result<Page> {
    let text = if options.extract_text {
        file.page_text(index)?
    } else {
        String::new()
    };

    let images = if options.extract_images {
        // MuPDF 0.5 has no per-XObject extraction, so the page's image
        // content is materialized as one full-page raster.
        vec![file.rasterize_page(index, RASTER_SCALE)?]
    } else {
        Vec::new()
    };

    Ok(Page {
        document: file.name().to_string(),
        number: index + 1,
        text,
        images,
    })
}

//! End-to-end scans over a real on-disk corpus.
//!
//! Fixtures are minimal PDFs assembled by hand (Helvetica text, one
//! content stream per page) so the tests exercise the full MuPDF path
//! without binary fixtures in the repo.

use std::fs;
use std::path::Path;

use image::GrayImage;
use pagescout::corpus::ScanOptions;
use pagescout::{match_image, search_text, Corpus, Error, FeatureMatcher};

/// One fixture page: a single text line, or a single embedded image.
enum PageContent<'a> {
    Text(&'a str),
    Image(&'a GrayImage),
}

/// Build a minimal PDF by hand.
///
/// Text pages carry one Helvetica line (no string escaping, so the
/// text must not contain parentheses or backslashes). Image pages
/// embed the grayscale pixels as an uncompressed image XObject drawn
/// over most of the page.
fn build_pdf(pages: &[PageContent]) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();
    let push_obj = |buf: &mut Vec<u8>, offsets: &mut Vec<usize>, body: Vec<u8>| {
        offsets.push(buf.len());
        buf.extend_from_slice(&body);
    };

    buf.extend_from_slice(b"%PDF-1.4\n");

    // Page object numbers first: text pages take two objects, image
    // pages three (page, content stream, image XObject).
    let mut page_nums = Vec::with_capacity(pages.len());
    let mut next_num = 4;
    for page in pages {
        page_nums.push(next_num);
        next_num += match page {
            PageContent::Text(_) => 2,
            PageContent::Image(_) => 3,
        };
    }

    let kids: Vec<String> = page_nums.iter().map(|n| format!("{} 0 R", n)).collect();

    push_obj(
        &mut buf,
        &mut offsets,
        b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec(),
    );
    push_obj(
        &mut buf,
        &mut offsets,
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    push_obj(
        &mut buf,
        &mut offsets,
        b"3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_vec(),
    );

    for (page, &page_num) in pages.iter().zip(&page_nums) {
        let content_num = page_num + 1;
        match page {
            PageContent::Text(text) => {
                push_obj(
                    &mut buf,
                    &mut offsets,
                    format!(
                        "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                         /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                        page_num, content_num
                    )
                    .into_bytes(),
                );
                let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET\n", text);
                push_obj(
                    &mut buf,
                    &mut offsets,
                    format!(
                        "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
                        content_num,
                        stream.len(),
                        stream
                    )
                    .into_bytes(),
                );
            }
            PageContent::Image(img) => {
                let xobject_num = page_num + 2;
                push_obj(
                    &mut buf,
                    &mut offsets,
                    format!(
                        "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                         /Resources << /XObject << /Im1 {} 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                        page_num, xobject_num, content_num
                    )
                    .into_bytes(),
                );
                let stream = "q 512 0 0 512 50 140 cm /Im1 Do Q\n";
                push_obj(
                    &mut buf,
                    &mut offsets,
                    format!(
                        "{} 0 obj\n<< /Length {} >>\nstream\n{}endstream\nendobj\n",
                        content_num,
                        stream.len(),
                        stream
                    )
                    .into_bytes(),
                );
                let mut body = format!(
                    "{} 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceGray /BitsPerComponent 8 /Length {} >>\nstream\n",
                    xobject_num,
                    img.width(),
                    img.height(),
                    img.as_raw().len()
                )
                .into_bytes();
                body.extend_from_slice(img.as_raw());
                body.extend_from_slice(b"\nendstream\nendobj\n");
                push_obj(&mut buf, &mut offsets, body);
            }
        }
    }

    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    buf
}

fn write_pdf(dir: &Path, name: &str, pages: &[&str]) {
    let pages: Vec<PageContent> = pages.iter().map(|t| PageContent::Text(t)).collect();
    fs::write(dir.join(name), build_pdf(&pages)).unwrap();
}

/// Deterministic high-contrast texture, rich enough in corners for
/// feature extraction.
fn figure(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let mut v = x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17));
        v ^= v >> 3;
        if (x / 8 + y / 8) % 2 == 0 {
            image::Luma([(v % 64) as u8])
        } else {
            image::Luma([200 + (v % 56) as u8])
        }
    })
}

#[test]
fn finds_single_match_with_locator() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "manual.pdf", &["Install the widget carefully."]);

    let corpus = Corpus::new(dir.path());
    let matches = search_text(&corpus, "widget").unwrap();

    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.document, "manual.pdf");
    assert_eq!(m.page, 1);
    assert!(m.snippet.contains("Install the widget carefully."));
    let (start, end) = m.match_span;
    assert_eq!(&m.snippet[start..end], "widget");
}

#[test]
fn search_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "manual.pdf", &["Install the Widget carefully."]);

    let corpus = Corpus::new(dir.path());
    let matches = search_text(&corpus, "WIDGET").unwrap();

    assert_eq!(matches.len(), 1);
    let (start, end) = matches[0].match_span;
    assert_eq!(&matches[0].snippet[start..end], "Widget");
}

#[test]
fn no_hits_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "manual.pdf", &["Nothing relevant on this page."]);

    let corpus = Corpus::new(dir.path());
    assert!(search_text(&corpus, "zebra").unwrap().is_empty());
}

#[test]
fn empty_corpus_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::new(dir.path());
    assert!(search_text(&corpus, "anything").unwrap().is_empty());
}

#[test]
fn empty_query_fails_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::new(dir.path());
    assert!(matches!(search_text(&corpus, "  "), Err(Error::EmptyQuery)));
}

#[test]
fn corrupt_document_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.pdf"), b"not a pdf at all").unwrap();
    write_pdf(dir.path(), "manual.pdf", &["The widget survives corruption."]);

    let corpus = Corpus::new(dir.path());
    let matches = search_text(&corpus, "widget").unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].document, "manual.pdf");
}

#[test]
fn results_follow_document_then_page_order() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(
        dir.path(),
        "alpha.pdf",
        &["First widget mention.", "Second widget mention."],
    );
    write_pdf(dir.path(), "beta.pdf", &["Third widget mention."]);

    let corpus = Corpus::new(dir.path());
    let matches = search_text(&corpus, "widget").unwrap();

    let locators: Vec<(&str, usize)> = matches
        .iter()
        .map(|m| (m.document.as_str(), m.page))
        .collect();
    assert_eq!(
        locators,
        vec![("alpha.pdf", 1), ("alpha.pdf", 2), ("beta.pdf", 1)]
    );
}

#[test]
fn repeated_search_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "a.pdf", &["widget one", "widget two"]);
    write_pdf(dir.path(), "b.pdf", &["widget three"]);

    let corpus = Corpus::new(dir.path());
    let first = search_text(&corpus, "widget").unwrap();
    let second = search_text(&corpus, "widget").unwrap();
    assert_eq!(first, second);
}

#[test]
fn pages_iterator_numbers_from_one() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "doc.pdf", &["page one text", "page two text"]);

    let corpus = Corpus::new(dir.path());
    let pages: Vec<_> = corpus.pages(ScanOptions::text_only()).unwrap().collect();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[1].number, 2);
    assert!(pages[0].text.contains("page one text"));
    assert!(pages[0].images.is_empty());
}

#[test]
fn image_scan_rasterizes_each_page() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "doc.pdf", &["some page content"]);

    let corpus = Corpus::new(dir.path());
    let pages: Vec<_> = corpus.pages(ScanOptions::images_only()).unwrap().collect();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].images.len(), 1);
    let raster = &pages[0].images[0];
    assert!(raster.width() > 0 && raster.height() > 0);
    assert!(pages[0].text.is_empty());
}

#[test]
fn embedded_figure_is_located_by_its_image() {
    let dir = tempfile::tempdir().unwrap();
    let fig = figure(256, 256);
    fs::write(
        dir.path().join("guide.pdf"),
        build_pdf(&[
            PageContent::Text("Introduction to the widget."),
            PageContent::Text("Assembly instructions."),
            PageContent::Image(&fig),
        ]),
    )
    .unwrap();
    write_pdf(dir.path(), "manual.pdf", &["Unrelated prose on one page."]);

    // The query is the figure at its native resolution; the page
    // raster shows it much larger, so this also exercises matching
    // across a scale change.
    let corpus = Corpus::new(dir.path());
    let matcher = FeatureMatcher::new();
    let hit = match_image(&corpus, &fig, &matcher)
        .unwrap()
        .expect("embedded figure should be found");

    assert_eq!(hit.document, "guide.pdf");
    assert_eq!(hit.page, 3);
    assert!(hit.score > pagescout::search::MIN_CONFIDENCE);
}

#[test]
fn featureless_query_image_matches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(dir.path(), "doc.pdf", &["some page content"]);

    let corpus = Corpus::new(dir.path());
    let blank = image::GrayImage::from_pixel(64, 64, image::Luma([200]));
    let matcher = FeatureMatcher::new();

    let hit = match_image(&corpus, &blank, &matcher).unwrap();
    assert!(hit.is_none());
}

//! Corpus-wide image matching
//!
//! Scores the query image against every piece of page imagery in the
//! corpus and keeps the single best candidate above the confidence
//! floor. Full linear scan per request: no early termination, no index
//! reuse across requests.

use image::{DynamicImage, GrayImage};

use crate::corpus::{Corpus, ScanOptions};
use crate::error::Result;
use crate::vision::{score_descriptors, FeatureExtractor, FeatureMatcher};

use super::types::ImageHit;

/// A best candidate must score strictly above this floor. Suppresses
/// spurious "best of a bad lot" results when nothing really matches.
pub const MIN_CONFIDENCE: usize = 10;

/// Find the corpus page whose imagery best matches the query image.
///
/// Returns `Ok(None)` when no candidate clears the confidence floor.
/// Per-document read failures are skipped inside the scan; they never
/// abort the request.
pub fn match_image<E: FeatureExtractor>(
    corpus: &Corpus,
    query: &GrayImage,
    matcher: &FeatureMatcher<E>,
) -> Result<Option<ImageHit>> {
    let query_descriptors = matcher.extract(query);
    if query_descriptors.is_empty() {
        tracing::debug!("query image has no extractable keypoints");
        return Ok(None);
    }

    let mut best: Option<ImageHit> = None;
    for page in corpus.pages(ScanOptions::images_only())? {
        for image in &page.images {
            let gray = DynamicImage::ImageRgb8(image.clone()).to_luma8();
            let candidate = matcher.extract(&gray);
            let score = score_descriptors(&query_descriptors, &candidate);
            tracing::debug!(
                "candidate {} page {}: score {}",
                page.document,
                page.number,
                score
            );
            if better_than(&best, score) {
                best = Some(ImageHit {
                    document: page.document.clone(),
                    page: page.number,
                    score,
                });
            }
        }
    }

    Ok(best)
}

/// Strictly greater than the floor and strictly greater than the
/// current best, so equally-strong candidates resolve first-seen-wins.
fn better_than(best: &Option<ImageHit>, score: usize) -> bool {
    score > MIN_CONFIDENCE && best.as_ref().map_or(true, |hit| score > hit.score)
}

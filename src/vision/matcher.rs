//! Descriptor matching and similarity scoring
//!
//! Two images are scored by counting cross-checked descriptor pairs
//! whose Hamming distance clears the good-match threshold. The score
//! is a raw count, not a ratio: downstream selection applies an
//! absolute floor, so precision matters more than recall.

use image::GrayImage;

use super::features::{FeatureExtractor, OrientedBrief};
use super::types::Descriptor;

/// A cross-checked pair must be closer than this to count
pub const GOOD_MATCH_DISTANCE: u32 = 50;

/// Similarity scorer over a feature extractor
pub struct FeatureMatcher<E = OrientedBrief> {
    extractor: E,
}

impl Default for FeatureMatcher {
    fn default() -> Self {
        Self {
            extractor: OrientedBrief::default(),
        }
    }
}

impl FeatureMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: FeatureExtractor> FeatureMatcher<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extract(&self, image: &GrayImage) -> Vec<Descriptor> {
        self.extractor.extract(image)
    }

    /// Similarity confidence between two images: the number of good
    /// cross-checked feature correspondences. Zero when either image
    /// yields no descriptors; that is a defined terminal case, not an
    /// error.
    pub fn score(&self, a: &GrayImage, b: &GrayImage) -> usize {
        score_descriptors(&self.extract(a), &self.extract(b))
    }
}

/// Count good matches between two descriptor sets.
///
/// Pairing is mutual-best under Hamming distance (cross-check): a pair
/// (i, j) counts only when j is i's nearest neighbour and i is j's.
/// Distance ties resolve to the lowest index, keeping the result
/// deterministic.
pub fn score_descriptors(a: &[Descriptor], b: &[Descriptor]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a_to_b = nearest_neighbours(a, b);
    let b_to_a = nearest_neighbours(b, a);

    a_to_b
        .iter()
        .enumerate()
        .filter(|(i, (j, distance))| b_to_a[*j].0 == *i && *distance < GOOD_MATCH_DISTANCE)
        .count()
}

/// For each descriptor in `from`, the index of its nearest descriptor
/// in `to` and the distance to it. First minimum wins.
fn nearest_neighbours(from: &[Descriptor], to: &[Descriptor]) -> Vec<(usize, u32)> {
    from.iter()
        .map(|d| {
            let mut best = (0usize, u32::MAX);
            for (j, candidate) in to.iter().enumerate() {
                let distance = d.hamming(candidate);
                if distance < best.1 {
                    best = (j, distance);
                }
            }
            best
        })
        .collect()
}

//! Keypoint detection and binary descriptor extraction
//!
//! FAST-9 corners (imageproc) detected over an image pyramid, with an
//! intensity-centroid orientation per keypoint and a BRIEF-style
//! 256-bit descriptor sampled over a fixed test-pair pattern rotated
//! into the keypoint's orientation. Detecting on every pyramid level
//! and pooling the descriptors makes matching tolerant of scale
//! changes between the query photo and the corpus raster, on top of
//! the rotation tolerance from descriptor steering. The pattern is
//! generated from a fixed seed, so extraction is fully deterministic.

use image::imageops::{resize, FilterType};
use image::GrayImage;
use imageproc::corners::corners_fast9;
use imageproc::filter::gaussian_blur_f32;

use super::types::{Descriptor, DESCRIPTOR_BITS};

/// Radius of the patch used for orientation estimation
const PATCH_RADIUS: i32 = 15;

/// Test-pair offsets stay inside this radius so a rotated pair never
/// leaves the patch
const PAIR_RADIUS: i32 = 13;

/// Keypoints closer than this to an image edge are discarded
const BORDER_MARGIN: u32 = 16;

/// Downscale factor between adjacent pyramid levels. A half-octave
/// step keeps the worst-case scale mismatch between a feature and its
/// nearest level small enough for the binary comparisons to hold.
const SCALE_FACTOR: f32 = std::f32::consts::SQRT_2;

/// Produces feature descriptors from a grayscale image.
///
/// The matching algorithm only sees descriptor sets, so scoring can be
/// exercised with a stub extractor in tests.
pub trait FeatureExtractor {
    fn extract(&self, image: &GrayImage) -> Vec<Descriptor>;
}

/// Default extractor: FAST corners + oriented BRIEF descriptors
pub struct OrientedBrief {
    /// FAST-9 intensity threshold
    pub fast_threshold: u8,
    /// Overall keypoint budget, split evenly across pyramid levels,
    /// strongest corners first within each level
    pub max_keypoints: usize,
    /// Number of pyramid levels to detect on
    pub levels: usize,
    pairs: Vec<((i32, i32), (i32, i32))>,
}

impl Default for OrientedBrief {
    fn default() -> Self {
        Self {
            fast_threshold: 20,
            max_keypoints: 500,
            levels: 6,
            pairs: test_pairs(),
        }
    }
}

impl FeatureExtractor for OrientedBrief {
    fn extract(&self, image: &GrayImage) -> Vec<Descriptor> {
        let pyramid = self.pyramid(image);
        if pyramid.is_empty() {
            return Vec::new();
        }

        // Split the keypoint budget evenly across levels so coarse
        // scales keep a presence even when the finest level alone has
        // more corners than the whole budget.
        let per_level = (self.max_keypoints / pyramid.len()).max(1);

        let mut descriptors = Vec::new();
        for img in &pyramid {
            let (width, height) = img.dimensions();
            let mut corners = corners_fast9(img, self.fast_threshold);
            corners.retain(|c| {
                c.x >= BORDER_MARGIN
                    && c.y >= BORDER_MARGIN
                    && c.x < width - BORDER_MARGIN
                    && c.y < height - BORDER_MARGIN
            });
            corners.sort_by(|a, b| b.score.total_cmp(&a.score));
            corners.truncate(per_level);
            if corners.is_empty() {
                continue;
            }
            // Detect on the raw level, describe on the smoothed one:
            // intensity comparisons on unsmoothed pixels are noise-driven.
            let smoothed = gaussian_blur_f32(img, 2.0);
            descriptors.extend(corners.iter().map(|c| self.describe(&smoothed, c.x, c.y)));
        }
        descriptors
    }
}

impl OrientedBrief {
    /// Successively downscaled copies of the image, stopping early once
    /// a level is too small to hold a keypoint inside the border margin.
    fn pyramid(&self, image: &GrayImage) -> Vec<GrayImage> {
        let mut levels = Vec::with_capacity(self.levels);
        let mut current = image.clone();
        for _ in 0..self.levels {
            let (width, height) = current.dimensions();
            if width <= 2 * BORDER_MARGIN || height <= 2 * BORDER_MARGIN {
                break;
            }
            let next_w = (width as f32 / SCALE_FACTOR).round() as u32;
            let next_h = (height as f32 / SCALE_FACTOR).round() as u32;
            let next = resize(&current, next_w, next_h, FilterType::Triangle);
            levels.push(current);
            current = next;
        }
        levels
    }

    fn describe(&self, image: &GrayImage, cx: u32, cy: u32) -> Descriptor {
        let theta = orientation(image, cx, cy);
        let (sin, cos) = theta.sin_cos();

        let sample = |dx: i32, dy: i32| -> u8 {
            let rx = (dx as f32 * cos - dy as f32 * sin).round() as i32;
            let ry = (dx as f32 * sin + dy as f32 * cos).round() as i32;
            let x = (cx as i32 + rx) as u32;
            let y = (cy as i32 + ry) as u32;
            image.get_pixel(x, y)[0]
        };

        let mut bits = [0u8; DESCRIPTOR_BITS / 8];
        for (i, &((ax, ay), (bx, by))) in self.pairs.iter().enumerate() {
            if sample(ax, ay) < sample(bx, by) {
                bits[i / 8] |= 1 << (i % 8);
            }
        }
        Descriptor::new(bits)
    }
}

/// Intensity-centroid orientation of the circular patch around a
/// keypoint: the angle of the vector from the patch center to its
/// brightness centroid.
fn orientation(image: &GrayImage, cx: u32, cy: u32) -> f32 {
    let mut m10 = 0.0f32;
    let mut m01 = 0.0f32;

    for dy in -PATCH_RADIUS..=PATCH_RADIUS {
        for dx in -PATCH_RADIUS..=PATCH_RADIUS {
            if dx * dx + dy * dy > PATCH_RADIUS * PATCH_RADIUS {
                continue;
            }
            let x = (cx as i32 + dx) as u32;
            let y = (cy as i32 + dy) as u32;
            let v = image.get_pixel(x, y)[0] as f32;
            m10 += dx as f32 * v;
            m01 += dy as f32 * v;
        }
    }

    m01.atan2(m10)
}

/// Fixed descriptor sampling pattern: 256 point pairs inside the patch,
/// generated with a seeded xorshift so every run uses the same pattern.
///
/// Points are kept inside the Euclidean disc of radius `PAIR_RADIUS`,
/// so a rotated sample never leaves the border margin.
fn test_pairs() -> Vec<((i32, i32), (i32, i32))> {
    let span = (2 * PAIR_RADIUS + 1) as u32;
    let mut state: u32 = 0x9E37_79B9;
    let mut coord = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state % span) as i32 - PAIR_RADIUS
    };
    let in_disc = |(x, y): (i32, i32)| x * x + y * y <= PAIR_RADIUS * PAIR_RADIUS;

    let mut pairs = Vec::with_capacity(DESCRIPTOR_BITS);
    while pairs.len() < DESCRIPTOR_BITS {
        let a = (coord(), coord());
        let b = (coord(), coord());
        if a != b && in_disc(a) && in_disc(b) {
            pairs.push((a, b));
        }
    }
    pairs
}

//! Image feature matching
//!
//! Converts images to grayscale, extracts binary keypoint descriptors,
//! and scores similarity between two images by counting high-confidence
//! descriptor correspondences.

mod features;
mod matcher;
mod types;

pub use features::{FeatureExtractor, OrientedBrief};
pub use matcher::{score_descriptors, FeatureMatcher, GOOD_MATCH_DISTANCE};
pub use types::Descriptor;

use image::GrayImage;

use crate::error::Result;

/// Decode an uploaded image buffer to single-channel grayscale.
///
/// The caller is format-agnostic about how the bytes reached memory;
/// a buffer that does not decode aborts the match request with
/// `Error::UndecodableImage`.
pub fn decode_image(bytes: &[u8]) -> Result<GrayImage> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(decoded.to_luma8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(Error::UndecodableImage(_))));
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let img = image::GrayImage::from_fn(8, 8, |x, y| image::Luma([(x * 8 + y) as u8 * 3]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(img.clone())
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded, img);
    }
}

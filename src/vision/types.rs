//! Feature descriptor types

/// Number of intensity-comparison bits per descriptor
pub const DESCRIPTOR_BITS: usize = 256;

/// A 256-bit binary feature descriptor.
///
/// Compared under Hamming distance, so the distance scale is 0..=256
/// and the good-match threshold of 50 sits on the same scale the
/// pairing uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    bits: [u8; DESCRIPTOR_BITS / 8],
}

impl Descriptor {
    pub fn new(bits: [u8; DESCRIPTOR_BITS / 8]) -> Self {
        Self { bits }
    }

    pub fn hamming(&self, other: &Descriptor) -> u32 {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

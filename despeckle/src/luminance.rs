//! RGB to single-channel luminance.

use common::Buffer2;
use rayon::prelude::*;

use crate::image::Rgb;

// Rec. 601 weights scaled to 14-bit fixed point.
// R: 0.299 * 16384 = 4899
// G: 0.587 * 16384 = 9617
// B: 0.114 * 16384 = 1868
// Total: 16384 (shift by 14 instead of divide)
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

#[inline]
pub fn rgb_to_luma([r, g, b]: Rgb) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// Converts a color buffer to a luminance plane of the same dimensions.
pub fn luminance(pixels: &Buffer2<Rgb>) -> Buffer2<u8> {
    let luma: Vec<u8> = pixels.pixels().par_iter().map(|&p| rgb_to_luma(p)).collect();
    Buffer2::new(pixels.width(), pixels.height(), luma)
}

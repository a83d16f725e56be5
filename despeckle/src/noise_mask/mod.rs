//! Speckle mask synthesis.
//!
//! A pixel is flagged when it is dark in absolute terms (luminance at or below
//! `threshold`) and dark relative to its neighbourhood (the local median of
//! luminance exceeds it by at least `delta`). The flagged set is then grown by
//! the `expand` element so halos around each speck are replaced too.


use common::{BitBuffer2, Buffer2};
use rayon::prelude::*;

use crate::config::{Config, NormalizedConfig};
use crate::image::{Image, Rgb};
use crate::luminance::luminance;
use crate::mask_dilation::dilate_mask;
use crate::median_filter::median_filter;

/// Pixels whose luminance is at or below `threshold`.
pub fn dark_mask(luma: &Buffer2<u8>, threshold: i32) -> BitBuffer2 {
    let bits: Vec<bool> = luma
        .pixels()
        .par_iter()
        .map(|&l| i32::from(l) <= threshold)
        .collect();
    BitBuffer2::from_slice(luma.width(), luma.height(), &bits)
}

/// Pixels at least `delta` darker than `reference`. The difference saturates
/// at zero, so pixels brighter than their reference only pass when `delta <= 0`.
pub fn contrast_mask(luma: &Buffer2<u8>, reference: &Buffer2<u8>, delta: i32) -> BitBuffer2 {
    assert!(luma.same_size(reference), "reference size differs from luminance");

    let bits: Vec<bool> = luma
        .pixels()
        .par_iter()
        .zip(reference.pixels().par_iter())
        .map(|(&l, &r)| i32::from(r.saturating_sub(l)) >= delta)
        .collect();
    BitBuffer2::from_slice(luma.width(), luma.height(), &bits)
}

/// Undilated speckle mask: the intersection of [`dark_mask`] and [`contrast_mask`].
pub fn speckle_mask(
    luma: &Buffer2<u8>,
    reference: &Buffer2<u8>,
    threshold: i32,
    delta: i32,
) -> BitBuffer2 {
    let mut mask = dark_mask(luma, threshold);
    mask.and_assign(&contrast_mask(luma, reference, delta));
    mask
}

/// Final replacement mask for `image` under `config`, dilation included.
pub fn noise_mask(image: &Image, config: &Config) -> BitBuffer2 {
    build_mask(image.pixels(), &config.normalized())
}

pub(crate) fn build_mask(pixels: &Buffer2<Rgb>, params: &NormalizedConfig) -> BitBuffer2 {
    let luma = luminance(pixels);
    let reference = median_filter(&luma, params.mask_size);
    let raw = speckle_mask(&luma, &reference, params.threshold, params.delta);

    let radius = params.expand_radius();
    let mask = dilate_mask(&raw, radius);

    tracing::debug!(
        "Speckle mask {}x{}: {} flagged, {} after dilation (radius {})",
        pixels.width(),
        pixels.height(),
        raw.count_ones(),
        mask.count_ones(),
        radius
    );

    mask
}

//! Black-noise removal pipeline.
//!
//! The image is smoothed into a fill candidate while, independently, a speckle
//! mask is built from its luminance. Only masked pixels are replaced by the
//! fill candidate; every other pixel is copied through untouched.

#[cfg(test)]
mod tests;

use std::time::Instant;

use common::{BitBuffer2, Buffer2};

use crate::config::{Config, NormalizedConfig};
use crate::image::{Image, Rgb};
use crate::median_filter::median_filter_rgb;
use crate::noise_mask::build_mask;

/// Cleaned image together with the mask of pixels that were replaced.
#[derive(Debug, Clone)]
pub struct Denoised {
    pub image: Image,
    pub mask: BitBuffer2,
}

impl Denoised {
    /// Number of pixels taken from the fill candidate.
    pub fn replaced_pixels(&self) -> usize {
        self.mask.count_ones()
    }
}

/// Removes dark speckles from `image`. The input is never modified.
pub fn denoise(image: &Image, config: &Config) -> Image {
    denoise_with_mask(image, config).image
}

/// Like [`denoise`], also returning the final replacement mask.
pub fn denoise_with_mask(image: &Image, config: &Config) -> Denoised {
    if image.is_empty() {
        return Denoised {
            image: image.clone(),
            mask: BitBuffer2::new_default(image.width(), image.height()),
        };
    }

    let start = Instant::now();
    let params = config.normalized();
    tracing::debug!("Denoising {}x{} with {params:?}", image.width(), image.height());

    let (fill, mask) = rayon::join(
        || fill_candidate(image.pixels(), &params),
        || build_mask(image.pixels(), &params),
    );

    let mut output = image.pixels().clone();
    composite(&mut output, &fill, &mask);

    tracing::info!(
        "Replaced {} of {} pixels in {:.1?}",
        mask.count_ones(),
        image.pixels().len(),
        start.elapsed()
    );

    Denoised {
        image: output.into(),
        mask,
    }
}

/// Heavily smoothed copy: `strength` sequential median passes of `fill_size`.
fn fill_candidate(pixels: &Buffer2<Rgb>, params: &NormalizedConfig) -> Buffer2<Rgb> {
    let mut fill = median_filter_rgb(pixels, params.fill_size);
    for _ in 1..params.strength {
        fill = median_filter_rgb(&fill, params.fill_size);
    }
    fill
}

fn composite(output: &mut Buffer2<Rgb>, fill: &Buffer2<Rgb>, mask: &BitBuffer2) {
    debug_assert!(output.same_size(fill));
    debug_assert_eq!(output.len(), mask.len());

    for idx in mask.iter_ones() {
        output[idx] = fill[idx];
    }
}

//! Square-window median filter for 8-bit planes.
//!
//! Borders replicate the nearest edge pixel, so every window holds exactly
//! `size * size` samples and the result is the sample of rank `size * size / 2`.
//! Each row slides a two-level 256-bin histogram across the image (Huang's
//! algorithm): moving one pixel right removes one column and adds one, and the
//! median is found by walking 16 coarse bins and then at most 16 fine bins.


use common::Buffer2;
use rayon::prelude::*;

use crate::image::Rgb;

const COARSE_BINS: usize = 16;
const FINE_PER_COARSE: usize = 16;

/// Two-level histogram of 8-bit samples.
struct Histogram {
    coarse: [u32; COARSE_BINS],
    fine: [u32; 256],
}

impl Histogram {
    fn new() -> Self {
        Self {
            coarse: [0; COARSE_BINS],
            fine: [0; 256],
        }
    }

    #[inline]
    fn add(&mut self, value: u8) {
        self.coarse[value as usize / FINE_PER_COARSE] += 1;
        self.fine[value as usize] += 1;
    }

    #[inline]
    fn remove(&mut self, value: u8) {
        self.coarse[value as usize / FINE_PER_COARSE] -= 1;
        self.fine[value as usize] -= 1;
    }

    /// Value of the sample with zero-based `rank` in sorted order.
    #[inline]
    fn select(&self, rank: u32) -> u8 {
        let mut seen = 0u32;
        for (block, &count) in self.coarse.iter().enumerate() {
            if seen + count > rank {
                let start = block * FINE_PER_COARSE;
                for (offset, &fine) in self.fine[start..start + FINE_PER_COARSE].iter().enumerate() {
                    seen += fine;
                    if seen > rank {
                        return (start + offset) as u8;
                    }
                }
            }
            seen += count;
        }
        unreachable!("rank {rank} exceeds histogram population {seen}")
    }
}

/// Median-filters a single-channel plane with an odd `size x size` window.
pub fn median_filter(src: &Buffer2<u8>, size: usize) -> Buffer2<u8> {
    assert!(size % 2 == 1, "median window must be odd, got {size}");

    let width = src.width();
    let height = src.height();
    if src.is_empty() || size == 1 {
        return src.clone();
    }

    let mut output = vec![0u8; width * height];
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| filter_row(src, size, y, row));

    Buffer2::new(width, height, output)
}

/// Median-filters each channel of a color buffer independently.
pub fn median_filter_rgb(src: &Buffer2<Rgb>, size: usize) -> Buffer2<Rgb> {
    let channels: Vec<Buffer2<u8>> = (0..3)
        .into_par_iter()
        .map(|c| median_filter(&src.map(|p| p[c]), size))
        .collect();
    let [r, g, b] = [&channels[0], &channels[1], &channels[2]];

    Buffer2::from_fn(src.width(), src.height(), |x, y| {
        [r[(x, y)], g[(x, y)], b[(x, y)]]
    })
}

fn filter_row(src: &Buffer2<u8>, size: usize, y: usize, output_row: &mut [u8]) {
    let radius = (size / 2) as isize;
    let rank = (size * size / 2) as u32;
    let y = y as isize;

    let column = |hist: &mut Histogram, x: isize, add: bool| {
        for dy in -radius..=radius {
            let value = *src.get_clamped(x, y + dy);
            if add {
                hist.add(value);
            } else {
                hist.remove(value);
            }
        }
    };

    let mut hist = Histogram::new();
    for dx in -radius..=radius {
        column(&mut hist, dx, true);
    }
    output_row[0] = hist.select(rank);

    for (x, out) in output_row.iter_mut().enumerate().skip(1) {
        let x = x as isize;
        column(&mut hist, x - radius - 1, false);
        column(&mut hist, x + radius, true);
        *out = hist.select(rank);
    }
}

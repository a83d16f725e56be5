//! Morphological dilation of bit masks with a square structuring element.
//!
//! Separable: a horizontal pass followed by a vertical pass, each a sliding
//! OR over `2 * radius + 1` cells. Cells outside the mask never contribute.


use common::BitBuffer2;
use rayon::prelude::*;

/// Dilates `mask` with a `(2 * radius + 1)` square element centred on each pixel.
pub fn dilate_mask(mask: &BitBuffer2, radius: usize) -> BitBuffer2 {
    let width = mask.width();
    let height = mask.height();
    if radius == 0 || mask.is_empty() {
        return mask.clone();
    }

    let mut horizontal = vec![false; width * height];
    horizontal
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| dilate_row(mask, y, radius, row));

    let mut vertical = vec![false; width * height];
    vertical
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y_min = y.saturating_sub(radius);
            let y_max = (y + radius).min(height - 1);
            for (x, out) in row.iter_mut().enumerate() {
                *out = (y_min..=y_max).any(|yy| horizontal[yy * width + x]);
            }
        });

    BitBuffer2::from_slice(width, height, &vertical)
}

/// Horizontal pass for one row using a running count of set bits.
fn dilate_row(mask: &BitBuffer2, y: usize, radius: usize, output_row: &mut [bool]) {
    let width = output_row.len();
    let bit = |x: usize| usize::from(mask.get_xy(x, y));

    // Count of set bits in [x - radius, x + radius] clamped to the row.
    let mut count: usize = (0..=radius.min(width - 1)).map(bit).sum();
    for (x, out) in output_row.iter_mut().enumerate() {
        if x > 0 {
            if let Some(leaving) = (x - 1).checked_sub(radius) {
                count -= bit(leaving);
            }
            let entering = x + radius;
            if entering < width {
                count += bit(entering);
            }
        }
        *out = count > 0;
    }
}

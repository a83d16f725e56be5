//! Synthetic images shared by the unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::image::{Image, Rgb};

/// Uniform `background` with a black `size x size` square whose top-left
/// corner is at `(x0, y0)`.
pub(crate) fn image_with_black_patch(
    width: usize,
    height: usize,
    background: Rgb,
    (x0, y0): (usize, usize),
    size: usize,
) -> Image {
    Image::from_fn(width, height, |x, y| {
        let inside = (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y);
        if inside { [0, 0, 0] } else { background }
    })
}

/// Mildly textured light background sprinkled with dark specks.
pub(crate) fn speckled_image(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    Image::from_fn(width, height, |_, _| {
        if rng.random_bool(0.03) {
            let v = rng.random_range(0..60u8);
            [v, v, v.saturating_add(5)]
        } else {
            let base = rng.random_range(150..230u8);
            [base, base.saturating_sub(10), base.saturating_sub(20)]
        }
    })
}

use super::*;
use crate::noise_mask::noise_mask;
use crate::test_utils::{image_with_black_patch, speckled_image};

const GRAY: Rgb = [200, 200, 200];

#[test]
fn test_uniform_image_unchanged() {
    let image = Image::new_filled(50, 50, GRAY);
    let result = denoise_with_mask(&image, &Config::default());
    assert_eq!(result.image, image);
    assert_eq!(result.replaced_pixels(), 0);
}

#[test]
fn test_black_patch_is_filled() {
    let image = image_with_black_patch(50, 50, GRAY, (24, 24), 2);
    let output = denoise(&image, &Config::default());

    for y in 24..26 {
        for x in 24..26 {
            let [r, g, b] = output.pixel(x, y);
            assert!(
                r >= 190 && g >= 190 && b >= 190,
                "patch pixel ({x}, {y}) not filled: {:?}",
                [r, g, b]
            );
        }
    }
    for y in 0..50 {
        for x in 0..50 {
            if !((24..26).contains(&x) && (24..26).contains(&y)) {
                assert_eq!(output.pixel(x, y), GRAY, "background changed at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_unmasked_pixels_are_bit_identical() {
    let image = speckled_image(96, 64, 21);
    let result = denoise_with_mask(&image, &Config::default());
    assert!(result.replaced_pixels() > 0);

    for (idx, masked) in result.mask.iter().enumerate() {
        if !masked {
            assert_eq!(
                result.image.pixels()[idx],
                image.pixels()[idx],
                "unmasked pixel {idx} changed"
            );
        }
    }
}

#[test]
fn test_masked_pixels_come_from_fill_candidate() {
    let image = speckled_image(40, 40, 8);
    let config = Config::default();
    let params = config.normalized();

    let result = denoise_with_mask(&image, &config);
    let fill = fill_candidate(image.pixels(), &params);
    for idx in result.mask.iter_ones() {
        assert_eq!(result.image.pixels()[idx], fill[idx]);
    }
}

#[test]
fn test_reported_mask_matches_noise_mask() {
    let image = speckled_image(70, 50, 13);
    let config = Config {
        expand: 7,
        ..Config::default()
    };
    assert_eq!(
        denoise_with_mask(&image, &config).mask,
        noise_mask(&image, &config)
    );
}

#[test]
fn test_deterministic() {
    let image = speckled_image(80, 60, 4);
    let config = Config {
        strength: 3,
        fill_size: 5,
        ..Config::default()
    };
    let first = denoise(&image, &config);
    let second = denoise(&image, &config);
    assert_eq!(first.to_bytes(), second.to_bytes());
}

#[test]
fn test_input_not_modified() {
    let image = speckled_image(40, 30, 2);
    let snapshot = image.clone();
    let _ = denoise(&image, &Config::default());
    assert_eq!(image, snapshot);
}

#[test]
fn test_no_mask_means_identity() {
    // Threshold below every luminance value: nothing is dark.
    let image = speckled_image(40, 30, 6);
    let config = Config {
        threshold: -1,
        ..Config::default()
    };
    assert_eq!(denoise(&image, &config), image);
}

#[test]
fn test_unbounded_parameters_are_coerced() {
    let image = image_with_black_patch(30, 30, GRAY, (14, 14), 2);
    let config = Config {
        strength: -4,
        threshold: 130,
        delta: 8,
        expand: -3,
        mask_size: 0,
        fill_size: 2,
    };
    // Runs with strength 1, expand 1, mask_size 3, fill_size 3.
    let result = denoise_with_mask(&image, &config);
    assert_eq!(result.image.width(), 30);
    assert_eq!(result.image.height(), 30);
}

#[test]
fn test_strength_repeats_fill_passes() {
    let image = speckled_image(32, 32, 17);
    let single = Config {
        strength: 1,
        ..Config::default()
    };
    let double = Config {
        strength: 2,
        ..Config::default()
    };

    let one = fill_candidate(image.pixels(), &single.normalized());
    let two = fill_candidate(image.pixels(), &double.normalized());
    // fill_size 6 runs as a 7x7 window.
    assert_eq!(two, median_filter_rgb(&one, 7));
}

#[test]
fn test_empty_image() {
    let image = Image::new(0, 0, Vec::new());
    let result = denoise_with_mask(&image, &Config::default());
    assert!(result.image.is_empty());
    assert!(result.mask.is_empty());
}

#[test]
fn test_single_pixel_image() {
    let image = Image::new(1, 1, vec![[0, 0, 0]]);
    // A lone pixel has no darker neighbourhood to compare against.
    assert_eq!(denoise(&image, &Config::default()), image);
}

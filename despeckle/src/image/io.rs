use std::io::Cursor;
use std::path::Path;

use common::file_format::get_file_extension;
use common::file_utils::{has_extension, IMAGE_EXTENSIONS};
use image as image_lib;

use super::{Image, Rgb};
use crate::error::{Error, Result};

fn check_extension(path: &Path) -> Result<String> {
    let extension =
        get_file_extension(path).ok_or_else(|| Error::MissingExtension(path.to_path_buf()))?;
    if !has_extension(path, IMAGE_EXTENSIONS) {
        return Err(Error::UnsupportedExtension { extension });
    }
    Ok(extension)
}

pub(super) fn load(path: &Path) -> Result<Image> {
    check_extension(path)?;

    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let decoded = image_lib::ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?
        .decode()
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );

    Ok(from_rgb_image(&decoded.to_rgb8()))
}

pub(super) fn save(image: &Image, path: &Path) -> Result<()> {
    let extension = check_extension(path)?;
    let format = image_lib::ImageFormat::from_extension(&extension)
        .ok_or(Error::UnsupportedExtension { extension })?;

    let mut encoded = Vec::new();
    image_lib::DynamicImage::ImageRgb8(to_rgb_image(image))
        .write_to(&mut Cursor::new(&mut encoded), format)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    std::fs::write(path, encoded).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Encoded {} as {:?}", path.display(), format);
    Ok(())
}

pub(super) fn resize_lanczos(image: &Image, width: u32, height: u32) -> Image {
    let resized = image_lib::imageops::resize(
        &to_rgb_image(image),
        width,
        height,
        image_lib::imageops::FilterType::Lanczos3,
    );
    from_rgb_image(&resized)
}

fn to_rgb_image(image: &Image) -> image_lib::RgbImage {
    image_lib::RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        image_lib::Rgb(image.pixel(x as usize, y as usize))
    })
}

fn from_rgb_image(rgb: &image_lib::RgbImage) -> Image {
    let pixels: Vec<Rgb> = rgb.pixels().map(|p| p.0).collect();
    Image::new(rgb.width() as usize, rgb.height() as usize, pixels)
}

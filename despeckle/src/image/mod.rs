mod io;


use std::path::Path;

use common::Buffer2;

use crate::error::Result;

/// One 8-bit RGB pixel.
pub type Rgb = [u8; 3];

/// Bound of preview thumbnails on each axis.
pub const PREVIEW_MAX_SIZE: (u32, u32) = (420, 420);

/// Owned 8-bit, 3-channel color image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: Buffer2<Rgb>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        Self {
            pixels: Buffer2::new(width, height, pixels),
        }
    }

    pub fn new_filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            pixels: Buffer2::new_filled(width, height, color),
        }
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, f: impl FnMut(usize, usize) -> Rgb) -> Self {
        Self {
            pixels: Buffer2::from_fn(width, height, f),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[(x, y)]
    }

    #[inline]
    pub fn pixels(&self) -> &Buffer2<Rgb> {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut Buffer2<Rgb> {
        &mut self.pixels
    }

    /// Interleaved RGB bytes, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Decodes an image file; the format is detected from its contents after
    /// the extension has been checked against the supported list.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Image> {
        io::load(path.as_ref())
    }

    /// Encodes to the format named by the extension. The destination is only
    /// written once encoding has succeeded.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save(self, path.as_ref())
    }

    /// Aspect-preserving Lanczos downscale to fit `max_width x max_height`.
    /// Images that already fit are returned unchanged.
    pub fn thumbnail(&self, max_width: u32, max_height: u32) -> Image {
        let (width, height) = (self.width() as u32, self.height() as u32);
        if self.is_empty() || (width <= max_width && height <= max_height) {
            return self.clone();
        }

        let scale = f64::min(
            max_width as f64 / width as f64,
            max_height as f64 / height as f64,
        );
        let new_width = ((width as f64 * scale).round() as u32).max(1);
        let new_height = ((height as f64 * scale).round() as u32).max(1);

        io::resize_lanczos(self, new_width, new_height)
    }
}

impl From<Buffer2<Rgb>> for Image {
    fn from(pixels: Buffer2<Rgb>) -> Self {
        Self { pixels }
    }
}

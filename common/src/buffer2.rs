use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice;

/// Row-major 2D buffer. Used for color pixels (`Buffer2<[u8; 3]>`) and
/// single-channel planes (`Buffer2<u8>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Builds a buffer by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.pixels[y * self.width + x]
    }

    /// Replicate-border access: coordinates outside the buffer are clamped
    /// to the nearest edge cell.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> &T {
        debug_assert!(!self.is_empty());
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        &self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.pixels.iter()
    }

    /// Returns a buffer of the same dimensions with `f` applied to each cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Buffer2<U> {
        Buffer2 {
            pixels: self.pixels.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn same_size<U>(&self, other: &Buffer2<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl<T: Default + Clone> Buffer2<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, T::default())
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.pixels[y * self.width + x]
    }
}

impl<T> Index<usize> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.pixels[idx]
    }
}

impl<T> IndexMut<usize> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.pixels[idx]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.pixels
    }
}

impl<T> DerefMut for Buffer2<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pixels
    }
}

impl<'a, T> IntoIterator for &'a Buffer2<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_dimensions() {
        let buf = Buffer2::new(3, 2, vec![10u8, 20, 30, 40, 50, 60]);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.len(), 6);
        assert!(!buf.is_empty());
    }

    #[test]
    #[should_panic(expected = "pixels length must equal width * height")]
    fn test_new_panics_on_size_mismatch() {
        Buffer2::new(3, 2, vec![1u8, 2, 3]);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let buf = Buffer2::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(buf.pixels(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf[(2, 1)], 12);
    }

    #[test]
    fn test_get_clamped_replicates_edges() {
        // row 0 = [1, 2, 3], row 1 = [4, 5, 6]
        let buf = Buffer2::new(3, 2, vec![1u8, 2, 3, 4, 5, 6]);
        assert_eq!(*buf.get_clamped(-5, 0), 1);
        assert_eq!(*buf.get_clamped(7, 0), 3);
        assert_eq!(*buf.get_clamped(1, -1), 2);
        assert_eq!(*buf.get_clamped(1, 9), 5);
        assert_eq!(*buf.get_clamped(-1, 5), 4);
    }

    #[test]
    fn test_row_slices() {
        let buf = Buffer2::new(2, 3, vec![1u8, 2, 3, 4, 5, 6]);
        assert_eq!(buf.row(0), &[1, 2]);
        assert_eq!(buf.row(2), &[5, 6]);
    }

    #[test]
    fn test_map_keeps_dimensions() {
        let buf = Buffer2::new(2, 2, vec![[1u8, 2, 3], [4, 5, 6], [7, 8, 9], [0, 0, 0]]);
        let sums = buf.map(|p| p.iter().map(|&c| c as u32).sum::<u32>());
        assert!(sums.same_size(&buf));
        assert_eq!(sums.pixels(), &[6, 15, 24, 0]);
    }

    #[test]
    fn test_index_mut_tuple() {
        let mut buf = Buffer2::new_filled(2, 2, 0u8);
        buf[(1, 1)] = 77;
        assert_eq!(buf[3], 77);
        assert_eq!(buf.index(1, 1), 3);
    }

    #[test]
    fn test_empty_buffer() {
        let buf: Buffer2<u8> = Buffer2::new_default(0, 5);
        assert!(buf.is_empty());
        assert_eq!(buf.height(), 5);
    }
}

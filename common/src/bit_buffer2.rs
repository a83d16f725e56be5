//! Bit-packed 2D buffer for boolean masks.
//!
//! Uses 1 bit per element instead of 1 byte. Bits past `width * height` in the
//! last word are always kept clear so word-level operations (`count_ones`,
//! `and_assign`) never see stray bits.

use std::ops::Index;

/// Number of bits per storage word.
const BITS_PER_WORD: usize = 64;

/// A 2D buffer storing boolean values packed as bits, row-major, LSB first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer2 {
    words: Vec<u64>,
    width: usize,
    height: usize,
    /// Total number of bits (width * height).
    len: usize,
}

impl BitBuffer2 {
    /// Create a new bit buffer filled with the given value.
    pub fn new_filled(width: usize, height: usize, value: bool) -> Self {
        let len = width * height;
        let fill = if value { !0u64 } else { 0u64 };
        let mut buffer = Self {
            words: vec![fill; len.div_ceil(BITS_PER_WORD)],
            width,
            height,
            len,
        };
        buffer.clear_tail();
        buffer
    }

    /// Create a new bit buffer with all bits set to false.
    #[inline]
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, false)
    }

    /// Create a new bit buffer from a row-major slice of booleans.
    ///
    /// The slice length must equal `width * height`.
    pub fn from_slice(width: usize, height: usize, data: &[bool]) -> Self {
        let len = width * height;
        assert_eq!(
            data.len(),
            len,
            "data length {} does not match dimensions {}x{}={}",
            data.len(),
            width,
            height,
            len
        );

        let words = data
            .chunks(BITS_PER_WORD)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .filter(|&(_, &value)| value)
                    .fold(0u64, |word, (bit, _)| word | (1u64 << bit))
            })
            .collect();

        Self {
            words,
            width,
            height,
            len,
        }
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
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a bit value at the given linear index.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len);
        (self.words[idx / BITS_PER_WORD] >> (idx % BITS_PER_WORD)) & 1 != 0
    }

    /// Set a bit value at the given linear index.
    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        debug_assert!(idx < self.len);
        let bit = 1u64 << (idx % BITS_PER_WORD);
        let word = &mut self.words[idx / BITS_PER_WORD];
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    #[inline]
    pub fn get_xy(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.get(y * self.width + x)
    }

    #[inline]
    pub fn set_xy(&mut self, x: usize, y: usize, value: bool) {
        debug_assert!(x < self.width && y < self.height);
        self.set(y * self.width + x, value);
    }

    /// Count the number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Logical AND with another mask of the same dimensions, in place.
    pub fn and_assign(&mut self, other: &Self) {
        assert_eq!(self.width, other.width, "width mismatch");
        assert_eq!(self.height, other.height, "height mismatch");
        for (word, &rhs) in self.words.iter_mut().zip(&other.words) {
            *word &= rhs;
        }
    }

    /// Returns true if every bit set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        assert_eq!(self.width, other.width, "width mismatch");
        assert_eq!(self.height, other.height, "height mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .all(|(&lhs, &rhs)| lhs & !rhs == 0)
    }

    /// Iterate over all bit values.
    #[inline]
    pub fn iter(&self) -> BitIter<'_> {
        BitIter {
            buffer: self,
            idx: 0,
        }
    }

    /// Iterate over linear indices of set bits, skipping empty words.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|&(_, &word)| word != 0)
            .flat_map(|(word_idx, &word)| {
                let base = word_idx * BITS_PER_WORD;
                let mut remaining = word;
                std::iter::from_fn(move || {
                    if remaining == 0 {
                        return None;
                    }
                    let bit = remaining.trailing_zeros() as usize;
                    remaining &= remaining - 1;
                    Some(base + bit)
                })
            })
    }

    fn clear_tail(&mut self) {
        let used = self.len % BITS_PER_WORD;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

impl Index<usize> for BitBuffer2 {
    type Output = bool;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        if self.get(idx) { &true } else { &false }
    }
}

impl Index<(usize, usize)> for BitBuffer2 {
    type Output = bool;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        if self.get_xy(x, y) { &true } else { &false }
    }
}

impl From<&BitBuffer2> for Vec<bool> {
    #[inline]
    fn from(buf: &BitBuffer2) -> Self {
        buf.iter().collect()
    }
}

/// Iterator over bit values.
pub struct BitIter<'a> {
    buffer: &'a BitBuffer2,
    idx: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.buffer.len {
            let value = self.buffer.get(self.idx);
            self.idx += 1;
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filled_true_counts_only_real_bits() {
        // 10x10 = 100 bits spans two words; the 28 tail bits must stay clear.
        let buf = BitBuffer2::new_filled(10, 10, true);
        assert_eq!(buf.count_ones(), 100);
        assert!(buf.iter().all(|v| v));
    }

    #[test]
    fn test_set_get_across_word_boundary() {
        let mut buf = BitBuffer2::new_default(64, 2);
        buf.set(63, true);
        buf.set(64, true);

        assert!(buf.get(63));
        assert!(buf.get(64));
        assert!(!buf.get(62));
        assert!(!buf.get(65));
        assert!(buf.get_xy(63, 0));
        assert!(buf.get_xy(0, 1));

        buf.set(63, false);
        assert!(!buf[63]);
        assert!(buf[(0, 1)]);
    }

    #[test]
    fn test_from_slice_matches_iter() {
        let data = vec![true, false, true, false, false, true];
        let buf = BitBuffer2::from_slice(3, 2, &data);

        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(Vec::<bool>::from(&buf), data);
        assert_eq!(buf.count_ones(), 3);
    }

    #[test]
    #[should_panic(expected = "data length")]
    fn test_from_slice_wrong_length() {
        BitBuffer2::from_slice(2, 2, &[true, false, true]);
    }

    #[test]
    fn test_and_assign() {
        let mut a = BitBuffer2::from_slice(2, 2, &[true, true, false, true]);
        let b = BitBuffer2::from_slice(2, 2, &[true, false, false, true]);
        a.and_assign(&b);
        assert_eq!(Vec::<bool>::from(&a), vec![true, false, false, true]);
        assert!(a.is_subset_of(&b));
    }

    #[test]
    fn test_is_subset_of() {
        let small = BitBuffer2::from_slice(3, 1, &[false, true, false]);
        let large = BitBuffer2::from_slice(3, 1, &[true, true, false]);
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
    }

    #[test]
    fn test_iter_ones_yields_sorted_indices() {
        let mut buf = BitBuffer2::new_default(20, 10);
        for idx in [0, 5, 63, 64, 130, 199] {
            buf.set(idx, true);
        }
        let ones: Vec<usize> = buf.iter_ones().collect();
        assert_eq!(ones, vec![0, 5, 63, 64, 130, 199]);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = BitBuffer2::new_filled(0, 0, true);
        assert!(buf.is_empty());
        assert_eq!(buf.count_ones(), 0);
        assert_eq!(buf.iter_ones().count(), 0);
    }
}

//! Fixed-length bit set over sample indices.
//!
//! A [`PointMask`] records which samples of a grid satisfy a formula.
//! Unlike a growable bit set, its universe is fixed at construction, which
//! makes [`PointMask::complement`] well-defined: "not A" means "every sample
//! of the grid that is not in A".

/// A bit set over `0..size`, backed by a vector of u64 words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointMask {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of indices in the universe
    size: usize,
    /// Number of set bits (cached for O(1) count())
    count: usize,
}

impl PointMask {
    const BITS_PER_WORD: usize = 64;

    fn num_words(size: usize) -> usize {
        size.div_ceil(Self::BITS_PER_WORD)
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Creates an empty mask over `0..size`.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; Self::num_words(size)],
            size,
            count: 0,
        }
    }

    /// Creates a mask containing every index of `0..size`.
    pub fn full(size: usize) -> Self {
        let mut mask = Self {
            words: vec![u64::MAX; Self::num_words(size)],
            size,
            count: size,
        };
        mask.clear_tail();
        mask
    }

    /// Creates a mask holding every index for which `pred` returns true.
    pub fn from_fn(size: usize, mut pred: impl FnMut(usize) -> bool) -> Self {
        let mut mask = Self::new(size);
        for index in 0..size {
            if pred(index) {
                mask.insert(index);
            }
        }
        mask
    }

    /// Zeroes the unused high bits of the last word.
    fn clear_tail(&mut self) {
        let used = self.size % Self::BITS_PER_WORD;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    /// Size of the universe.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of indices in the mask.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    /// Sets the bit at `index`. Returns true if it was not previously set.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the universe.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(
            index < self.size,
            "Index {} is out of range for a mask of size {}",
            index,
            self.size
        );
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let mask = 1u64 << bit_idx;
        let was_clear = self.words[word_idx] & mask == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Clears the bit at `index`. Returns true if it was previously set.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.size {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let mask = 1u64 << bit_idx;
        let was_set = self.words[word_idx] & mask != 0;
        if was_set {
            self.words[word_idx] &= !mask;
            self.count -= 1;
        }
        was_set
    }

    /// Every index of the universe that is not in this mask.
    pub fn complement(&self) -> PointMask {
        let mut result = Self {
            words: self.words.iter().map(|w| !w).collect(),
            size: self.size,
            count: self.size - self.count,
        };
        result.clear_tail();
        result
    }

    /// Returns true if every index of `self` is also in `other`.
    pub fn is_subset(&self, other: &PointMask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter().chain(std::iter::repeat(&0)))
            .all(|(a, b)| a & !b == 0)
    }

    /// Indices in the mask, ascending.
    pub fn iter(&self) -> PointMaskIter<'_> {
        PointMaskIter {
            mask: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set indices of a [`PointMask`].
pub struct PointMaskIter<'a> {
    mask: &'a PointMask,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for PointMaskIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * PointMask::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.mask.words.len() {
                return None;
            }
            self.current_word = self.mask.words[self.word_idx];
        }
    }
}

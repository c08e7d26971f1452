use bitvec::prelude::*;

/// Fixed-width set of pattern indices, stored as a packed bit vector.
///
/// Every mask in one model has the same width: the number of learned
/// patterns. Widths that are not a multiple of the word size are handled by
/// `bitvec`; dead bits in the final word never affect equality, emptiness,
/// or iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMask {
    bits: BitVec,
}

impl PatternMask {
    /// Creates a mask of the given width with no indices set.
    pub fn empty(num_patterns: usize) -> Self {
        Self {
            bits: bitvec![0; num_patterns],
        }
    }

    /// Creates a mask of the given width with every index set.
    pub fn full(num_patterns: usize) -> Self {
        Self {
            bits: bitvec![1; num_patterns],
        }
    }

    /// The width of the mask (number of pattern slots, set or not).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no index is set.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of indices currently set.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Sets the bit for `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the mask width.
    pub fn set(&mut self, index: usize) {
        self.bits.set(index, true);
    }

    /// Clears the bit for `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the mask width.
    pub fn clear(&mut self, index: usize) {
        self.bits.set(index, false);
    }

    /// True when the bit for `index` is set. Out-of-range indices are absent.
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).map(|b| *b).unwrap_or(false)
    }

    /// Clears every bit, leaving the width unchanged.
    pub fn clear_all(&mut self) {
        self.bits.fill(false);
    }

    /// Iterates the set indices in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Unions `other` into `self`, word by word.
    pub fn union_with(&mut self, other: &PatternMask) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        for (dst, src) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *dst |= *src;
        }
    }

    /// Intersects `other` into `self`, word by word.
    pub fn intersect_with(&mut self, other: &PatternMask) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        for (dst, src) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *dst &= *src;
        }
    }

    /// Returns the intersection of two masks as a new mask.
    pub fn intersection(a: &PatternMask, b: &PatternMask) -> PatternMask {
        let mut out = a.clone();
        out.intersect_with(b);
        out
    }
}

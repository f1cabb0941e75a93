use bitvec::prelude::*;

/// Fixed-size bitset over pattern indices
///
/// Uses 0-based indexing matching catalogue order. Provides O(1) membership
/// testing and word-wide union and difference for propagation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a bitset containing every pattern
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of patterns the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a pattern index; out-of-range indices are ignored
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.bits.len() {
            self.bits.set(pattern, true);
        }
    }

    /// Remove a pattern index, returning whether it was present
    pub fn remove(&mut self, pattern: usize) -> bool {
        let present = self.contains(pattern);
        if present {
            self.bits.set(pattern, false);
        }
        present
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Add every member of `other` in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Whether any member is shared with `other`
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits.iter_ones().any(|index| other.contains(index))
    }

    /// Members of this set that are absent from `other`
    pub fn difference(&self, other: &Self) -> Vec<usize> {
        self.bits
            .iter_ones()
            .filter(|&index| !other.contains(index))
            .collect()
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate member indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

//! Outer-to-inner enumeration of group pairs.
//!
//! ## Purpose
//!
//! This module enumerates every 2-combination of `n` ordered groups so that
//! the widest-spanning pair comes first and adjacent neighbours come last.
//! Stacking brackets in this order, outermost highest, keeps them from
//! crossing.
//!
//! ## Key concepts
//!
//! For `distance` from `n - 1` down to `1`, and for `i` in `0..n - distance`,
//! the pair `(i, i + distance)` is emitted. For four groups:
//!
//! ```text
//! (1,4) (1,3) (2,4) (1,2) (2,3) (3,4)
//! ```
//!
//! ## Invariants
//!
//! * Exactly `n(n-1)/2` pairs are produced, each once.
//! * `first < second` for every pair.
//! * Spans never increase along the sequence.

// ============================================================================
// Pair
// ============================================================================

/// Two distinct groups, addressed by their 0-based index in group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    /// Index of the left group.
    pub first: usize,

    /// Index of the right group.
    pub second: usize,
}

impl Pair {
    /// Create a pair; the indices are put in increasing order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// Number of group positions the pair spans.
    #[inline]
    pub fn distance(&self) -> usize {
        self.second - self.first
    }

    /// 1-based x positions of the two groups.
    #[inline]
    pub fn positions(&self) -> (usize, usize) {
        (self.first + 1, self.second + 1)
    }
}

// ============================================================================
// Enumeration
// ============================================================================

/// Number of unordered pairs among `n` groups.
#[inline]
pub const fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// All pairs of `n` groups, widest span first.
pub fn enumerate_pairs(n: usize) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(pair_count(n));
    for distance in (1..n).rev() {
        for i in 0..n - distance {
            pairs.push(Pair::new(i, i + distance));
        }
    }
    pairs
}

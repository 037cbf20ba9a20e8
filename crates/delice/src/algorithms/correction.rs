//! Multiple-comparison correction.
//!
//! ## Purpose
//!
//! This module adjusts raw p-values for the number of pairwise tests run on
//! the same figure.
//!
//! ## Design notes
//!
//! * **Uncapped Bonferroni**: `adjusted = raw * m` where `m` is the number of
//!   pairs tested. Values above 1 are kept as-is so adjusted tables match the
//!   reference plots exactly.
//!
//! ## Invariants
//!
//! * `adjusted >= raw` for `m >= 1`.
//! * The correction never changes the order of p-values.

/// Correction applied to raw p-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Correction {
    /// Multiply by the number of pairs tested, without clamping at 1.
    #[default]
    Bonferroni,

    /// Use raw p-values.
    None,
}

impl Correction {
    /// Name of the correction.
    pub const fn name(&self) -> &'static str {
        match self {
            Correction::Bonferroni => "Bonferroni",
            Correction::None => "None",
        }
    }

    /// Adjust `p_value` for `pairs_tested` comparisons.
    #[inline]
    pub fn adjust(&self, p_value: f64, pairs_tested: usize) -> f64 {
        match self {
            Correction::Bonferroni => p_value * pairs_tested as f64,
            Correction::None => p_value,
        }
    }
}

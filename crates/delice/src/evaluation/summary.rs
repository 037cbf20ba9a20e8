//! Per-group and per-pair summaries.
//!
//! ## Purpose
//!
//! This module defines the records produced while annotating a plot: a
//! descriptive summary for every group, a comparison record for every
//! tested pair, and a skip record for pairs whose t statistic is undefined.
//!
//! ## Design notes
//!
//! * **Population spread**: `std` uses `ddof = 0`, matching the error bars of
//!   bar plots. The sample variant is available through `sem`.
//! * **Self-contained**: Comparisons carry both labels so they can be reported
//!   without the observation set at hand.
//!
//! ## Invariants
//!
//! * `q1 <= median <= q3` for non-empty groups.
//! * `p_adjusted >= p_value` under Bonferroni correction.
//!
//! ## Non-goals
//!
//! * This module does not run the tests (see `engine::executor`).

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::pairs::Pair;
use crate::algorithms::tier::SignificanceTier;
use crate::math::descriptive::{mean, quantile_sorted, sorted, standard_error, std_dev};
use crate::primitives::errors::DeliceError;
use crate::primitives::groups::Group;

// ============================================================================
// Group Summary
// ============================================================================

/// Descriptive statistics of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<T> {
    /// Group label.
    pub label: String,

    /// 1-based x position of the group.
    pub position: usize,

    /// Number of observations.
    pub n: usize,

    /// Mean.
    pub mean: T,

    /// Population standard deviation (`ddof = 0`).
    pub std: T,

    /// Standard error of the mean (sample standard deviation over sqrt(n)).
    pub sem: T,

    /// First quartile.
    pub q1: T,

    /// Median.
    pub median: T,

    /// Third quartile.
    pub q3: T,

    /// Smallest observation.
    pub min: T,

    /// Largest observation.
    pub max: T,
}

impl<T: Float> GroupSummary<T> {
    /// Summarize a group at 0-based `index`.
    pub fn from_group(group: &Group<T>, index: usize) -> Self {
        let s = sorted(&group.values);
        let q = |p: f64| quantile_sorted(&s, T::from(p).unwrap());

        Self {
            label: group.label.clone(),
            position: index + 1,
            n: group.values.len(),
            mean: mean(&group.values),
            std: std_dev(&group.values, 0),
            sem: standard_error(&group.values),
            q1: q(0.25),
            median: q(0.5),
            q3: q(0.75),
            min: s.first().copied().unwrap_or_else(T::nan),
            max: s.last().copied().unwrap_or_else(T::nan),
        }
    }

    /// Interquartile range.
    pub fn iqr(&self) -> T {
        self.q3 - self.q1
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Outcome of one pairwise comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    /// Indices of the compared groups.
    pub pair: Pair,

    /// Label of the left group.
    pub first_label: String,

    /// Label of the right group.
    pub second_label: String,

    /// Mean of the left group.
    pub first_mean: f64,

    /// Mean of the right group.
    pub second_mean: f64,

    /// t statistic.
    pub statistic: f64,

    /// Degrees of freedom.
    pub df: f64,

    /// Raw two-sided p-value.
    pub p_value: f64,

    /// Corrected p-value (may exceed 1).
    pub p_adjusted: f64,

    /// Tier of the corrected p-value.
    pub tier: SignificanceTier,
}

impl Comparison {
    /// Whether a bracket is drawn for this comparison.
    #[inline]
    pub fn is_significant(&self) -> bool {
        self.tier.is_significant()
    }

    /// Symbol of the comparison's tier.
    #[inline]
    pub fn symbol(&self) -> &'static str {
        self.tier.symbol()
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} x {}: t={:.4} df={:.2} p={:.6e} padj={:.6e} {}",
            self.first_label,
            self.second_label,
            self.statistic,
            self.df,
            self.p_value,
            self.p_adjusted,
            self.tier
        )
    }
}

// ============================================================================
// Skipped Pair
// ============================================================================

/// A pair that could not be tested during a plot run.
///
/// Plots still draw every group; the pair simply gets no bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPair {
    /// Indices of the groups.
    pub pair: Pair,

    /// Label of the left group.
    pub first_label: String,

    /// Label of the right group.
    pub second_label: String,

    /// Why the test was undefined.
    pub reason: DeliceError,
}

impl Display for SkippedPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} x {}: skipped ({})", self.first_label, self.second_label, self.reason)
    }
}

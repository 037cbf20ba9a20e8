//! Output types for annotation runs.
//!
//! ## Purpose
//!
//! This module defines `AnnotationResult`, which collects the group summaries
//! and the ordered comparison list of one annotation run.
//!
//! ## Design notes
//!
//! * **Ordered**: Comparisons keep enumeration order, widest pair first.
//! * **Ergonomics**: Implements `Display` for a human-readable table.
//!
//! ## Invariants
//!
//! * `pairs_tested` is the number of pairs enumerated, whether or not every
//!   comparison was retained or could be computed.
//! * Every retained comparison's `p_adjusted` was computed with `pairs_tested`.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::correction::Correction;
use crate::algorithms::ttest::TTest;
use crate::engine::executor::NsPolicy;
use crate::evaluation::summary::{Comparison, GroupSummary, SkippedPair};

// ============================================================================
// Result Structure
// ============================================================================

/// Summaries and ordered pairwise comparisons of one annotation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult<T> {
    /// One summary per group, in group order.
    pub groups: Vec<GroupSummary<T>>,

    /// Retained comparisons, widest pair first.
    pub comparisons: Vec<Comparison>,

    /// Pairs whose test was undefined; only plots record these.
    pub skipped: Vec<SkippedPair>,

    /// Number of pairs tested (the Bonferroni factor).
    pub pairs_tested: usize,

    /// Test used for every pair.
    pub test: TTest,

    /// Correction applied to raw p-values.
    pub correction: Correction,

    /// Retention policy for non-significant pairs.
    pub ns_policy: NsPolicy,
}

impl<T: Float> AnnotationResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Group labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// Comparisons that receive a bracket.
    pub fn significant(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(|c| c.is_significant())
    }

    /// Comparison between two labels, in either order.
    pub fn find(&self, a: &str, b: &str) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| {
            (c.first_label == a && c.second_label == b) || (c.first_label == b && c.second_label == a)
        })
    }

    /// Summary of the group with this label.
    pub fn group(&self, label: &str) -> Option<&GroupSummary<T>> {
        self.groups.iter().find(|g| g.label == label)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for AnnotationResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Groups:       {}", self.groups.len())?;
        writeln!(f, "  Pairs tested: {}", self.pairs_tested)?;
        if !self.skipped.is_empty() {
            writeln!(f, "  Skipped:      {}", self.skipped.len())?;
        }
        writeln!(f, "  Test:         {}", self.test.name())?;
        writeln!(f, "  Correction:   {}", self.correction.name())?;
        writeln!(f)?;

        writeln!(f, "Groups:")?;
        writeln!(f, "{:>12} {:>6} {:>12} {:>12}", "Label", "N", "Mean", "Std")?;
        writeln!(f, "{:-<45}", "")?;
        for g in &self.groups {
            writeln!(f, "{:>12} {:>6} {:>12.6} {:>12.6}", g.label, g.n, g.mean, g.std)?;
        }
        writeln!(f)?;

        writeln!(f, "Comparisons:")?;
        writeln!(
            f,
            "{:>12} {:>12} {:>10} {:>12} {:>12} {:>5}",
            "First", "Second", "t", "p", "p_adj", "Sig"
        )?;
        writeln!(f, "{:-<68}", "")?;
        for c in &self.comparisons {
            writeln!(
                f,
                "{:>12} {:>12} {:>10.4} {:>12.4e} {:>12.4e} {:>5}",
                c.first_label,
                c.second_label,
                c.statistic,
                c.p_value,
                c.p_adjusted,
                c.symbol()
            )?;
        }
        for s in &self.skipped {
            writeln!(f, "{s}")?;
        }

        Ok(())
    }
}

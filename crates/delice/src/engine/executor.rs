//! Execution engine for pairwise significance annotation.
//!
//! ## Purpose
//!
//! This module runs the comparison procedure on an observation set:
//! summarize every group, enumerate pairs widest first, test each pair,
//! correct the p-value, classify it, and decide which rows to keep.
//!
//! ## Design notes
//!
//! * **Pure**: The run has no side effects other than `tracing` events and
//!   the optional observer callbacks.
//! * **Deterministic**: Identical input yields identical output; the input is
//!   never reordered.
//! * **Explicit retention**: Whether `ns` rows stay in the result is a
//!   configured [`NsPolicy`], never implied by the plot kind.
//! * **Untestable pairs**: By default an undefined t statistic aborts the
//!   run. Plots switch on [`AnnotationExecutor::skip_untestable`] so such a
//!   pair is recorded in `skipped` and the figure is still drawn.
//!
//! ## Invariants
//!
//! * Exactly `n(n-1)/2` pairs are tested for `n` groups.
//! * The correction factor is the number of pairs enumerated, independent of
//!   how many rows are retained or skipped.
//!
//! ## Non-goals
//!
//! * This module does not validate styling or draw anything.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::correction::Correction;
use crate::algorithms::pairs::enumerate_pairs;
use crate::algorithms::tier::SignificanceTier;
use crate::algorithms::ttest::TTest;
use crate::engine::output::AnnotationResult;
use crate::engine::validator::Validator;
use crate::evaluation::observer::ComparisonObserver;
use crate::evaluation::summary::{Comparison, GroupSummary, SkippedPair};
use crate::primitives::errors::DeliceError;
use crate::primitives::groups::ObservationSet;

// ============================================================================
// Configuration
// ============================================================================

/// Retention policy for comparisons that are not significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NsPolicy {
    /// Keep `ns` rows. They occupy a stacking level but draw no bracket.
    #[default]
    Keep,

    /// Drop `ns` rows after reporting them; brackets stack without gaps.
    Discard,
}

/// Parameters of an annotation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnotationConfig {
    /// t-test variant.
    pub test: TTest,

    /// p-value correction.
    pub correction: Correction,

    /// Retention of `ns` rows.
    pub ns_policy: NsPolicy,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs pairwise comparisons on an observation set.
#[derive(Debug)]
pub struct AnnotationExecutor<'a, T> {
    config: AnnotationConfig,
    observer: Option<&'a dyn ComparisonObserver<T>>,
    skip_untestable: bool,
}

impl<'a, T: Float> AnnotationExecutor<'a, T> {
    /// Create an executor without an observer.
    pub fn new(config: AnnotationConfig) -> Self {
        Self {
            config,
            observer: None,
            skip_untestable: false,
        }
    }

    /// Attach an observer that sees every summary and comparison.
    pub fn with_observer(mut self, observer: Option<&'a dyn ComparisonObserver<T>>) -> Self {
        self.observer = observer;
        self
    }

    /// Record pairs whose test is undefined instead of failing the run.
    pub fn skip_untestable(mut self, skip: bool) -> Self {
        self.skip_untestable = skip;
        self
    }

    /// Run the annotation.
    pub fn run(&self, set: &ObservationSet<T>) -> Result<AnnotationResult<T>, DeliceError> {
        Validator::validate_observations(set)?;

        let groups: Vec<GroupSummary<T>> = set
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| GroupSummary::from_group(g, i))
            .collect();
        if let Some(observer) = self.observer {
            groups.iter().for_each(|g| observer.on_group(g));
        }

        let pairs = enumerate_pairs(set.len());
        let pairs_tested = pairs.len();
        let mut comparisons = Vec::with_capacity(pairs_tested);
        let mut skipped = Vec::new();

        for pair in pairs {
            let a = &set.groups[pair.first];
            let b = &set.groups[pair.second];
            let outcome = match self
                .config
                .test
                .run((a.label.as_str(), &a.values[..]), (b.label.as_str(), &b.values[..]))
            {
                Ok(outcome) => outcome,
                Err(reason) if self.skip_untestable => {
                    tracing::warn!(
                        first = %a.label,
                        second = %b.label,
                        reason = %reason,
                        "pair skipped"
                    );
                    let skip = SkippedPair {
                        pair,
                        first_label: a.label.clone(),
                        second_label: b.label.clone(),
                        reason,
                    };
                    if let Some(observer) = self.observer {
                        observer.on_skipped(&skip);
                    }
                    skipped.push(skip);
                    continue;
                }
                Err(err) => return Err(err),
            };

            let p_adjusted = self.config.correction.adjust(outcome.p_value, pairs_tested);
            let comparison = Comparison {
                pair,
                first_label: a.label.clone(),
                second_label: b.label.clone(),
                first_mean: groups[pair.first].mean.to_f64().unwrap_or(f64::NAN),
                second_mean: groups[pair.second].mean.to_f64().unwrap_or(f64::NAN),
                statistic: outcome.statistic,
                df: outcome.df,
                p_value: outcome.p_value,
                p_adjusted,
                tier: SignificanceTier::from_p_value(p_adjusted),
            };

            tracing::debug!(
                first = %comparison.first_label,
                second = %comparison.second_label,
                statistic = comparison.statistic,
                p_value = comparison.p_value,
                p_adjusted = comparison.p_adjusted,
                tier = comparison.tier.symbol(),
                "pairwise comparison"
            );
            if let Some(observer) = self.observer {
                observer.on_comparison(&comparison);
            }

            match self.config.ns_policy {
                NsPolicy::Discard if !comparison.is_significant() => {}
                _ => comparisons.push(comparison),
            }
        }

        Ok(AnnotationResult {
            groups,
            comparisons,
            skipped,
            pairs_tested,
            test: self.config.test,
            correction: self.config.correction,
            ns_policy: self.config.ns_policy,
        })
    }
}

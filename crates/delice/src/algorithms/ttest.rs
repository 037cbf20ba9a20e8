//! Independent two-sample t-tests.
//!
//! ## Purpose
//!
//! This module compares the means of two independent samples with a two-sided
//! t-test and returns the statistic, degrees of freedom, and p-value.
//!
//! ## Design notes
//!
//! * **Student** (default): pooled variance, `df = n1 + n2 - 2`.
//! * **Welch**: separate variances, Welch–Satterthwaite degrees of freedom.
//! * **Degenerate samples**: A zero standard error with equal means has no
//!   defined statistic and is reported as `DegenerateComparison`; with
//!   different means the statistic is infinite and `p = 0`.
//!
//! ## Invariants
//!
//! * The statistic is positive when the first sample has the larger mean.
//! * p-values are in `[0, 1]`.
//!
//! ## Non-goals
//!
//! * This module does not test paired samples or one-sided alternatives.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::descriptive::{mean, variance};
use crate::math::distribution::two_sided_p_value;
use crate::primitives::errors::DeliceError;

// ============================================================================
// Test Kind
// ============================================================================

/// Variant of the independent two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TTest {
    /// Student's t-test assuming equal variances.
    #[default]
    Student,

    /// Welch's t-test for unequal variances.
    Welch,
}

/// Outcome of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TTestResult {
    /// t statistic.
    pub statistic: f64,

    /// Degrees of freedom.
    pub df: f64,

    /// Two-sided p-value.
    pub p_value: f64,
}

impl TTest {
    /// Name of the test.
    pub const fn name(&self) -> &'static str {
        match self {
            TTest::Student => "Student",
            TTest::Welch => "Welch",
        }
    }

    /// Run the test on two labeled samples.
    ///
    /// Labels only serve error messages.
    pub fn run<T: Float>(
        &self,
        (label_a, a): (&str, &[T]),
        (label_b, b): (&str, &[T]),
    ) -> Result<TTestResult, DeliceError> {
        for (label, sample) in [(label_a, a), (label_b, b)] {
            if sample.is_empty() {
                return Err(DeliceError::EmptyGroup(label.to_string()));
            }
        }

        let n1 = a.len() as f64;
        let n2 = b.len() as f64;
        let m1 = to_f64(mean(a));
        let m2 = to_f64(mean(b));

        let (se, df) = match self {
            TTest::Student => {
                if a.len() + b.len() < 3 {
                    return Err(DeliceError::TooFewObservations {
                        group: smaller_label((label_a, a.len()), (label_b, b.len())),
                        got: a.len().min(b.len()),
                        min: 2,
                    });
                }
                let ss1 = if a.len() > 1 { to_f64(variance(a, 1)) * (n1 - 1.0) } else { 0.0 };
                let ss2 = if b.len() > 1 { to_f64(variance(b, 1)) * (n2 - 1.0) } else { 0.0 };
                let df = n1 + n2 - 2.0;
                let pooled = (ss1 + ss2) / df;
                ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
            }
            TTest::Welch => {
                for (label, sample) in [(label_a, a), (label_b, b)] {
                    if sample.len() < 2 {
                        return Err(DeliceError::TooFewObservations {
                            group: label.to_string(),
                            got: sample.len(),
                            min: 2,
                        });
                    }
                }
                let v1 = to_f64(variance(a, 1)) / n1;
                let v2 = to_f64(variance(b, 1)) / n2;
                let se2 = v1 + v2;
                let denom = v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0);
                // Both variances zero: df is 0/0; fall back to the pooled value.
                let df = if denom > 0.0 { se2 * se2 / denom } else { n1 + n2 - 2.0 };
                (se2.sqrt(), df)
            }
        };

        let diff = m1 - m2;
        if se == 0.0 && diff == 0.0 {
            return Err(DeliceError::DegenerateComparison {
                first: label_a.to_string(),
                second: label_b.to_string(),
            });
        }

        let statistic = diff / se;
        if statistic.is_nan() {
            return Err(DeliceError::DegenerateComparison {
                first: label_a.to_string(),
                second: label_b.to_string(),
            });
        }

        let p_value = two_sided_p_value(statistic, df)?;

        Ok(TTestResult {
            statistic,
            df,
            p_value,
        })
    }
}

#[inline]
fn to_f64<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

fn smaller_label((la, na): (&str, usize), (lb, nb): (&str, usize)) -> String {
    if na <= nb { la.to_string() } else { lb.to_string() }
}

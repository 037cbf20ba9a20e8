//! Student's t distribution tail probabilities.
//!
//! ## Purpose
//!
//! This module converts a t statistic and its degrees of freedom into the
//! two-sided p-value used by the pairwise comparisons.
//!
//! ## Design notes
//!
//! * **Delegated**: The CDF comes from `statrs` (regularized incomplete beta),
//!   evaluated on the lower tail so small p-values keep full precision.
//! * **Infinite statistics**: `|t| = inf` maps to `p = 0` without consulting
//!   the distribution.
//!
//! ## Invariants
//!
//! * Returned p-values are in `[0, 1]`.
//!
//! ## Non-goals
//!
//! * This module does not compute quantiles or one-sided alternatives.

// External dependencies
use statrs::distribution::{ContinuousCDF, StudentsT};

// Internal dependencies
use crate::primitives::errors::DeliceError;

/// Two-sided p-value `P(|T| >= |t|)` for a t statistic with `df` degrees of freedom.
pub fn two_sided_p_value(t: f64, df: f64) -> Result<f64, DeliceError> {
    if !df.is_finite() || df <= 0.0 {
        return Err(DeliceError::InvalidDegreesOfFreedom(df));
    }
    if t.is_infinite() {
        return Ok(0.0);
    }

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|_| DeliceError::InvalidDegreesOfFreedom(df))?;
    let p = 2.0 * dist.cdf(-t.abs());

    Ok(p.clamp(0.0, 1.0))
}

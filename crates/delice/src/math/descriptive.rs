//! Descriptive statistics for group summaries and t-tests.
//!
//! ## Purpose
//!
//! This module provides the moments and order statistics the rest of the crate
//! needs: mean, variance with a chosen delta degrees of freedom, standard
//! deviation, and linearly interpolated quantiles.
//!
//! ## Design notes
//!
//! * **Two-pass variance**: The mean is computed first, then squared deviations,
//!   which avoids the cancellation of the textbook one-pass formula.
//! * **NaN on undefined**: An empty slice has NaN mean; a variance with
//!   `n <= ddof` is NaN. Callers that must not see NaN validate sizes first.
//! * **Quantiles**: Linear interpolation between order statistics (`(n-1)p`
//!   positions), the same rule as the common default in numeric libraries.
//!
//! ## Invariants
//!
//! * Variance and standard deviation are non-negative when defined.
//! * `quantile(v, 0.0) == min(v)` and `quantile(v, 1.0) == max(v)`.
//!
//! ## Non-goals
//!
//! * This module does not perform weighted or streaming statistics.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Moments
// ============================================================================

/// Arithmetic mean; NaN for an empty slice.
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let n = T::from(values.len()).unwrap();
    values.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Variance with `ddof` delta degrees of freedom (`0` population, `1` sample).
#[inline]
pub fn variance<T: Float>(values: &[T], ddof: usize) -> T {
    let n = values.len();
    if n <= ddof {
        return T::nan();
    }
    let m = mean(values);
    let ss = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - m;
        acc + d * d
    });
    ss / T::from(n - ddof).unwrap()
}

/// Standard deviation with `ddof` delta degrees of freedom.
#[inline]
pub fn std_dev<T: Float>(values: &[T], ddof: usize) -> T {
    variance(values, ddof).sqrt()
}

/// Standard error of the mean (sample standard deviation over sqrt(n)).
#[inline]
pub fn standard_error<T: Float>(values: &[T]) -> T {
    std_dev(values, 1) / T::from(values.len()).unwrap().sqrt()
}

// ============================================================================
// Order Statistics
// ============================================================================

/// Return a sorted copy; NaN values sort last.
pub fn sorted<T: Float>(values: &[T]) -> Vec<T> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
    out
}

/// Quantile of already sorted data by linear interpolation.
///
/// `p` is clamped to `[0, 1]`. Returns NaN for an empty slice.
pub fn quantile_sorted<T: Float>(sorted: &[T], p: T) -> T {
    let n = sorted.len();
    if n == 0 {
        return T::nan();
    }
    if n == 1 {
        return sorted[0];
    }

    let p = p.max(T::zero()).min(T::one());
    let pos = p * T::from(n - 1).unwrap();
    let lo = pos.floor();
    let frac = pos - lo;
    let i = lo.to_usize().unwrap_or(0).min(n - 1);
    let j = (i + 1).min(n - 1);

    sorted[i] + (sorted[j] - sorted[i]) * frac
}

/// Quantile of unsorted data.
pub fn quantile<T: Float>(values: &[T], p: T) -> T {
    quantile_sorted(&sorted(values), p)
}

/// Median of unsorted data.
pub fn median<T: Float>(values: &[T]) -> T {
    quantile(values, T::from(0.5).unwrap())
}

/// Minimum and maximum, or `None` for an empty slice.
pub fn min_max<T: Float>(values: &[T]) -> Option<(T, T)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

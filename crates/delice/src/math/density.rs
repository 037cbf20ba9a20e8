//! Kernel density estimation for violin bodies.
//!
//! ## Purpose
//!
//! This module estimates a univariate density from a group's observations and
//! evaluates it on a regular grid spanning the data. Violin plots draw the
//! mirrored, width-normalized curve.
//!
//! ## Design notes
//!
//! * **Normalization**: Densities integrate to one: each kernel carries its
//!   integral `c_K` so `f(x) = sum K((x - x_i) / h) / (n h c_K)`.
//! * **Bandwidth**: `h = factor * s`, with `s` the sample standard deviation and
//!   the factor from Scott's or Silverman's rule, or a fixed factor.
//! * **Degenerate data**: Zero spread gives no estimate (`None`); callers
//!   draw a flat body instead.
//!
//! ## Key concepts
//!
//! * **Gaussian**: The default kernel, unbounded support.
//! * **Bounded kernels**: Zero outside `|u| >= 1`.
//!
//! ## Invariants
//!
//! * Kernels are non-negative and symmetric.
//! * Evaluated densities are non-negative.
//!
//! ## Non-goals
//!
//! * This module does not select bandwidths by cross-validation.
//! * This module does not estimate multivariate densities.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::descriptive::{min_max, std_dev};

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Square root of 2*pi, the integral of the unnormalized Gaussian kernel.
const SQRT_2PI: f64 = 2.5066282746310005024157652848110452530069867406099_f64;

/// Beyond this normalized distance the Gaussian contributes nothing visible.
const GAUSSIAN_CUTOFF: f64 = 8.0;

/// Number of evaluation points along a violin body.
pub const DEFAULT_POINTS: usize = 100;

// ============================================================================
// Density Kernel
// ============================================================================

/// Smoothing kernel for density estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DensityKernel {
    /// Gaussian kernel: K(u) = exp(-u^2 / 2).
    #[default]
    Gaussian,

    /// Epanechnikov kernel: K(u) = 1 - u^2 for |u| < 1.
    Epanechnikov,

    /// Biweight kernel: K(u) = (1 - u^2)^2 for |u| < 1.
    Biweight,

    /// Triangular kernel: K(u) = 1 - |u| for |u| < 1.
    Triangle,

    /// Uniform kernel: K(u) = 1 for |u| < 1.
    Uniform,
}

impl DensityKernel {
    /// Name of the kernel.
    pub const fn name(&self) -> &'static str {
        match self {
            DensityKernel::Gaussian => "Gaussian",
            DensityKernel::Epanechnikov => "Epanechnikov",
            DensityKernel::Biweight => "Biweight",
            DensityKernel::Triangle => "Triangle",
            DensityKernel::Uniform => "Uniform",
        }
    }

    /// Integral of the unnormalized kernel over its support.
    pub const fn integrator(&self) -> f64 {
        match self {
            DensityKernel::Gaussian => SQRT_2PI,
            DensityKernel::Epanechnikov => 4.0 / 3.0,
            DensityKernel::Biweight => 16.0 / 15.0,
            DensityKernel::Triangle => 1.0,
            DensityKernel::Uniform => 2.0,
        }
    }

    /// Unnormalized kernel value K(u).
    #[inline]
    pub fn evaluate(&self, u: f64) -> f64 {
        let a = u.abs();
        match self {
            DensityKernel::Gaussian => {
                if a > GAUSSIAN_CUTOFF {
                    0.0
                } else {
                    (-0.5 * a * a).exp()
                }
            }
            _ if a >= 1.0 => 0.0,
            DensityKernel::Epanechnikov => 1.0 - a * a,
            DensityKernel::Biweight => {
                let t = 1.0 - a * a;
                t * t
            }
            DensityKernel::Triangle => 1.0 - a,
            DensityKernel::Uniform => 1.0,
        }
    }
}

// ============================================================================
// Bandwidth Rules
// ============================================================================

/// Rule for the bandwidth factor applied to the sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandwidthRule {
    /// Scott's rule: `n^(-1/5)`.
    #[default]
    Scott,

    /// Silverman's rule: `(3n/4)^(-1/5)`.
    Silverman,

    /// A fixed factor.
    Factor(f64),
}

impl BandwidthRule {
    /// Bandwidth factor for `n` observations.
    pub fn factor(&self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            BandwidthRule::Scott => n.powf(-0.2),
            BandwidthRule::Silverman => (n * 3.0 / 4.0).powf(-0.2),
            BandwidthRule::Factor(f) => *f,
        }
    }
}

// ============================================================================
// Density Estimate
// ============================================================================

/// A fitted kernel density estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityEstimate {
    samples: Vec<f64>,
    bandwidth: f64,
    kernel: DensityKernel,
}

impl DensityEstimate {
    /// Fit a density to `values`; `None` if fewer than two values or zero spread.
    pub fn fit<T: Float>(values: &[T], kernel: DensityKernel, rule: BandwidthRule) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }
        let spread = std_dev(values, 1).to_f64()?;
        let bandwidth = rule.factor(values.len()) * spread;
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return None;
        }

        Some(Self {
            samples: values.iter().filter_map(|v| v.to_f64()).collect(),
            bandwidth,
            kernel,
        })
    }

    /// Bandwidth in data units.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| self.kernel.evaluate((x - xi) / h))
            .sum();
        sum / (self.samples.len() as f64 * h * self.kernel.integrator())
    }

    /// Evaluate on `points` evenly spaced coordinates from the sample minimum
    /// to the sample maximum. Returns `(coords, densities)`.
    pub fn evaluate_grid(&self, points: usize) -> (Vec<f64>, Vec<f64>) {
        let Some((lo, hi)) = min_max(&self.samples) else {
            return (Vec::new(), Vec::new());
        };
        let coords = linspace(lo, hi, points);
        let densities = coords.iter().map(|&x| self.evaluate(x)).collect();
        (coords, densities)
    }
}

/// `points` evenly spaced values from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Scale densities so the largest equals `half_width`.
pub fn normalize_width(densities: &[f64], half_width: f64) -> Vec<f64> {
    let peak = densities.iter().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        return vec![0.0; densities.len()];
    }
    densities.iter().map(|d| d / peak * half_width).collect()
}

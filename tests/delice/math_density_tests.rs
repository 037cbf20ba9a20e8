#![cfg(feature = "dev")]
//! Tests for kernel density estimation.
//!
//! These tests verify the density machinery behind violin bodies:
//! - Kernel shapes and normalization constants
//! - Bandwidth rules
//! - Fitting, grid evaluation, and width normalization
//!
//! ## Test Organization
//!
//! 1. **Kernels** - Values, supports, integrals
//! 2. **Bandwidth** - Scott, Silverman, fixed factor
//! 3. **Estimates** - Fitting and evaluation
//! 4. **Widths** - Grid helpers and scaling

use approx::assert_relative_eq;

use delice::internals::math::density::{
    linspace, normalize_width, BandwidthRule, DensityEstimate, DensityKernel, DEFAULT_POINTS,
};

// ============================================================================
// Kernel Tests
// ============================================================================

/// Test that every kernel peaks at zero.
#[test]
fn test_kernel_peak() {
    for kernel in [
        DensityKernel::Gaussian,
        DensityKernel::Epanechnikov,
        DensityKernel::Biweight,
        DensityKernel::Triangle,
        DensityKernel::Uniform,
    ] {
        assert_relative_eq!(kernel.evaluate(0.0), 1.0);
        assert!(kernel.evaluate(0.5) <= kernel.evaluate(0.0), "{} is not peaked", kernel.name());
    }
}

/// Test that compact kernels vanish outside `[-1, 1]`.
#[test]
fn test_kernel_compact_support() {
    for kernel in [
        DensityKernel::Epanechnikov,
        DensityKernel::Biweight,
        DensityKernel::Triangle,
        DensityKernel::Uniform,
    ] {
        assert_eq!(kernel.evaluate(1.0), 0.0);
        assert_eq!(kernel.evaluate(-1.5), 0.0);
    }
    assert!(DensityKernel::Gaussian.evaluate(1.5) > 0.0);
}

/// Test that each integrator matches a numerical integral of its kernel.
#[test]
fn test_kernel_integrators() {
    let grid = linspace(-10.0, 10.0, 200_001);
    let dx = grid[1] - grid[0];

    for kernel in [
        DensityKernel::Gaussian,
        DensityKernel::Epanechnikov,
        DensityKernel::Biweight,
        DensityKernel::Triangle,
    ] {
        let integral: f64 = grid.iter().map(|&u| kernel.evaluate(u)).sum::<f64>() * dx;
        assert_relative_eq!(integral, kernel.integrator(), max_relative = 1e-3);
    }
}

// ============================================================================
// Bandwidth Tests
// ============================================================================

/// Test the bandwidth factors.
#[test]
fn test_bandwidth_rules() {
    assert_relative_eq!(BandwidthRule::Scott.factor(32), 0.5, epsilon = 1e-12);
    assert_relative_eq!(BandwidthRule::Silverman.factor(32), 24.0_f64.powf(-0.2), epsilon = 1e-12);
    assert_relative_eq!(BandwidthRule::Factor(0.3).factor(1000), 0.3);
    assert_eq!(BandwidthRule::default(), BandwidthRule::Scott);
}

// ============================================================================
// Estimate Tests
// ============================================================================

/// Test that the bandwidth is the factor times the sample standard deviation.
#[test]
fn test_fit_bandwidth() {
    let kde = DensityEstimate::fit(&[1.0, 2.0, 3.0], DensityKernel::Gaussian, BandwidthRule::Scott).unwrap();

    assert_relative_eq!(kde.bandwidth(), 3.0_f64.powf(-0.2), epsilon = 1e-12);
}

/// Test that degenerate samples have no density.
#[test]
fn test_fit_degenerate() {
    assert!(DensityEstimate::fit(&[1.0], DensityKernel::Gaussian, BandwidthRule::Scott).is_none());
    assert!(DensityEstimate::fit(&[2.0, 2.0, 2.0], DensityKernel::Gaussian, BandwidthRule::Scott).is_none());
    assert!(DensityEstimate::fit(&[1.0, 2.0], DensityKernel::Gaussian, BandwidthRule::Factor(0.0)).is_none());
}

/// Test that the Gaussian estimate integrates to about one.
#[test]
fn test_density_integrates_to_one() {
    let kde = DensityEstimate::fit(
        &[4.1, 5.2, 6.3, 5.5, 4.9],
        DensityKernel::Gaussian,
        BandwidthRule::Scott,
    )
    .unwrap();
    let grid = linspace(-5.0, 15.0, 20_001);
    let dx = grid[1] - grid[0];
    let integral: f64 = grid.iter().map(|&x| kde.evaluate(x)).sum::<f64>() * dx;

    assert_relative_eq!(integral, 1.0, max_relative = 1e-3);
}

/// Test that the grid spans the sample range.
#[test]
fn test_evaluate_grid_range() {
    let kde = DensityEstimate::fit(&[3.0, 1.0, 2.0, 5.0], DensityKernel::Epanechnikov, BandwidthRule::Scott).unwrap();
    let (coords, densities) = kde.evaluate_grid(DEFAULT_POINTS);

    assert_eq!(coords.len(), DEFAULT_POINTS);
    assert_eq!(densities.len(), DEFAULT_POINTS);
    assert_relative_eq!(coords[0], 1.0);
    assert_relative_eq!(coords[DEFAULT_POINTS - 1], 5.0, epsilon = 1e-12);
    assert!(densities.iter().all(|&d| d >= 0.0));
}

/// Test that a symmetric sample gives a symmetric density.
#[test]
fn test_density_symmetric() {
    let kde = DensityEstimate::fit(&[-2.0, -1.0, 1.0, 2.0], DensityKernel::Gaussian, BandwidthRule::Silverman).unwrap();

    assert_relative_eq!(kde.evaluate(-0.7), kde.evaluate(0.7), epsilon = 1e-12);
}

// ============================================================================
// Width Tests
// ============================================================================

/// Test evenly spaced grids.
#[test]
fn test_linspace() {
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    assert!(linspace(0.0, 1.0, 0).is_empty());
}

/// Test that the widest point equals the half width.
#[test]
fn test_normalize_width() {
    let widths = normalize_width(&[0.1, 0.4, 0.2], 0.425);

    assert_relative_eq!(widths[1], 0.425);
    assert_relative_eq!(widths[0], 0.425 / 4.0, epsilon = 1e-12);
    assert_eq!(normalize_width(&[0.0, 0.0], 1.0), vec![0.0, 0.0]);
}

#![cfg(feature = "dev")]
//! Tests for the two-sample t-tests.
//!
//! Reference values were computed independently for the same samples.
//!
//! ## Test Organization
//!
//! 1. **Student** - Pooled-variance statistic, df, p-value
//! 2. **Welch** - Satterthwaite df and p-value
//! 3. **Properties** - Symmetry under swapping the samples
//! 4. **Edge Cases** - Tiny, constant, and empty samples

use approx::assert_relative_eq;

use delice::internals::algorithms::ttest::TTest;
use delice::internals::primitives::errors::DeliceError;

// ============================================================================
// Helper Functions
// ============================================================================

const CONTROL: [f64; 5] = [4.1, 5.2, 6.3, 5.5, 4.9];
const DRUG: [f64; 5] = [6.0, 7.1, 6.8, 7.5, 6.4];
const PLACEBO: [f64; 5] = [4.0, 5.0, 6.0, 5.0, 4.5];

// ============================================================================
// Student Tests
// ============================================================================

/// Test well-separated samples.
#[test]
fn test_student_separated() {
    let r = TTest::Student
        .run(("a", &[1.0, 2.0, 3.0][..]), ("b", &[10.0, 11.0, 12.0][..]))
        .unwrap();

    assert_relative_eq!(r.statistic, -11.022703842524301, max_relative = 1e-9);
    assert_relative_eq!(r.df, 4.0);
    assert_relative_eq!(r.p_value, 0.000_385_067_711_366_541_4, max_relative = 1e-6);
}

/// Test the three reference pairs.
#[test]
fn test_student_reference_pairs() {
    let ab = TTest::Student.run(("control", &CONTROL[..]), ("drug", &DRUG[..])).unwrap();
    let ac = TTest::Student.run(("control", &CONTROL[..]), ("placebo", &PLACEBO[..])).unwrap();
    let bc = TTest::Student.run(("drug", &DRUG[..]), ("placebo", &PLACEBO[..])).unwrap();

    assert_relative_eq!(ab.statistic, -3.50054, max_relative = 1e-5);
    assert_relative_eq!(ab.p_value, 0.008_072_697_219_346_93, max_relative = 1e-6);
    assert_relative_eq!(ac.statistic, 0.61237, max_relative = 1e-4);
    assert_relative_eq!(ac.p_value, 0.557_292_162_240_988_5, max_relative = 1e-6);
    assert_relative_eq!(bc.statistic, 4.40121, max_relative = 1e-5);
    assert_relative_eq!(bc.p_value, 0.002_283_055_721_583_392_4, max_relative = 1e-6);
}

/// Test unequal sample sizes.
#[test]
fn test_student_unequal_sizes() {
    let r = TTest::Student
        .run(("x", &[2.0, 4.0, 6.0, 8.0][..]), ("y", &[1.0, 3.0, 8.0, 9.5, 10.0][..]))
        .unwrap();

    assert_relative_eq!(r.df, 7.0);
    assert_relative_eq!(r.p_value, 0.597_127_497_504_098_7, max_relative = 1e-6);
}

// ============================================================================
// Welch Tests
// ============================================================================

/// Test that equal sizes and variances reproduce Student's result.
#[test]
fn test_welch_matches_student_when_balanced() {
    let a = [1.0, 2.0, 3.0];
    let b = [10.0, 11.0, 12.0];
    let s = TTest::Student.run(("a", &a[..]), ("b", &b[..])).unwrap();
    let w = TTest::Welch.run(("a", &a[..]), ("b", &b[..])).unwrap();

    assert_relative_eq!(w.statistic, s.statistic, max_relative = 1e-12);
    assert_relative_eq!(w.df, 4.0, max_relative = 1e-12);
    assert_relative_eq!(w.p_value, s.p_value, max_relative = 1e-9);
}

/// Test the Welch reference pair.
#[test]
fn test_welch_reference() {
    let r = TTest::Welch.run(("control", &CONTROL[..]), ("drug", &DRUG[..])).unwrap();

    assert_relative_eq!(r.statistic, -3.50054, max_relative = 1e-5);
    assert_relative_eq!(r.df, 7.30205, max_relative = 1e-5);
    assert_relative_eq!(r.p_value, 0.009_331_972_167_277_968, max_relative = 1e-6);
}

/// Test Welch on unequal sizes.
#[test]
fn test_welch_unequal_sizes() {
    let r = TTest::Welch
        .run(("x", &[2.0, 4.0, 6.0, 8.0][..]), ("y", &[1.0, 3.0, 8.0, 9.5, 10.0][..]))
        .unwrap();

    assert_relative_eq!(r.df, 6.76456, max_relative = 1e-5);
    assert_relative_eq!(r.p_value, 0.578_220_054_403_919_1, max_relative = 1e-6);
}

// ============================================================================
// Property Tests
// ============================================================================

/// Test that swapping the samples negates t and keeps p.
#[test]
fn test_swap_symmetry() {
    for test in [TTest::Student, TTest::Welch] {
        let ab = test.run(("a", &CONTROL[..]), ("b", &DRUG[..])).unwrap();
        let ba = test.run(("b", &DRUG[..]), ("a", &CONTROL[..])).unwrap();

        assert_relative_eq!(ab.statistic, -ba.statistic, epsilon = 1e-12);
        assert_relative_eq!(ab.p_value, ba.p_value, epsilon = 1e-12);
    }
}

/// Test single precision input.
#[test]
fn test_student_f32() {
    let a = [1.0_f32, 2.0, 3.0];
    let b = [10.0_f32, 11.0, 12.0];
    let r = TTest::Student.run(("a", &a[..]), ("b", &b[..])).unwrap();

    assert_relative_eq!(r.p_value, 0.000_385_067_711_366_541_4, max_relative = 1e-4);
}

/// Test test names.
#[test]
fn test_names() {
    assert_eq!(TTest::Student.name(), "Student");
    assert_eq!(TTest::Welch.name(), "Welch");
    assert_eq!(TTest::default(), TTest::Student);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// Test that identical constant samples are degenerate.
#[test]
fn test_degenerate_comparison() {
    for test in [TTest::Student, TTest::Welch] {
        let res = test.run(("a", &[3.0, 3.0][..]), ("b", &[3.0, 3.0, 3.0][..]));

        assert_eq!(
            res.unwrap_err(),
            DeliceError::DegenerateComparison {
                first: "a".to_string(),
                second: "b".to_string(),
            }
        );
    }
}

/// Test that distinct constant samples are infinitely significant.
#[test]
fn test_constant_distinct_samples() {
    let r = TTest::Student.run(("a", &[1.0, 1.0][..]), ("b", &[2.0, 2.0][..])).unwrap();

    assert!(r.statistic.is_infinite());
    assert_eq!(r.p_value, 0.0);
}

/// Test that Student's test pools a single observation.
#[test]
fn test_student_single_observation() {
    let r = TTest::Student.run(("a", &[5.0][..]), ("b", &[1.0, 2.0, 3.0][..])).unwrap();

    assert_relative_eq!(r.df, 2.0);
    assert!(r.p_value > 0.0 && r.p_value < 1.0);
}

/// Test that two singletons cannot be tested.
#[test]
fn test_student_two_singletons() {
    let res = TTest::Student.run(("a", &[1.0][..]), ("b", &[2.0][..]));

    assert_eq!(
        res.unwrap_err(),
        DeliceError::TooFewObservations {
            group: "a".to_string(),
            got: 1,
            min: 2,
        }
    );
}

/// Test that Welch's test needs two observations per sample.
#[test]
fn test_welch_singleton() {
    let res = TTest::Welch.run(("a", &[1.0, 2.0][..]), ("b", &[2.0][..]));

    assert!(matches!(
        res,
        Err(DeliceError::TooFewObservations { ref group, got: 1, min: 2 }) if group == "b"
    ));
}

/// Test that an empty sample is rejected by label.
#[test]
fn test_empty_sample() {
    let empty: [f64; 0] = [];
    let res = TTest::Student.run(("a", &[1.0, 2.0][..]), ("b", &empty[..]));

    assert_eq!(res.unwrap_err(), DeliceError::EmptyGroup("b".to_string()));
}

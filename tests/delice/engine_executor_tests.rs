#![cfg(feature = "dev")]
//! Tests for the annotation executor and its results.
//!
//! These tests verify the full pairwise procedure:
//! - Group summaries and pair order
//! - Bonferroni adjustment and tier assignment
//! - Retention policies for non-significant pairs
//! - Observer callbacks and validation errors
//!
//! ## Test Organization
//!
//! 1. **Summaries** - Per-group statistics
//! 2. **Comparisons** - Order, adjustment, tiers
//! 3. **Policies** - Keep and Discard, skipped pairs
//! 4. **Observers** - Callback order and console output
//! 5. **Results** - Queries and display
//! 6. **Validation** - Rejected inputs

use approx::assert_relative_eq;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use delice::internals::algorithms::correction::Correction;
use delice::internals::algorithms::tier::SignificanceTier;
use delice::internals::algorithms::ttest::TTest;
use delice::internals::engine::executor::{AnnotationConfig, AnnotationExecutor, NsPolicy};
use delice::internals::engine::validator::Validator;
use delice::internals::evaluation::observer::{ComparisonObserver, ConsoleObserver};
use delice::internals::evaluation::summary::{Comparison, GroupSummary, SkippedPair};
use delice::internals::primitives::errors::DeliceError;
use delice::internals::primitives::groups::{Group, ObservationSet};

// ============================================================================
// Helper Functions
// ============================================================================

fn three_groups() -> ObservationSet<f64> {
    ObservationSet::from_groups([
        ("A", vec![4.1, 5.2, 6.3, 5.5, 4.9]),
        ("B", vec![6.0, 7.1, 6.8, 7.5, 6.4]),
        ("C", vec![4.0, 5.0, 6.0, 5.0, 4.5]),
    ])
}

fn run(set: &ObservationSet<f64>, config: AnnotationConfig) -> Result<Vec<Comparison>, DeliceError> {
    AnnotationExecutor::new(config).run(set).map(|r| r.comparisons)
}

#[derive(Debug, Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl ComparisonObserver<f64> for Recorder {
    fn on_group(&self, summary: &GroupSummary<f64>) {
        self.events.lock().unwrap().push(format!("group {}", summary.label));
    }

    fn on_comparison(&self, comparison: &Comparison) {
        self.events
            .lock()
            .unwrap()
            .push(format!("pair {}-{}", comparison.first_label, comparison.second_label));
    }

    fn on_skipped(&self, skipped: &SkippedPair) {
        self.events
            .lock()
            .unwrap()
            .push(format!("skip {}-{}", skipped.first_label, skipped.second_label));
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that panics on its first write, then appends to a shared buffer.
#[derive(Clone, Default)]
struct FailsOnce {
    failed: Arc<AtomicBool>,
    buffer: SharedBuffer,
}

impl Write for FailsOnce {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            panic!("writer failed");
        }
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn degenerate_set() -> ObservationSet<f64> {
    ObservationSet::from_groups([
        ("A", vec![1.0, 2.0]),
        ("B", vec![3.0, 3.0]),
        ("C", vec![3.0, 3.0]),
    ])
}

// ============================================================================
// Summary Tests
// ============================================================================

/// Test per-group statistics.
#[test]
fn test_group_summary() {
    let group = Group {
        label: "g".to_string(),
        values: vec![4.0, 1.0, 3.0, 2.0],
    };
    let s = GroupSummary::from_group(&group, 2);

    assert_eq!(s.position, 3);
    assert_eq!(s.n, 4);
    assert_relative_eq!(s.mean, 2.5);
    assert_relative_eq!(s.std, 1.25_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(s.sem, (5.0_f64 / 3.0).sqrt() / 2.0, epsilon = 1e-12);
    assert_relative_eq!(s.q1, 1.75, epsilon = 1e-12);
    assert_relative_eq!(s.median, 2.5, epsilon = 1e-12);
    assert_relative_eq!(s.q3, 3.25, epsilon = 1e-12);
    assert_relative_eq!(s.iqr(), 1.5, epsilon = 1e-12);
    assert_eq!((s.min, s.max), (1.0, 4.0));
}

/// Test that summaries follow group order.
#[test]
fn test_summaries_in_group_order() {
    let result = AnnotationExecutor::new(AnnotationConfig::default())
        .run(&three_groups())
        .unwrap();

    assert_eq!(result.labels(), ["A", "B", "C"]);
    assert_relative_eq!(result.groups[1].mean, 6.76, epsilon = 1e-12);
    assert_eq!(result.groups[2].position, 3);
}

// ============================================================================
// Comparison Tests
// ============================================================================

/// Test pair order, adjusted p-values, and tiers.
#[test]
fn test_three_group_reference() {
    let comparisons = run(&three_groups(), AnnotationConfig::default()).unwrap();
    let labels: Vec<(&str, &str)> = comparisons
        .iter()
        .map(|c| (c.first_label.as_str(), c.second_label.as_str()))
        .collect();

    assert_eq!(labels, vec![("A", "C"), ("A", "B"), ("B", "C")]);

    assert_relative_eq!(comparisons[0].p_adjusted, 1.671_876_486_722_965_5, max_relative = 1e-6);
    assert_relative_eq!(comparisons[1].p_adjusted, 0.024_218_091_658_040_79, max_relative = 1e-6);
    assert_relative_eq!(comparisons[2].p_adjusted, 0.006_849_167_164_750_177, max_relative = 1e-6);

    let symbols: Vec<&str> = comparisons.iter().map(|c| c.symbol()).collect();
    assert_eq!(symbols, vec!["ns", "*", "**"]);
}

/// Test that comparison means are carried along.
#[test]
fn test_comparison_means() {
    let comparisons = run(&three_groups(), AnnotationConfig::default()).unwrap();

    assert_relative_eq!(comparisons[1].first_mean, 5.2, epsilon = 1e-12);
    assert_relative_eq!(comparisons[1].second_mean, 6.76, epsilon = 1e-12);
    assert_relative_eq!(comparisons[1].df, 8.0);
}

/// Test a single extreme pair.
#[test]
fn test_two_group_extreme() {
    let set = ObservationSet::from_groups([("A", vec![1.0, 2.0, 3.0]), ("B", vec![10.0, 11.0, 12.0])]);
    let comparisons = run(&set, AnnotationConfig::default()).unwrap();

    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].tier, SignificanceTier::Extreme);
    assert_relative_eq!(comparisons[0].p_adjusted, comparisons[0].p_value);
}

/// Test that disabling correction keeps raw p-values.
#[test]
fn test_no_correction() {
    let config = AnnotationConfig {
        correction: Correction::None,
        ..AnnotationConfig::default()
    };
    let comparisons = run(&three_groups(), config).unwrap();

    for c in &comparisons {
        assert_eq!(c.p_adjusted, c.p_value);
    }
    assert_eq!(comparisons[1].tier, SignificanceTier::Strong);
}

/// Test the Welch variant end to end.
#[test]
fn test_welch_config() {
    let config = AnnotationConfig {
        test: TTest::Welch,
        ..AnnotationConfig::default()
    };
    let result = AnnotationExecutor::new(config).run(&three_groups()).unwrap();
    let ab = result.find("A", "B").unwrap();

    assert_eq!(result.test, TTest::Welch);
    assert_relative_eq!(ab.df, 7.30205, max_relative = 1e-5);
    assert_relative_eq!(ab.p_adjusted, 3.0 * 0.009_331_972_167_277_968, max_relative = 1e-6);
}

/// Test that running twice yields identical results.
#[test]
fn test_idempotent() {
    let executor = AnnotationExecutor::new(AnnotationConfig::default());
    let set = three_groups();

    assert_eq!(executor.run(&set).unwrap(), executor.run(&set).unwrap());
}

/// Test that a single group yields no comparisons.
#[test]
fn test_single_group() {
    let set = ObservationSet::from_groups([("A", vec![1.0, 2.0])]);
    let result = AnnotationExecutor::new(AnnotationConfig::default()).run(&set).unwrap();

    assert_eq!(result.pairs_tested, 0);
    assert!(result.comparisons.is_empty());
    assert_eq!(result.groups.len(), 1);
}

/// Test that a degenerate pair aborts the run.
#[test]
fn test_degenerate_pair_error() {
    assert_eq!(
        run(&degenerate_set(), AnnotationConfig::default()).unwrap_err(),
        DeliceError::DegenerateComparison {
            first: "B".to_string(),
            second: "C".to_string(),
        }
    );
}

// ============================================================================
// Policy Tests
// ============================================================================

/// Test that Discard drops `ns` rows but keeps the correction factor.
#[test]
fn test_discard_policy() {
    let config = AnnotationConfig {
        ns_policy: NsPolicy::Discard,
        ..AnnotationConfig::default()
    };
    let result = AnnotationExecutor::new(config).run(&three_groups()).unwrap();

    assert_eq!(result.pairs_tested, 3);
    assert_eq!(result.comparisons.len(), 2);
    assert!(result.comparisons.iter().all(Comparison::is_significant));
    assert_relative_eq!(
        result.comparisons[0].p_adjusted,
        0.024_218_091_658_040_79,
        max_relative = 1e-6
    );
}

/// Test that Keep is the default.
#[test]
fn test_keep_is_default() {
    let result = AnnotationExecutor::new(AnnotationConfig::default())
        .run(&three_groups())
        .unwrap();

    assert_eq!(result.ns_policy, NsPolicy::Keep);
    assert_eq!(result.comparisons.len(), 3);
    assert_eq!(result.significant().count(), 2);
}

/// Test that skipped pairs are recorded and still count toward the correction.
#[test]
fn test_skip_untestable() {
    let result = AnnotationExecutor::new(AnnotationConfig::default())
        .skip_untestable(true)
        .run(&degenerate_set())
        .unwrap();

    assert_eq!(result.pairs_tested, 3);
    assert_eq!(result.comparisons.len(), 2);
    assert_eq!(result.skipped.len(), 1);

    let skipped = &result.skipped[0];
    assert_eq!((skipped.first_label.as_str(), skipped.second_label.as_str()), ("B", "C"));
    assert_eq!(
        skipped.reason,
        DeliceError::DegenerateComparison {
            first: "B".to_string(),
            second: "C".to_string(),
        }
    );
    let raw = result.comparisons[0].p_value;
    assert_relative_eq!(result.comparisons[0].p_adjusted, (raw * 3.0).min(1.0), epsilon = 1e-12);
    assert!(result.to_string().contains("B x C: skipped"));
}

// ============================================================================
// Observer Tests
// ============================================================================

/// Test that groups are reported before pairs, in order.
#[test]
fn test_observer_order() {
    let recorder = Recorder::default();
    AnnotationExecutor::new(AnnotationConfig::default())
        .with_observer(Some(&recorder as &dyn ComparisonObserver<f64>))
        .run(&three_groups())
        .unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["group A", "group B", "group C", "pair A-C", "pair A-B", "pair B-C"]
    );
}

/// Test that discarded pairs are still reported.
#[test]
fn test_observer_sees_discarded_pairs() {
    let recorder = Recorder::default();
    let config = AnnotationConfig {
        ns_policy: NsPolicy::Discard,
        ..AnnotationConfig::default()
    };
    AnnotationExecutor::new(config)
        .with_observer(Some(&recorder as &dyn ComparisonObserver<f64>))
        .run(&three_groups())
        .unwrap();

    assert!(recorder.events.lock().unwrap().contains(&"pair A-C".to_string()));
}

/// Test the console report format.
#[test]
fn test_console_observer() {
    let buffer = SharedBuffer::default();
    let console = ConsoleObserver::with_writer(buffer.clone());
    AnnotationExecutor::new(AnnotationConfig::default())
        .with_observer(Some(&console as &dyn ComparisonObserver<f64>))
        .run(&three_groups())
        .unwrap();

    let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].trim_start().starts_with("A mean:"));
    assert!(lines[3].starts_with("A x C"));
    assert!(lines[3].contains("padj: 1.67"));
}

/// Test that skipped pairs reach the observers.
#[test]
fn test_observer_sees_skipped_pairs() {
    let recorder = Recorder::default();
    AnnotationExecutor::new(AnnotationConfig::default())
        .skip_untestable(true)
        .with_observer(Some(&recorder as &dyn ComparisonObserver<f64>))
        .run(&degenerate_set())
        .unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(events.last().map(String::as_str), Some("skip B-C"));

    let buffer = SharedBuffer::default();
    let console = ConsoleObserver::with_writer(buffer.clone());
    AnnotationExecutor::new(AnnotationConfig::default())
        .skip_untestable(true)
        .with_observer(Some(&console as &dyn ComparisonObserver<f64>))
        .run(&degenerate_set())
        .unwrap();

    let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("B x C"));
    assert!(last.contains("padj: NaN"));
}

/// Test that the console keeps reporting after a writer panicked.
#[test]
fn test_console_observer_after_panic() {
    let writer = FailsOnce::default();
    let console = ConsoleObserver::with_writer(writer.clone());
    let executor = AnnotationExecutor::new(AnnotationConfig::default())
        .with_observer(Some(&console as &dyn ComparisonObserver<f64>));

    let first = panic::catch_unwind(AssertUnwindSafe(|| executor.run(&three_groups())));
    assert!(first.is_err());

    executor.run(&three_groups()).unwrap();
    let text = String::from_utf8(writer.buffer.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text.lines().count(), 6);
}

// ============================================================================
// Result Tests
// ============================================================================

/// Test lookups on the result.
#[test]
fn test_result_queries() {
    let result = AnnotationExecutor::new(AnnotationConfig::default())
        .run(&three_groups())
        .unwrap();

    let ca = result.find("C", "A").unwrap();
    assert_eq!((ca.first_label.as_str(), ca.second_label.as_str()), ("A", "C"));
    assert!(result.find("A", "Z").is_none());
    assert_relative_eq!(result.group("C").unwrap().mean, 4.9, epsilon = 1e-12);
}

/// Test the text rendering of a result.
#[test]
fn test_result_display() {
    let result = AnnotationExecutor::new(AnnotationConfig::default())
        .run(&three_groups())
        .unwrap();
    let text = result.to_string();

    assert!(text.contains("Pairs tested: 3"));
    assert!(text.contains("Correction:   Bonferroni"));
    assert!(text.contains("Comparisons:"));
    assert!(text.contains("**"));
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that an empty set is rejected.
#[test]
fn test_validate_empty_set() {
    let set: ObservationSet<f64> = ObservationSet::from_groups(Vec::<(String, Vec<f64>)>::new());

    assert_eq!(Validator::validate_observations(&set), Err(DeliceError::EmptyInput));
}

/// Test that repeated labels are rejected.
#[test]
fn test_validate_duplicate_group() {
    let set = ObservationSet::from_groups([("A", vec![1.0, 2.0]), ("A", vec![3.0, 4.0])]);

    assert_eq!(
        Validator::validate_observations(&set),
        Err(DeliceError::DuplicateGroup("A".to_string()))
    );
}

/// Test that non-finite values are rejected with their position.
#[test]
fn test_validate_non_finite() {
    let set = ObservationSet::from_groups([("A", vec![1.0, f64::NAN])]);

    match Validator::validate_observations(&set) {
        Err(DeliceError::InvalidNumericValue(s)) => assert!(s.contains("A[1]")),
        other => panic!("Expected InvalidNumericValue, got {other:?}"),
    }
}

/// Test the group count check.
#[test]
fn test_validate_group_count() {
    let set = ObservationSet::from_groups([("A", vec![1.0, 2.0])]);

    assert_eq!(
        Validator::validate_group_count(&set, 2),
        Err(DeliceError::TooFewGroups { got: 1, min: 2 })
    );
}

/// Test parameter checks.
#[test]
fn test_validate_parameters() {
    assert!(Validator::validate_positive(0.5, "jitter").is_ok());
    assert_eq!(
        Validator::validate_positive(0.0, "body_width"),
        Err(DeliceError::InvalidParameter {
            parameter: "body_width",
            value: 0.0
        })
    );
    assert!(Validator::validate_non_negative(0.0, "jitter").is_ok());
    assert!(Validator::validate_non_negative(f64::NAN, "jitter").is_err());
    assert_eq!(
        Validator::validate_no_duplicates(Some("palette")),
        Err(DeliceError::DuplicateParameter { parameter: "palette" })
    );
}

//! Reporting hooks for group summaries and comparisons.
//!
//! ## Purpose
//!
//! The annotation run is pure; anything that wants to print or collect
//! intermediate numbers registers a [`ComparisonObserver`]. The observer sees
//! every group summary and every comparison, including `ns` rows that a
//! discarding policy later drops from the result.
//!
//! ## Design notes
//!
//! * **Optional**: No observer means no output beyond `tracing` events.
//! * **Shared**: Callbacks take `&self` so observers can sit behind an `Arc`
//!   inside cloneable builders.
//!
//! ## Non-goals
//!
//! * This module does not install a `tracing` subscriber.

// External dependencies
use core::fmt::{Debug, Formatter};
use num_traits::Float;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

// Internal dependencies
use crate::evaluation::summary::{Comparison, GroupSummary, SkippedPair};

// ============================================================================
// Observer Trait
// ============================================================================

/// Receives intermediate results of an annotation run.
pub trait ComparisonObserver<T>: Send + Sync + Debug {
    /// Called once per group, in group order, before any comparison.
    fn on_group(&self, _summary: &GroupSummary<T>) {}

    /// Called once per tested pair, in enumeration order.
    fn on_comparison(&self, _comparison: &Comparison) {}

    /// Called for a pair a plot run could not test.
    fn on_skipped(&self, _skipped: &SkippedPair) {}
}

// ============================================================================
// Console Observer
// ============================================================================

/// Writes human-readable report lines, one per group and one per pair.
///
/// ```text
///          A mean:                                             2
/// A x C                                padj: 1.6718765  p-val: 0.5572921
/// ```
pub struct ConsoleObserver {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleObserver {
    /// Report to standard output.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Report to an arbitrary writer.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    fn emit(&self, line: &str) {
        // A panic in another writer leaves the sink usable.
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(sink, "{line}") {
            tracing::warn!(error = %err, "failed to write comparison report");
        }
    }
}

impl Debug for ConsoleObserver {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConsoleObserver").finish_non_exhaustive()
    }
}

impl<T: Float + Send + Sync> ComparisonObserver<T> for ConsoleObserver {
    fn on_group(&self, summary: &GroupSummary<T>) {
        let mean = summary.mean.to_f64().unwrap_or(f64::NAN);
        self.emit(&format!("{:>10} mean: {:>45}", summary.label, mean));
    }

    fn on_comparison(&self, c: &Comparison) {
        self.emit(&format!(
            "{} x {:<30}   padj: {:<2}  p-val: {:<10}",
            c.first_label, c.second_label, c.p_adjusted, c.p_value
        ));
    }

    fn on_skipped(&self, s: &SkippedPair) {
        self.emit(&format!(
            "{} x {:<30}   padj: NaN  p-val: NaN",
            s.first_label, s.second_label
        ));
    }
}

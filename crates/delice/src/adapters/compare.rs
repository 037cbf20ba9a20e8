//! Annotation-only adapter and shared plot plumbing.
//!
//! ## Purpose
//!
//! This module provides the `Compare` adapter, which runs the pairwise
//! comparison procedure without drawing anything, and the pieces every plot
//! adapter shares: building the observation set, the plot output type,
//! scatter overlays and bracket placement.
//!
//! ## Design notes
//!
//! * **Delegation**: Statistics are delegated to the execution engine.
//! * **Reusable**: A built processor can be run any number of times; each
//!   run derives everything from its inputs.
//!
//! ## Invariants
//!
//! * The data frame is never modified.
//!
//! ## Non-goals
//!
//! * This adapter does not produce a figure (use a plot adapter).

// External dependencies
use num_traits::Float;
use rand::Rng;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::correction::Correction;
use crate::algorithms::ttest::TTest;
use crate::engine::executor::{AnnotationConfig, AnnotationExecutor, NsPolicy};
use crate::engine::layout::{Bracket, BracketLayout};
use crate::engine::output::AnnotationResult;
use crate::engine::validator::Validator;
use crate::evaluation::observer::ComparisonObserver;
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::DataFrame;
use crate::primitives::groups::{GroupOrder, ObservationSet};
use crate::render::figure::{Axes, Element, Figure, Tick};
use crate::render::jitter::Jitter;
use crate::render::palette::Color;
use crate::render::style::PlotStyle;

// ============================================================================
// Compare Builder
// ============================================================================

/// Builder for the annotation-only processor.
#[derive(Debug, Clone)]
pub struct ComparatorBuilder<T> {
    /// Statistical test and correction settings.
    pub annotation: AnnotationConfig,

    /// Order of the groups along the x axis.
    pub group_order: GroupOrder,

    /// Optional reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for ComparatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ComparatorBuilder<T> {
    /// Create a builder with default parameters.
    fn new() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            group_order: GroupOrder::default(),
            observer: None,
            duplicate_param: None,
        }
    }

    /// Set the t-test variant.
    pub fn test(mut self, test: TTest) -> Self {
        self.annotation.test = test;
        self
    }

    /// Set the p-value correction.
    pub fn correction(mut self, correction: Correction) -> Self {
        self.annotation.correction = correction;
        self
    }

    /// Set the retention policy for `ns` rows.
    pub fn ns_policy(mut self, policy: NsPolicy) -> Self {
        self.annotation.ns_policy = policy;
        self
    }

    /// Set the group order.
    pub fn group_order(mut self, order: GroupOrder) -> Self {
        self.group_order = order;
        self
    }

    /// Attach a reporting observer.
    pub fn observer(mut self, observer: Arc<dyn ComparisonObserver<T>>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the processor.
    pub fn build(self) -> Result<Comparator<T>, DeliceError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Ok(Comparator { config: self })
    }
}

// ============================================================================
// Compare Processor
// ============================================================================

/// Annotation-only processor.
#[derive(Debug, Clone)]
pub struct Comparator<T> {
    config: ComparatorBuilder<T>,
}

impl<T: Float> Comparator<T> {
    /// Compare every pair of groups of `value_column` split by `group_column`.
    pub fn run(
        &self,
        frame: &DataFrame<T>,
        group_column: &str,
        value_column: &str,
    ) -> Result<AnnotationResult<T>, DeliceError> {
        let set = ObservationSet::from_frame(frame, group_column, value_column, &self.config.group_order)?;
        self.run_set(&set)
    }

    /// Compare every pair of groups of a prepared observation set.
    pub fn run_set(&self, set: &ObservationSet<T>) -> Result<AnnotationResult<T>, DeliceError> {
        Validator::validate_group_count(set, 2)?;
        AnnotationExecutor::new(self.config.annotation)
            .with_observer(self.config.observer.as_deref())
            .run(set)
    }
}

// ============================================================================
// Plot Output
// ============================================================================

/// A finished plot: the figure, its annotation, and the drawn brackets.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput<T> {
    /// Scene model of the plot.
    pub figure: Figure,

    /// Summaries and comparisons behind the brackets.
    pub annotation: AnnotationResult<T>,

    /// Brackets drawn on the figure; empty when brackets are disabled.
    pub brackets: Vec<Bracket>,
}

impl<T: Float> PlotOutput<T> {
    /// Serialize the figure to SVG.
    pub fn to_svg(&self) -> Result<String, DeliceError> {
        self.figure.to_svg()
    }
}

// ============================================================================
// Shared Plot Plumbing
// ============================================================================

/// Run the engine for a plot; untestable pairs are skipped, not fatal.
pub(crate) fn annotate<T: Float>(
    set: &ObservationSet<T>,
    config: AnnotationConfig,
    observer: Option<&dyn ComparisonObserver<T>>,
) -> Result<AnnotationResult<T>, DeliceError> {
    AnnotationExecutor::new(config)
        .with_observer(observer)
        .skip_untestable(true)
        .run(set)
}

/// Axes with one x tick per group at positions `1..=n`.
pub(crate) fn group_axes<T: Float>(style: &PlotStyle, set: &ObservationSet<T>) -> Axes {
    let mut axes = Axes::new(style, &set.group_column, &set.value_column);
    axes.x_ticks = set
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| Tick::new((i + 1) as f64, g.label.clone()))
        .collect();
    axes
}

/// Jittered markers for `values` around `center`.
pub(crate) fn scatter<T: Float, R: Rng>(
    values: &[T],
    center: f64,
    color: Color,
    style: &PlotStyle,
    rng: &mut R,
) -> Element {
    let jitter = Jitter::new(style.jitter);
    let xs = jitter.spread(center, values.len(), rng);
    Element::Scatter {
        points: xs
            .into_iter()
            .zip(values.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)))
            .collect(),
        fill: color,
        edge: Color::BLACK,
        size: style.point_size,
    }
}

/// Autoscale, then stack brackets over group positions `1..=n` if enabled.
pub(crate) fn finish_group_plot<T: Float>(
    mut axes: Axes,
    style: &PlotStyle,
    layout: &BracketLayout,
    annotation: AnnotationResult<T>,
) -> PlotOutput<T> {
    axes.autoscale();
    let brackets = if style.significance_bars {
        let brackets = layout.place(&annotation.comparisons, |i| (i + 1) as f64, axes.y_limits);
        axes.add_brackets(&brackets, 2.0, None);
        brackets
    } else {
        Vec::new()
    };

    PlotOutput {
        figure: Figure::new(style.figure_size, axes),
        annotation,
        brackets,
    }
}

/// Convert a value to `f64` for geometry.
#[inline]
pub(crate) fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

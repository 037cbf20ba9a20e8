//! Box plot adapter.
//!
//! ## Purpose
//!
//! This module draws a quartile box per group with whiskers, a black mean
//! line, a jittered scatter, and optionally the significance brackets.
//!
//! ## Key concepts
//!
//! * **Box**: From the first to the third quartile (linear interpolation),
//!   with the median drawn across it.
//! * **Whiskers**: To the most extreme observation within `whisker` times the
//!   interquartile range of the box. No caps and no fliers are drawn.
//!
//! ## Invariants
//!
//! * Group `i` (0-based) is centered at `x = i + 1`.

// External dependencies
use num_traits::Float;
use rand::Rng;
use std::sync::Arc;

// Internal dependencies
use crate::adapters::compare::{annotate, finish_group_plot, group_axes, scatter, to_f64, PlotOutput};
use crate::algorithms::correction::Correction;
use crate::algorithms::ttest::TTest;
use crate::engine::executor::{AnnotationConfig, NsPolicy};
use crate::engine::layout::BracketLayout;
use crate::engine::validator::Validator;
use crate::evaluation::observer::ComparisonObserver;
use crate::evaluation::summary::GroupSummary;
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::DataFrame;
use crate::primitives::groups::{GroupOrder, ObservationSet};
use crate::render::figure::Element;
use crate::render::jitter::plot_rng;
use crate::render::palette::Color;
use crate::render::style::PlotStyle;

/// Median line color.
const MEDIAN_COLOR: Color = Color::rgb(0xff, 0x7f, 0x0e);

/// Half length of the mean line.
const MEAN_HALF_WIDTH: f64 = 0.2;

// ============================================================================
// Box Builder
// ============================================================================

/// Builder for box plots.
#[derive(Debug, Clone)]
pub struct BoxPlotBuilder<T> {
    /// Statistical test and correction settings.
    pub annotation: AnnotationConfig,

    /// Order of the groups along the x axis.
    pub group_order: GroupOrder,

    /// Cosmetic configuration.
    pub style: PlotStyle,

    /// Bracket stacking parameters.
    pub layout: BracketLayout,

    /// Whisker reach as a multiple of the interquartile range.
    pub whisker: f64,

    /// Optional reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BoxPlotBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BoxPlotBuilder<T> {
    /// Create a builder with box plot defaults.
    fn new() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            group_order: GroupOrder::default(),
            style: PlotStyle::boxplot(),
            layout: BracketLayout::default(),
            whisker: 1.5,
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

    /// Replace the whole style.
    pub fn style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the bracket stacking parameters.
    pub fn layout(mut self, layout: BracketLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the whisker reach.
    pub fn whisker(mut self, whisker: f64) -> Self {
        self.whisker = whisker;
        self
    }

    /// Attach a reporting observer.
    pub fn observer(mut self, observer: Arc<dyn ComparisonObserver<T>>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the box plotter.
    pub fn build(self) -> Result<BoxPlotter<T>, DeliceError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        self.style.validate()?;
        self.layout.validate()?;
        Validator::validate_non_negative(self.whisker, "whisker")?;

        Ok(BoxPlotter { config: self })
    }
}

// ============================================================================
// Box Plotter
// ============================================================================

/// Box plotter.
#[derive(Debug, Clone)]
pub struct BoxPlotter<T> {
    config: BoxPlotBuilder<T>,
}

impl<T: Float> BoxPlotter<T> {
    /// Plot `value_column` split by `group_column`.
    pub fn plot(
        &self,
        frame: &DataFrame<T>,
        group_column: &str,
        value_column: &str,
    ) -> Result<PlotOutput<T>, DeliceError> {
        let mut rng = plot_rng(self.config.style.seed);
        self.plot_with_rng(frame, group_column, value_column, &mut rng)
    }

    /// Plot with an explicit jitter generator.
    pub fn plot_with_rng<R: Rng>(
        &self,
        frame: &DataFrame<T>,
        group_column: &str,
        value_column: &str,
        rng: &mut R,
    ) -> Result<PlotOutput<T>, DeliceError> {
        let cfg = &self.config;
        let set = ObservationSet::from_frame(frame, group_column, value_column, &cfg.group_order)?;
        let annotation = annotate(&set, cfg.annotation, cfg.observer.as_deref())?;

        let colors = cfg.style.colors_for(set.len())?;
        let edge = cfg.style.edge()?;
        let mut axes = group_axes(&cfg.style, &set);

        for (i, (group, summary)) in set.groups.iter().zip(&annotation.groups).enumerate() {
            let x = (i + 1) as f64;
            axes.elements
                .extend(box_elements(summary, &group.values, x, cfg.style.body_width, cfg.whisker, edge));
            axes.push(Element::hline(
                to_f64(summary.mean),
                x - MEAN_HALF_WIDTH,
                x + MEAN_HALF_WIDTH,
                Color::BLACK,
                2.0,
            ));
            if cfg.style.scatter {
                axes.push(scatter(&group.values, x, colors[i], &cfg.style, rng));
            }
        }

        Ok(finish_group_plot(axes, &cfg.style, &cfg.layout, annotation))
    }
}

/// Whisker ends: the most extreme values within `whisker * IQR` of the box.
pub fn whisker_bounds<T: Float>(summary: &GroupSummary<T>, values: &[T], whisker: f64) -> (f64, f64) {
    let q1 = to_f64(summary.q1);
    let q3 = to_f64(summary.q3);
    let reach = (q3 - q1) * whisker;
    let inside = values
        .iter()
        .map(|&v| to_f64(v))
        .filter(|&v| v >= q1 - reach && v <= q3 + reach);
    let (lo, hi) = inside.fold((q1, q3), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo, hi)
}

/// Box outline, median and whiskers of one group centered at `x`.
pub(crate) fn box_elements<T: Float>(
    summary: &GroupSummary<T>,
    values: &[T],
    x: f64,
    width: f64,
    whisker: f64,
    edge: Color,
) -> Vec<Element> {
    let half = width / 2.0;
    let q1 = to_f64(summary.q1);
    let q3 = to_f64(summary.q3);
    let (low, high) = whisker_bounds(summary, values, whisker);

    vec![
        Element::Polyline {
            points: vec![
                (x - half, q1),
                (x + half, q1),
                (x + half, q3),
                (x - half, q3),
                (x - half, q1),
            ],
            stroke: edge,
            width: 1.0,
        },
        Element::hline(to_f64(summary.median), x - half, x + half, MEDIAN_COLOR, 1.0),
        Element::vline(x, q1, low, edge, 1.0),
        Element::vline(x, q3, high, edge, 1.0),
    ]
}

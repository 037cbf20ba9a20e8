//! Bar plot adapter.
//!
//! ## Purpose
//!
//! This module draws one bar per group at the group mean with a
//! population standard deviation error bar, an optional jittered scatter,
//! and the significance brackets.
//!
//! ## Invariants
//!
//! * Group `i` (0-based) is centered at `x = i + 1`.
//! * Bars start at zero; negative means produce downward bars.

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
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::DataFrame;
use crate::primitives::groups::{GroupOrder, ObservationSet};
use crate::render::figure::Element;
use crate::render::jitter::plot_rng;
use crate::render::style::PlotStyle;

/// Error bar cap length as a fraction of the bar width.
const CAP_FRACTION: f64 = 0.2;

// ============================================================================
// Bar Builder
// ============================================================================

/// Builder for bar plots.
#[derive(Debug, Clone)]
pub struct BarBuilder<T> {
    /// Statistical test and correction settings.
    pub annotation: AnnotationConfig,

    /// Order of the groups along the x axis.
    pub group_order: GroupOrder,

    /// Cosmetic configuration.
    pub style: PlotStyle,

    /// Bracket stacking parameters.
    pub layout: BracketLayout,

    /// Optional reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BarBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BarBuilder<T> {
    /// Create a builder with bar plot defaults.
    fn new() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            group_order: GroupOrder::default(),
            style: PlotStyle::bar(),
            layout: BracketLayout::default(),
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

    /// Attach a reporting observer.
    pub fn observer(mut self, observer: Arc<dyn ComparisonObserver<T>>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Build the bar plotter.
    pub fn build(self) -> Result<BarPlotter<T>, DeliceError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        self.style.validate()?;
        self.layout.validate()?;

        Ok(BarPlotter { config: self })
    }
}

// ============================================================================
// Bar Plotter
// ============================================================================

/// Bar plotter.
#[derive(Debug, Clone)]
pub struct BarPlotter<T> {
    config: BarBuilder<T>,
}

impl<T: Float> BarPlotter<T> {
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
        let style = &cfg.style;
        let set = ObservationSet::from_frame(frame, group_column, value_column, &cfg.group_order)?;
        let annotation = annotate(&set, cfg.annotation, cfg.observer.as_deref())?;

        let colors = style.colors_for(set.len())?;
        let edge = style.edge()?;
        let mut axes = group_axes(style, &set);
        let half = style.body_width / 2.0;
        let cap = style.body_width * CAP_FRACTION / 2.0;

        for (i, (group, summary)) in set.groups.iter().zip(&annotation.groups).enumerate() {
            let x = (i + 1) as f64;
            let mean = to_f64(summary.mean);
            let std = to_f64(summary.std);

            axes.push(Element::Rect {
                x: x - half,
                y: 0.0,
                width: style.body_width,
                height: mean,
                fill: colors[i],
                stroke: edge,
                stroke_width: style.bar_edge_width,
            });
            axes.push(Element::vline(x, mean - std, mean + std, edge, style.errorbar_width));
            axes.push(Element::hline(mean - std, x - cap, x + cap, edge, style.errorbar_width));
            axes.push(Element::hline(mean + std, x - cap, x + cap, edge, style.errorbar_width));

            if style.scatter {
                axes.push(scatter(&group.values, x, colors[i], style, rng));
            }
        }

        Ok(finish_group_plot(axes, style, &cfg.layout, annotation))
    }
}

//! Violin plot adapter.
//!
//! ## Purpose
//!
//! This module draws one kernel density body per group, a red mean line,
//! a jittered scatter of the observations, and the significance brackets.
//!
//! ## Design notes
//!
//! * **Bodies**: Densities are evaluated on an even grid between the group's
//!   minimum and maximum and scaled so the widest point spans `body_width`.
//! * **Degenerate groups**: A group with fewer than two values or zero spread
//!   has no density; only its mean line and points are drawn.
//!
//! ## Invariants
//!
//! * Group `i` (0-based) is centered at `x = i + 1`.
//! * The mean line spans `x - 0.2` to `x + 0.2`.

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
use crate::math::density::{normalize_width, BandwidthRule, DensityEstimate, DensityKernel, DEFAULT_POINTS};
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::DataFrame;
use crate::primitives::groups::{GroupOrder, ObservationSet};
use crate::render::figure::Element;
use crate::render::jitter::plot_rng;
use crate::render::palette::Color;
use crate::render::style::PlotStyle;

/// Half length of the mean line.
const MEAN_HALF_WIDTH: f64 = 0.2;

/// Outline width of violin bodies in points.
const BODY_LINE_WIDTH: f64 = 2.0;

// ============================================================================
// Violin Builder
// ============================================================================

/// Builder for violin plots.
#[derive(Debug, Clone)]
pub struct ViolinBuilder<T> {
    /// Statistical test and correction settings.
    pub annotation: AnnotationConfig,

    /// Order of the groups along the x axis.
    pub group_order: GroupOrder,

    /// Cosmetic configuration.
    pub style: PlotStyle,

    /// Bracket stacking parameters.
    pub layout: BracketLayout,

    /// Density kernel of the bodies.
    pub kernel: DensityKernel,

    /// Bandwidth rule of the bodies.
    pub bandwidth: BandwidthRule,

    /// Density evaluation points per body.
    pub points: usize,

    /// Optional reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for ViolinBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ViolinBuilder<T> {
    /// Create a builder with violin defaults.
    fn new() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            group_order: GroupOrder::default(),
            style: PlotStyle::violin(),
            layout: BracketLayout::default(),
            kernel: DensityKernel::Gaussian,
            bandwidth: BandwidthRule::Scott,
            points: DEFAULT_POINTS,
            observer: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

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

    // ========================================================================
    // Violin-Specific Setters
    // ========================================================================

    /// Set the density kernel.
    pub fn kernel(mut self, kernel: DensityKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the bandwidth rule.
    pub fn bandwidth(mut self, rule: BandwidthRule) -> Self {
        self.bandwidth = rule;
        self
    }

    /// Set the number of density evaluation points.
    pub fn points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the violin plotter.
    pub fn build(self) -> Result<ViolinPlotter<T>, DeliceError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        self.style.validate()?;
        self.layout.validate()?;
        if self.points < 2 {
            return Err(DeliceError::InvalidParameter {
                parameter: "points",
                value: self.points as f64,
            });
        }
        if let BandwidthRule::Factor(f) = self.bandwidth {
            Validator::validate_positive(f, "bandwidth")?;
        }

        Ok(ViolinPlotter { config: self })
    }
}

// ============================================================================
// Violin Plotter
// ============================================================================

/// Violin plotter.
#[derive(Debug, Clone)]
pub struct ViolinPlotter<T> {
    config: ViolinBuilder<T>,
}

impl<T: Float> ViolinPlotter<T> {
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
        let half = cfg.style.body_width / 2.0;

        for (i, (group, summary)) in set.groups.iter().zip(&annotation.groups).enumerate() {
            let x = (i + 1) as f64;
            if let Some(body) = violin_body(&group.values, x, half, cfg.kernel, cfg.bandwidth, cfg.points, edge) {
                axes.push(body);
            }
            axes.push(Element::hline(
                to_f64(summary.mean),
                x - MEAN_HALF_WIDTH,
                x + MEAN_HALF_WIDTH,
                Color::RED,
                2.0,
            ));
            if cfg.style.scatter {
                axes.push(scatter(&group.values, x, colors[i], &cfg.style, rng));
            }
        }

        Ok(finish_group_plot(axes, &cfg.style, &cfg.layout, annotation))
    }
}

/// Closed outline of a density body centered at `x`, widest at `half_width`.
pub(crate) fn violin_body<T: Float>(
    values: &[T],
    x: f64,
    half_width: f64,
    kernel: DensityKernel,
    bandwidth: BandwidthRule,
    points: usize,
    edge: Color,
) -> Option<Element> {
    let kde = DensityEstimate::fit(values, kernel, bandwidth)?;
    let (coords, densities) = kde.evaluate_grid(points);
    let widths = normalize_width(&densities, half_width);

    let left = coords.iter().zip(&widths).map(|(&y, &w)| (x - w, y));
    let right = coords.iter().zip(&widths).rev().map(|(&y, &w)| (x + w, y));
    Some(Element::Polygon {
        points: left.chain(right).collect(),
        fill: Color::WHITE,
        stroke: edge,
        width: BODY_LINE_WIDTH,
    })
}

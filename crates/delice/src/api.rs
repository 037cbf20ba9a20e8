//! High-level API for significance-annotated plots.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder pattern for configuring the statistical procedure and the
//! plot style, then choosing an execution adapter (Compare, Violin, BoxPlot,
//! Bar, or Multi).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Every parameter is optional; unset parameters take the
//!   chosen plot kind's defaults.
//! * **Polymorphic**: Marker types transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the
//!   adapter builder, including parameters set more than once.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DeliceBuilder`] via `Delice::new()`.
//! 2. Chain configuration methods (`.test()`, `.palette()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Violin)` to get an execution builder.
//! 4. Call `.build()?` and then `.run(...)` or `.plot(...)`.

// External dependencies
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::adapters::bar::BarBuilder;
use crate::adapters::boxplot::BoxPlotBuilder;
use crate::adapters::compare::ComparatorBuilder;
use crate::adapters::multi::MultiBuilder;
use crate::adapters::violin::ViolinBuilder;

// Publicly re-exported types
pub use crate::adapters::bar::BarPlotter;
pub use crate::adapters::boxplot::BoxPlotter;
pub use crate::adapters::compare::{Comparator, PlotOutput};
pub use crate::adapters::multi::{BodyKind, FacetAnnotation, MultiOutput, MultiPlotter};
pub use crate::adapters::violin::ViolinPlotter;
pub use crate::algorithms::correction::Correction;
pub use crate::algorithms::tier::SignificanceTier;
pub use crate::algorithms::ttest::TTest;
pub use crate::engine::executor::NsPolicy;
pub use crate::engine::layout::{Bracket, BracketLayout};
pub use crate::engine::output::AnnotationResult;
pub use crate::evaluation::observer::{ComparisonObserver, ConsoleObserver};
pub use crate::evaluation::summary::{Comparison, GroupSummary};
pub use crate::math::density::{BandwidthRule, DensityKernel};
pub use crate::primitives::errors::DeliceError;
pub use crate::primitives::frame::{Column, DataFrame};
pub use crate::primitives::groups::{GroupOrder, ObservationSet};
pub use crate::render::figure::Figure;
pub use crate::render::palette::{Color, Palette};
pub use crate::render::style::{FontWeight, PlotStyle, TitleLoc};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Bar, BoxPlot, Compare, Multi, Violin};
}

/// Fluent builder for configuring the annotation procedure and plot style.
#[derive(Debug, Clone)]
pub struct DeliceBuilder<T> {
    /// t-test variant.
    pub test: Option<TTest>,

    /// p-value correction.
    pub correction: Option<Correction>,

    /// Retention of non-significant rows.
    pub ns_policy: Option<NsPolicy>,

    /// Group ordering strategy.
    pub group_order: Option<GroupOrder>,

    /// Named sequential palette.
    pub palette: Option<String>,

    /// Explicit per-group colors.
    pub colors: Option<Vec<String>>,

    /// Outline color of bodies and markers.
    pub edge_color: Option<String>,

    /// Marker size in points.
    pub point_size: Option<f64>,

    /// Horizontal jitter magnitude in data units.
    pub jitter: Option<f64>,

    /// Width of violin, box, or bar bodies in data units.
    pub body_width: Option<f64>,

    /// Figure title.
    pub title: Option<String>,

    /// Title alignment.
    pub title_loc: Option<TitleLoc>,

    /// Title font size in points.
    pub title_size: Option<f64>,

    /// x-axis label.
    pub x_label: Option<String>,

    /// y-axis label.
    pub y_label: Option<String>,

    /// Label font size in points.
    pub font_size: Option<f64>,

    /// Label font weight.
    pub font_weight: Option<FontWeight>,

    /// Rotation of the x tick labels in degrees.
    pub label_rotation: Option<f64>,

    /// Figure size in inches.
    pub figure_size: Option<(f64, f64)>,

    /// Draw the jittered observations.
    pub scatter: Option<bool>,

    /// Draw the significance brackets.
    pub significance_bars: Option<bool>,

    /// Hide the top and right spines.
    pub hide_spines: Option<bool>,

    /// Bar outline width in points (Bar only).
    pub bar_edge_width: Option<f64>,

    /// Error bar width in points (Bar only).
    pub errorbar_width: Option<f64>,

    /// Jitter seed for reproducible figures.
    pub seed: Option<u64>,

    /// Bracket stacking parameters.
    pub layout: Option<BracketLayout>,

    /// Density kernel (Violin only).
    pub kernel: Option<DensityKernel>,

    /// Bandwidth rule (Violin only).
    pub bandwidth: Option<BandwidthRule>,

    /// Density evaluation points (Violin only).
    pub points: Option<usize>,

    /// Whisker reach (BoxPlot only).
    pub whisker: Option<f64>,

    /// Body kind (Multi only).
    pub body: Option<BodyKind>,

    /// Distance between facet values (Multi only).
    pub spacing: Option<f64>,

    /// Half the distance between neighboring groups (Multi only).
    pub offset_factor: Option<f64>,

    /// Reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for DeliceBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DeliceBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: DeliceAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            test: None,
            correction: None,
            ns_policy: None,
            group_order: None,
            palette: None,
            colors: None,
            edge_color: None,
            point_size: None,
            jitter: None,
            body_width: None,
            title: None,
            title_loc: None,
            title_size: None,
            x_label: None,
            y_label: None,
            font_size: None,
            font_weight: None,
            label_rotation: None,
            figure_size: None,
            scatter: None,
            significance_bars: None,
            hide_spines: None,
            bar_edge_width: None,
            errorbar_width: None,
            seed: None,
            layout: None,
            kernel: None,
            bandwidth: None,
            points: None,
            whisker: None,
            body: None,
            spacing: None,
            offset_factor: None,
            observer: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Set the t-test variant.
    pub fn test(mut self, test: TTest) -> Self {
        if self.test.is_some() {
            self.duplicate_param = Some("test");
        }
        self.test = Some(test);
        self
    }

    /// Set the p-value correction.
    pub fn correction(mut self, correction: Correction) -> Self {
        if self.correction.is_some() {
            self.duplicate_param = Some("correction");
        }
        self.correction = Some(correction);
        self
    }

    /// Set the retention policy for non-significant rows.
    pub fn ns_policy(mut self, policy: NsPolicy) -> Self {
        if self.ns_policy.is_some() {
            self.duplicate_param = Some("ns_policy");
        }
        self.ns_policy = Some(policy);
        self
    }

    /// Set the group ordering strategy.
    pub fn group_order(mut self, order: GroupOrder) -> Self {
        if self.group_order.is_some() {
            self.duplicate_param = Some("group_order");
        }
        self.group_order = Some(order);
        self
    }

    /// Attach a reporting observer.
    pub fn observer(mut self, observer: Arc<dyn ComparisonObserver<T>>) -> Self {
        if self.observer.is_some() {
            self.duplicate_param = Some("observer");
        }
        self.observer = Some(observer);
        self
    }

    // ========================================================================
    // Colors and Markers
    // ========================================================================

    /// Set the named palette (e.g. `"PuRd"`).
    pub fn palette(mut self, name: impl Into<String>) -> Self {
        if self.palette.is_some() {
            self.duplicate_param = Some("palette");
        }
        self.palette = Some(name.into());
        self
    }

    /// Set explicit per-group colors, overriding the palette.
    pub fn colors<S: Into<String>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        if self.colors.is_some() {
            self.duplicate_param = Some("colors");
        }
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Set the edge color.
    pub fn edge_color(mut self, color: impl Into<String>) -> Self {
        if self.edge_color.is_some() {
            self.duplicate_param = Some("edge_color");
        }
        self.edge_color = Some(color.into());
        self
    }

    /// Set the marker size in points.
    pub fn point_size(mut self, size: f64) -> Self {
        if self.point_size.is_some() {
            self.duplicate_param = Some("point_size");
        }
        self.point_size = Some(size);
        self
    }

    /// Set the horizontal jitter magnitude.
    pub fn jitter(mut self, magnitude: f64) -> Self {
        if self.jitter.is_some() {
            self.duplicate_param = Some("jitter");
        }
        self.jitter = Some(magnitude);
        self
    }

    /// Set the jitter seed.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Show or hide the jittered observations.
    pub fn scatter(mut self, show: bool) -> Self {
        if self.scatter.is_some() {
            self.duplicate_param = Some("scatter");
        }
        self.scatter = Some(show);
        self
    }

    // ========================================================================
    // Layout and Text
    // ========================================================================

    /// Set the body width.
    pub fn body_width(mut self, width: f64) -> Self {
        if self.body_width.is_some() {
            self.duplicate_param = Some("body_width");
        }
        self.body_width = Some(width);
        self
    }

    /// Set the figure title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        if self.title.is_some() {
            self.duplicate_param = Some("title");
        }
        self.title = Some(title.into());
        self
    }

    /// Set the title alignment.
    pub fn title_loc(mut self, loc: TitleLoc) -> Self {
        if self.title_loc.is_some() {
            self.duplicate_param = Some("title_loc");
        }
        self.title_loc = Some(loc);
        self
    }

    /// Set the title font size.
    pub fn title_size(mut self, size: f64) -> Self {
        if self.title_size.is_some() {
            self.duplicate_param = Some("title_size");
        }
        self.title_size = Some(size);
        self
    }

    /// Set the x-axis label.
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        if self.x_label.is_some() {
            self.duplicate_param = Some("x_label");
        }
        self.x_label = Some(label.into());
        self
    }

    /// Set the y-axis label.
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        if self.y_label.is_some() {
            self.duplicate_param = Some("y_label");
        }
        self.y_label = Some(label.into());
        self
    }

    /// Set the label font size.
    pub fn font_size(mut self, size: f64) -> Self {
        if self.font_size.is_some() {
            self.duplicate_param = Some("font_size");
        }
        self.font_size = Some(size);
        self
    }

    /// Set the label font weight.
    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        if self.font_weight.is_some() {
            self.duplicate_param = Some("font_weight");
        }
        self.font_weight = Some(weight);
        self
    }

    /// Set the x tick label rotation in degrees.
    pub fn label_rotation(mut self, degrees: f64) -> Self {
        if self.label_rotation.is_some() {
            self.duplicate_param = Some("label_rotation");
        }
        self.label_rotation = Some(degrees);
        self
    }

    /// Set the figure size in inches.
    pub fn figure_size(mut self, width: f64, height: f64) -> Self {
        if self.figure_size.is_some() {
            self.duplicate_param = Some("figure_size");
        }
        self.figure_size = Some((width, height));
        self
    }

    /// Show or hide the significance brackets.
    pub fn significance_bars(mut self, show: bool) -> Self {
        if self.significance_bars.is_some() {
            self.duplicate_param = Some("significance_bars");
        }
        self.significance_bars = Some(show);
        self
    }

    /// Hide or keep the top and right spines.
    pub fn hide_spines(mut self, hide: bool) -> Self {
        if self.hide_spines.is_some() {
            self.duplicate_param = Some("hide_spines");
        }
        self.hide_spines = Some(hide);
        self
    }

    /// Set the bracket stacking parameters.
    pub fn layout(mut self, layout: BracketLayout) -> Self {
        if self.layout.is_some() {
            self.duplicate_param = Some("layout");
        }
        self.layout = Some(layout);
        self
    }

    // ========================================================================
    // Adapter-Specific
    // ========================================================================

    /// Set the bar outline width (Bar only).
    pub fn bar_edge_width(mut self, width: f64) -> Self {
        if self.bar_edge_width.is_some() {
            self.duplicate_param = Some("bar_edge_width");
        }
        self.bar_edge_width = Some(width);
        self
    }

    /// Set the error bar width (Bar only).
    pub fn errorbar_width(mut self, width: f64) -> Self {
        if self.errorbar_width.is_some() {
            self.duplicate_param = Some("errorbar_width");
        }
        self.errorbar_width = Some(width);
        self
    }

    /// Set the density kernel (Violin only).
    pub fn kernel(mut self, kernel: DensityKernel) -> Self {
        if self.kernel.is_some() {
            self.duplicate_param = Some("kernel");
        }
        self.kernel = Some(kernel);
        self
    }

    /// Set the bandwidth rule (Violin only).
    pub fn bandwidth(mut self, rule: BandwidthRule) -> Self {
        if self.bandwidth.is_some() {
            self.duplicate_param = Some("bandwidth");
        }
        self.bandwidth = Some(rule);
        self
    }

    /// Set the density evaluation points (Violin only).
    pub fn points(mut self, points: usize) -> Self {
        if self.points.is_some() {
            self.duplicate_param = Some("points");
        }
        self.points = Some(points);
        self
    }

    /// Set the whisker reach (BoxPlot only).
    pub fn whisker(mut self, whisker: f64) -> Self {
        if self.whisker.is_some() {
            self.duplicate_param = Some("whisker");
        }
        self.whisker = Some(whisker);
        self
    }

    /// Set the body kind (Multi only).
    pub fn body(mut self, body: BodyKind) -> Self {
        if self.body.is_some() {
            self.duplicate_param = Some("body");
        }
        self.body = Some(body);
        self
    }

    /// Set the distance between facet values (Multi only).
    pub fn spacing(mut self, spacing: f64) -> Self {
        if self.spacing.is_some() {
            self.duplicate_param = Some("spacing");
        }
        self.spacing = Some(spacing);
        self
    }

    /// Set the half distance between neighboring groups (Multi only).
    pub fn offset_factor(mut self, offset_factor: f64) -> Self {
        if self.offset_factor.is_some() {
            self.duplicate_param = Some("offset_factor");
        }
        self.offset_factor = Some(offset_factor);
        self
    }

    // ========================================================================
    // Conversion Helpers
    // ========================================================================

    /// Overlay the set style parameters on a plot kind's default style.
    fn apply_style(&mut self, style: &mut PlotStyle) {
        if let Some(palette) = self.palette.take() {
            style.palette = palette;
        }
        if let Some(colors) = self.colors.take() {
            style.colors = Some(colors);
        }
        if let Some(edge) = self.edge_color.take() {
            style.edge_color = edge;
        }
        if let Some(size) = self.point_size {
            style.point_size = size;
        }
        if let Some(jitter) = self.jitter {
            style.jitter = jitter;
        }
        if let Some(width) = self.body_width {
            style.body_width = width;
        }
        if let Some(title) = self.title.take() {
            style.title = Some(title);
        }
        if let Some(loc) = self.title_loc {
            style.title_loc = loc;
        }
        if let Some(size) = self.title_size {
            style.title_size = size;
        }
        if let Some(label) = self.x_label.take() {
            style.x_label = Some(label);
        }
        if let Some(label) = self.y_label.take() {
            style.y_label = Some(label);
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(weight) = self.font_weight {
            style.font_weight = weight;
        }
        if let Some(rotation) = self.label_rotation {
            style.label_rotation = rotation;
        }
        if let Some(size) = self.figure_size {
            style.figure_size = size;
        }
        if let Some(scatter) = self.scatter {
            style.scatter = scatter;
        }
        if let Some(bars) = self.significance_bars {
            style.significance_bars = bars;
        }
        if let Some(hide) = self.hide_spines {
            style.hide_top_right_spines = hide;
        }
        if let Some(width) = self.bar_edge_width {
            style.bar_edge_width = width;
        }
        if let Some(width) = self.errorbar_width {
            style.errorbar_width = width;
        }
        style.seed = self.seed;
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait DeliceAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`DeliceBuilder`] into a specialized execution builder.
    fn convert(builder: DeliceBuilder<T>) -> Self::Output;
}

/// Marker for annotation without a figure.
#[derive(Debug, Clone, Copy)]
pub struct Compare;

impl<T: Float> DeliceAdapter<T> for Compare {
    type Output = ComparatorBuilder<T>;

    fn convert(builder: DeliceBuilder<T>) -> Self::Output {
        let mut result = ComparatorBuilder::default();

        if let Some(test) = builder.test {
            result.annotation.test = test;
        }
        if let Some(correction) = builder.correction {
            result.annotation.correction = correction;
        }
        if let Some(policy) = builder.ns_policy {
            result.annotation.ns_policy = policy;
        }
        if let Some(order) = builder.group_order {
            result.group_order = order;
        }
        result.observer = builder.observer;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for violin plots.
#[derive(Debug, Clone, Copy)]
pub struct Violin;

impl<T: Float> DeliceAdapter<T> for Violin {
    type Output = ViolinBuilder<T>;

    fn convert(mut builder: DeliceBuilder<T>) -> Self::Output {
        let mut result = ViolinBuilder::default();

        if let Some(test) = builder.test {
            result.annotation.test = test;
        }
        if let Some(correction) = builder.correction {
            result.annotation.correction = correction;
        }
        if let Some(policy) = builder.ns_policy {
            result.annotation.ns_policy = policy;
        }
        if let Some(order) = builder.group_order.take() {
            result.group_order = order;
        }
        if let Some(layout) = builder.layout {
            result.layout = layout;
        }
        if let Some(kernel) = builder.kernel {
            result.kernel = kernel;
        }
        if let Some(rule) = builder.bandwidth {
            result.bandwidth = rule;
        }
        if let Some(points) = builder.points {
            result.points = points;
        }
        builder.apply_style(&mut result.style);
        result.observer = builder.observer;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for box plots.
#[derive(Debug, Clone, Copy)]
pub struct BoxPlot;

impl<T: Float> DeliceAdapter<T> for BoxPlot {
    type Output = BoxPlotBuilder<T>;

    fn convert(mut builder: DeliceBuilder<T>) -> Self::Output {
        let mut result = BoxPlotBuilder::default();

        if let Some(test) = builder.test {
            result.annotation.test = test;
        }
        if let Some(correction) = builder.correction {
            result.annotation.correction = correction;
        }
        if let Some(policy) = builder.ns_policy {
            result.annotation.ns_policy = policy;
        }
        if let Some(order) = builder.group_order.take() {
            result.group_order = order;
        }
        if let Some(layout) = builder.layout {
            result.layout = layout;
        }
        if let Some(whisker) = builder.whisker {
            result.whisker = whisker;
        }
        builder.apply_style(&mut result.style);
        result.observer = builder.observer;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for bar plots.
#[derive(Debug, Clone, Copy)]
pub struct Bar;

impl<T: Float> DeliceAdapter<T> for Bar {
    type Output = BarBuilder<T>;

    fn convert(mut builder: DeliceBuilder<T>) -> Self::Output {
        let mut result = BarBuilder::default();

        if let Some(test) = builder.test {
            result.annotation.test = test;
        }
        if let Some(correction) = builder.correction {
            result.annotation.correction = correction;
        }
        if let Some(policy) = builder.ns_policy {
            result.annotation.ns_policy = policy;
        }
        if let Some(order) = builder.group_order.take() {
            result.group_order = order;
        }
        if let Some(layout) = builder.layout {
            result.layout = layout;
        }
        builder.apply_style(&mut result.style);
        result.observer = builder.observer;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for faceted multi-group plots.
#[derive(Debug, Clone, Copy)]
pub struct Multi;

impl<T: Float> DeliceAdapter<T> for Multi {
    type Output = MultiBuilder<T>;

    fn convert(mut builder: DeliceBuilder<T>) -> Self::Output {
        let mut result = MultiBuilder::default();

        if let Some(test) = builder.test {
            result.annotation.test = test;
        }
        if let Some(correction) = builder.correction {
            result.annotation.correction = correction;
        }
        if let Some(policy) = builder.ns_policy {
            result.annotation.ns_policy = policy;
        }
        if let Some(order) = builder.group_order.take() {
            result.group_order = order;
        }
        if let Some(layout) = builder.layout {
            result.layout = layout;
        }
        if let Some(body) = builder.body {
            result.body = body;
        }
        if let Some(spacing) = builder.spacing {
            result.spacing = spacing;
        }
        if let Some(offset) = builder.offset_factor {
            result.offset_factor = offset;
        }
        builder.apply_style(&mut result.style);
        result.observer = builder.observer;
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

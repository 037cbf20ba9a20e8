//! Faceted multi-group plot adapter.
//!
//! ## Purpose
//!
//! This module plots several groups side by side at each value of a numeric
//! facet column (for example one cluster of boxes per time point), with a
//! legend of the groups and per-facet significance brackets.
//!
//! ## Key concepts
//!
//! * **Positions**: With `k` groups, group `g` (0-based) at facet value `v`
//!   is centered at `v * spacing + offset_factor * (2g - (k - 1))`, so each
//!   cluster is centered on its facet tick.
//! * **Per-facet tests**: Every facet is annotated on its own; the Bonferroni
//!   factor is the number of pairs tested within that facet.
//! * **Bodies**: `Box`, `Violin`, or `Dots` (mean line only).
//!
//! ## Invariants
//!
//! * Facet values are sorted ascending and must be orderable.
//! * Brackets span the actual body positions of the compared groups.
//!
//! ## Non-goals
//!
//! * Comparisons across facets.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

// Internal dependencies
use crate::adapters::boxplot::box_elements;
use crate::adapters::compare::{annotate, scatter, to_f64};
use crate::adapters::violin::violin_body;
use crate::algorithms::correction::Correction;
use crate::algorithms::ttest::TTest;
use crate::engine::executor::{AnnotationConfig, NsPolicy};
use crate::engine::layout::{Bracket, BracketLayout};
use crate::engine::output::AnnotationResult;
use crate::engine::validator::Validator;
use crate::evaluation::observer::ComparisonObserver;
use crate::math::density::{BandwidthRule, DensityKernel, DEFAULT_POINTS};
use crate::primitives::errors::DeliceError;
use crate::primitives::frame::{format_number, DataFrame};
use crate::primitives::groups::{GroupOrder, ObservationSet};
use crate::render::figure::{Axes, Element, Figure, LegendEntry, Tick};
use crate::render::jitter::plot_rng;
use crate::render::palette::Color;
use crate::render::style::PlotStyle;

/// Whisker reach of box bodies.
const WHISKER: f64 = 1.5;

/// Bracket line width in points.
const BRACKET_WIDTH: f64 = 1.0;

/// Bracket symbol size in points.
const SYMBOL_SIZE: f64 = 10.0;

/// Spine width in points.
const SPINE_WIDTH: f64 = 0.8;

// ============================================================================
// Configuration
// ============================================================================

/// Body drawn for each group at each facet value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    /// Quartile box with whiskers.
    #[default]
    Box,

    /// Kernel density body with a red mean line.
    Violin,

    /// Red mean line only.
    Dots,
}

/// Annotation of one facet value.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetAnnotation<T> {
    /// Facet value.
    pub facet: f64,

    /// Comparisons among the groups present at this facet value.
    pub annotation: AnnotationResult<T>,
}

/// A finished faceted plot.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiOutput<T> {
    /// Scene model of the plot.
    pub figure: Figure,

    /// One annotation per facet value, ascending.
    pub facets: Vec<FacetAnnotation<T>>,

    /// Brackets drawn on the figure.
    pub brackets: Vec<Bracket>,
}

impl<T: Float> MultiOutput<T> {
    /// Annotation at facet value `facet`.
    pub fn facet(&self, facet: f64) -> Option<&AnnotationResult<T>> {
        self.facets.iter().find(|f| f.facet == facet).map(|f| &f.annotation)
    }

    /// Serialize the figure to SVG.
    pub fn to_svg(&self) -> Result<String, DeliceError> {
        self.figure.to_svg()
    }
}

// ============================================================================
// Multi Builder
// ============================================================================

/// Builder for faceted plots.
#[derive(Debug, Clone)]
pub struct MultiBuilder<T> {
    /// Statistical test and correction settings.
    pub annotation: AnnotationConfig,

    /// Order of the groups within each cluster.
    pub group_order: GroupOrder,

    /// Cosmetic configuration.
    pub style: PlotStyle,

    /// Bracket stacking parameters.
    pub layout: BracketLayout,

    /// Body kind.
    pub body: BodyKind,

    /// Distance between consecutive facet values.
    pub spacing: f64,

    /// Half the distance between neighboring groups in a cluster.
    pub offset_factor: f64,

    /// Optional reporting hook.
    pub observer: Option<Arc<dyn ComparisonObserver<T>>>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for MultiBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> MultiBuilder<T> {
    /// Create a builder with faceted-plot defaults.
    fn new() -> Self {
        Self {
            annotation: AnnotationConfig::default(),
            group_order: GroupOrder::default(),
            style: PlotStyle::multi(),
            layout: BracketLayout::compact(),
            body: BodyKind::default(),
            spacing: 2.0,
            offset_factor: 0.5,
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
    // Multi-Specific Setters
    // ========================================================================

    /// Set the body kind.
    pub fn body(mut self, body: BodyKind) -> Self {
        self.body = body;
        self
    }

    /// Set the distance between facet values.
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the half distance between neighboring groups.
    pub fn offset_factor(mut self, offset_factor: f64) -> Self {
        self.offset_factor = offset_factor;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the faceted plotter.
    pub fn build(self) -> Result<MultiPlotter<T>, DeliceError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        self.style.validate()?;
        self.layout.validate()?;
        Validator::validate_positive(self.spacing, "spacing")?;
        Validator::validate_non_negative(self.offset_factor, "offset_factor")?;

        Ok(MultiPlotter { config: self })
    }
}

// ============================================================================
// Multi Plotter
// ============================================================================

/// Faceted plotter.
#[derive(Debug, Clone)]
pub struct MultiPlotter<T> {
    config: MultiBuilder<T>,
}

impl<T: Float> MultiPlotter<T> {
    /// Plot `value_column` split by `group_column` at each `facet_column` value.
    pub fn plot(
        &self,
        frame: &DataFrame<T>,
        group_column: &str,
        facet_column: &str,
        value_column: &str,
    ) -> Result<MultiOutput<T>, DeliceError> {
        let mut rng = plot_rng(self.config.style.seed);
        self.plot_with_rng(frame, group_column, facet_column, value_column, &mut rng)
    }

    /// Plot with an explicit jitter generator.
    pub fn plot_with_rng<R: Rng>(
        &self,
        frame: &DataFrame<T>,
        group_column: &str,
        facet_column: &str,
        value_column: &str,
        rng: &mut R,
    ) -> Result<MultiOutput<T>, DeliceError> {
        let cfg = &self.config;
        let style = &cfg.style;

        let all = ObservationSet::from_frame(frame, group_column, value_column, &cfg.group_order)?;
        let labels: Vec<String> = all.labels().into_iter().map(String::from).collect();
        let facet_values = frame.numeric(facet_column)?;
        let facets = distinct_facets(facet_values, facet_column)?;
        let row_labels = frame.labels(group_column)?;

        let colors = style.colors_for(labels.len())?;
        let edge = style.edge()?;
        let position = |g: usize, v: f64| {
            v * cfg.spacing + cfg.offset_factor * (2.0 * g as f64 - (labels.len() as f64 - 1.0))
        };

        let mut axes = Axes::new(style, facet_column, value_column);
        axes.spine_width = SPINE_WIDTH;
        axes.x_ticks = facets
            .iter()
            .map(|&v| Tick::new(v * cfg.spacing, format_number(v)))
            .collect();
        axes.legend = labels
            .iter()
            .zip(&colors)
            .map(|(label, &color)| LegendEntry {
                label: label.clone(),
                color,
            })
            .collect();

        let mut results = Vec::with_capacity(facets.len());
        let mut scatters = Vec::new();
        for &v in &facets {
            let rows: Vec<usize> = (0..frame.len())
                .filter(|&i| to_f64(facet_values[i]) == v)
                .collect();
            let in_facet: HashSet<&str> = rows.iter().map(|&i| row_labels[i].as_str()).collect();
            let present: Vec<String> = labels
                .iter()
                .filter(|label| in_facet.contains(label.as_str()))
                .cloned()
                .collect();

            let set = ObservationSet::from_labeled_rows(
                frame,
                &row_labels,
                &rows,
                group_column,
                value_column,
                &GroupOrder::Explicit(present),
            )?;
            let annotation = annotate(&set, cfg.annotation, cfg.observer.as_deref())?;

            for (group, summary) in set.groups.iter().zip(&annotation.groups) {
                let g = global_index(&labels, &group.label);
                let x = position(g, v);
                match cfg.body {
                    BodyKind::Box => axes.elements.extend(box_elements(
                        summary,
                        &group.values,
                        x,
                        style.body_width,
                        WHISKER,
                        edge,
                    )),
                    BodyKind::Violin => {
                        if let Some(body) = violin_body(
                            &group.values,
                            x,
                            style.body_width / 2.0,
                            DensityKernel::Gaussian,
                            BandwidthRule::Scott,
                            DEFAULT_POINTS,
                            edge,
                        ) {
                            axes.push(body);
                        }
                    }
                    BodyKind::Dots => {}
                }
                if cfg.body != BodyKind::Box {
                    let half = style.body_width / 2.0;
                    axes.push(Element::hline(to_f64(summary.mean), x - half, x + half, Color::RED, 2.0));
                }
                if style.scatter {
                    scatters.push(scatter(&group.values, x, colors[g], style, rng));
                }
            }

            results.push(FacetAnnotation { facet: v, annotation });
        }
        axes.elements.extend(scatters);

        axes.autoscale();
        let mut brackets = Vec::new();
        if style.significance_bars {
            let limits = axes.y_limits;
            for facet in &results {
                let local: Vec<usize> = facet
                    .annotation
                    .groups
                    .iter()
                    .map(|g| global_index(&labels, &g.label))
                    .collect();
                brackets.extend(cfg.layout.place(
                    &facet.annotation.comparisons,
                    |i| position(local[i], facet.facet),
                    limits,
                ));
            }
            axes.add_brackets(&brackets, BRACKET_WIDTH, Some(SYMBOL_SIZE));
        }

        Ok(MultiOutput {
            figure: Figure::new(style.figure_size, axes),
            facets: results,
            brackets,
        })
    }
}

/// Sorted distinct facet values.
fn distinct_facets<T: Float>(values: &[T], column: &str) -> Result<Vec<f64>, DeliceError> {
    let mut facets: Vec<f64> = values.iter().map(|&v| to_f64(v)).collect();
    if facets.iter().any(|v| v.is_nan()) {
        return Err(DeliceError::UnorderableColumn(column.to_string()));
    }
    if let Some(v) = facets.iter().find(|v| v.is_infinite()) {
        return Err(DeliceError::InvalidNumericValue(format!("{column}={v}")));
    }
    facets.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    facets.dedup();
    Ok(facets)
}

fn global_index(labels: &[String], label: &str) -> usize {
    labels.iter().position(|l| l == label).unwrap_or(0)
}

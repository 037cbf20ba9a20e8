//! Renderer-agnostic scene model.
//!
//! ## Purpose
//!
//! This module holds what a plot draws, in data coordinates: lines, filled
//! shapes, scatter markers and text, plus group ticks, labels, limits and
//! spines. Adapters fill an `Axes`; `render::svg` draws it with `plotters`.
//!
//! ## Design notes
//!
//! * **Data space**: Every element is stored in data coordinates; the chart
//!   backend maps them to pixels and picks the y ticks.
//! * **Autoscale**: Limits cover every non-text element plus a 5 % margin
//!   on each side. Brackets are placed from those limits and the top limit is
//!   then raised to fit them.
//!
//! ## Non-goals
//!
//! * Multiple axes per figure.
//! * Logarithmic or categorical scales.

// External dependencies
use std::path::Path;

// Internal dependencies
use crate::engine::layout::{upper_extent, Bracket};
use crate::primitives::errors::DeliceError;
use crate::render::palette::Color;
use crate::render::style::{FontWeight, PlotStyle, TitleLoc};
use crate::render::svg;

/// Margin added on each side of the data range by [`Axes::autoscale`].
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Ratio of axis label size to bracket symbol size.
const SYMBOL_SHRINK: f64 = 1.15;

// ============================================================================
// Elements
// ============================================================================

/// One drawable primitive in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Open line through `points`.
    Polyline {
        /// Vertices.
        points: Vec<(f64, f64)>,
        /// Line color.
        stroke: Color,
        /// Line width in points.
        width: f64,
    },

    /// Closed, filled shape.
    Polygon {
        /// Vertices.
        points: Vec<(f64, f64)>,
        /// Fill color.
        fill: Color,
        /// Outline color.
        stroke: Color,
        /// Outline width in points.
        width: f64,
    },

    /// Axis-aligned rectangle anchored at its lower-left corner.
    Rect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Width in data units.
        width: f64,
        /// Height in data units; may be negative.
        height: f64,
        /// Fill color.
        fill: Color,
        /// Outline color.
        stroke: Color,
        /// Outline width in points.
        stroke_width: f64,
    },

    /// Circular markers.
    Scatter {
        /// Marker centers.
        points: Vec<(f64, f64)>,
        /// Marker fill.
        fill: Color,
        /// Marker outline.
        edge: Color,
        /// Marker area in points squared.
        size: f64,
    },

    /// Text anchored at its bottom center.
    Text {
        /// Horizontal center.
        x: f64,
        /// Baseline.
        y: f64,
        /// Content.
        text: String,
        /// Font size in points.
        size: f64,
        /// Font weight.
        weight: FontWeight,
        /// Text color.
        color: Color,
    },
}

impl Element {
    /// Horizontal line from `x0` to `x1` at height `y`.
    pub fn hline(y: f64, x0: f64, x1: f64, stroke: Color, width: f64) -> Self {
        Element::Polyline {
            points: vec![(x0, y), (x1, y)],
            stroke,
            width,
        }
    }

    /// Vertical line from `y0` to `y1` at `x`.
    pub fn vline(x: f64, y0: f64, y1: f64, stroke: Color, width: f64) -> Self {
        Element::Polyline {
            points: vec![(x, y0), (x, y1)],
            stroke,
            width,
        }
    }

    /// Points that autoscaling must cover; empty for text.
    fn extent_points(&self) -> Vec<(f64, f64)> {
        match self {
            Element::Polyline { points, .. }
            | Element::Polygon { points, .. }
            | Element::Scatter { points, .. } => points.clone(),
            Element::Rect {
                x, y, width, height, ..
            } => vec![(*x, *y), (x + width, y + height)],
            Element::Text { .. } => Vec::new(),
        }
    }
}

// ============================================================================
// Ticks and Legend
// ============================================================================

/// A labeled tick mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data coordinates.
    pub position: f64,
    /// Label text.
    pub label: String,
}

impl Tick {
    /// Create a tick.
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Group label.
    pub label: String,
    /// Marker color.
    pub color: Color,
}

// ============================================================================
// Axes
// ============================================================================

/// A single plotting area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Drawn primitives, in paint order.
    pub elements: Vec<Element>,

    /// x tick positions and labels, one per group or facet.
    pub x_ticks: Vec<Tick>,

    /// Visible x range.
    pub x_limits: (f64, f64),

    /// Visible y range.
    pub y_limits: (f64, f64),

    /// x axis label.
    pub x_label: String,

    /// y axis label.
    pub y_label: String,

    /// Title text.
    pub title: Option<String>,

    /// Title placement.
    pub title_loc: TitleLoc,

    /// Title font size.
    pub title_size: f64,

    /// Label font size.
    pub font_size: f64,

    /// Label font weight.
    pub font_weight: FontWeight,

    /// x tick label rotation in degrees.
    pub label_rotation: f64,

    /// Hide the top and right spines.
    pub hide_top_right_spines: bool,

    /// Width of the bottom and left spines in points.
    pub spine_width: f64,

    /// Legend rows; no legend when empty.
    pub legend: Vec<LegendEntry>,
}

impl Axes {
    /// Empty axes configured from `style`.
    pub fn new(style: &PlotStyle, x_label: &str, y_label: &str) -> Self {
        Self {
            elements: Vec::new(),
            x_ticks: Vec::new(),
            x_limits: (0.0, 1.0),
            y_limits: (0.0, 1.0),
            x_label: style.x_label.clone().unwrap_or_else(|| x_label.to_string()),
            y_label: style.y_label.clone().unwrap_or_else(|| y_label.to_string()),
            title: style.title.clone(),
            title_loc: style.title_loc,
            title_size: style.title_size,
            font_size: style.font_size,
            font_weight: style.font_weight,
            label_rotation: style.label_rotation,
            hide_top_right_spines: style.hide_top_right_spines,
            spine_width: 2.0,
            legend: Vec::new(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Bounding box of every non-text element.
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self
            .elements
            .iter()
            .flat_map(|e| e.extent_points())
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let (x0, y0) = points.next()?;
        let init = ((x0, x0), (y0, y0));
        Some(points.fold(init, |((xl, xh), (yl, yh)), (x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }

    /// Fit both limits to the data with a 5 % margin.
    pub fn autoscale(&mut self) {
        if let Some((xs, ys)) = self.data_bounds() {
            self.x_limits = with_margin(xs);
            self.y_limits = with_margin(ys);
        }
    }

    /// Raise the top limit so that `y` sits inside the margin.
    pub fn include_y(&mut self, y: f64) {
        let (bottom, top) = self.y_limits;
        if y.is_finite() && y > top - (top - bottom) * AUTOSCALE_MARGIN {
            let span = y - bottom;
            self.y_limits.1 = y + span * AUTOSCALE_MARGIN / (1.0 - AUTOSCALE_MARGIN);
        }
    }

    /// Draw brackets and their symbols, then extend the top limit to fit.
    pub fn add_brackets(&mut self, brackets: &[Bracket], line_width: f64, symbol_size: Option<f64>) {
        let size = symbol_size.unwrap_or(self.font_size / SYMBOL_SHRINK);
        for b in brackets {
            self.push(Element::Polyline {
                points: b.path().to_vec(),
                stroke: Color::BLACK,
                width: line_width,
            });
            self.push(Element::Text {
                x: b.center(),
                y: b.text_y,
                text: b.symbol.clone(),
                size,
                weight: FontWeight::Bold,
                color: Color::BLACK,
            });
        }
        if let Some(top) = upper_extent(brackets) {
            self.include_y(top);
        }
    }

    /// Text of every text element, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn with_margin((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * AUTOSCALE_MARGIN;
        (lo - pad, hi + pad)
    } else {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * AUTOSCALE_MARGIN };
        (lo - pad, hi + pad)
    }
}

// ============================================================================
// Figure
// ============================================================================

/// A complete figure: size and a single axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width and height in inches.
    pub size: (f64, f64),

    /// The plotting area.
    pub axes: Axes,
}

impl Figure {
    /// Create a figure.
    pub fn new(size: (f64, f64), axes: Axes) -> Self {
        Self { size, axes }
    }

    /// Serialize to an SVG document.
    pub fn to_svg(&self) -> Result<String, DeliceError> {
        svg::render(self)
    }

    /// Write the SVG document to `path`.
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<(), DeliceError> {
        std::fs::write(path, self.to_svg()?)?;
        Ok(())
    }
}

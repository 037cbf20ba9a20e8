//! Explicit plot configuration.
//!
//! ## Purpose
//!
//! This module defines `PlotStyle`, the named-field configuration shared by
//! every plot kind, along with per-kind defaults.
//!
//! ## Design notes
//!
//! * **Per-kind defaults**: Violin, box, bar and faceted plots differ in body
//!   width, font size, label rotation and overlay flags; each has its own
//!   constructor.
//! * **Serializable**: With the `serde` feature the whole style round-trips
//!   through any serde format.
//!
//! ## Invariants
//!
//! * A validated style has strictly positive sizes and widths and a
//!   non-negative jitter.

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::DeliceError;
use crate::render::palette::{group_colors, Color, Palette};

// ============================================================================
// Enumerations
// ============================================================================

/// Horizontal placement of the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TitleLoc {
    /// Flush with the left edge of the axes.
    #[default]
    Left,
    /// Centered over the axes.
    Center,
    /// Flush with the right edge of the axes.
    Right,
}

/// Font weight of tick and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    #[default]
    Bold,
}

// ============================================================================
// Plot Style
// ============================================================================

/// Cosmetic configuration of a plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlotStyle {
    /// Name of the sequential palette used when no colors are given.
    pub palette: String,

    /// Explicit group colors, overriding the palette.
    pub colors: Option<Vec<String>>,

    /// Edge color of bodies, bars and markers.
    pub edge_color: String,

    /// Marker area in points squared.
    pub point_size: f64,

    /// Maximum horizontal scatter offset.
    pub jitter: f64,

    /// Width of violins, boxes and bars.
    pub body_width: f64,

    /// Title text.
    pub title: Option<String>,

    /// Title placement.
    pub title_loc: TitleLoc,

    /// Title font size.
    pub title_size: f64,

    /// x axis label; defaults to the group column name.
    pub x_label: Option<String>,

    /// y axis label; defaults to the value column name.
    pub y_label: Option<String>,

    /// Font size of tick and axis labels.
    pub font_size: f64,

    /// Font weight of tick and axis labels.
    pub font_weight: FontWeight,

    /// Rotation of x tick labels in degrees.
    pub label_rotation: f64,

    /// Figure width and height in inches.
    pub figure_size: (f64, f64),

    /// Overlay jittered observations.
    pub scatter: bool,

    /// Draw significance brackets.
    pub significance_bars: bool,

    /// Hide the top and right spines.
    pub hide_top_right_spines: bool,

    /// Edge width of bars.
    pub bar_edge_width: f64,

    /// Line width of error bars.
    pub errorbar_width: f64,

    /// Seed for the jitter generator; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::violin()
    }
}

impl PlotStyle {
    /// Defaults for violin plots.
    pub fn violin() -> Self {
        Self {
            palette: String::from("PuRd"),
            colors: None,
            edge_color: String::from("black"),
            point_size: 10.0,
            jitter: 0.05,
            body_width: 0.85,
            title: None,
            title_loc: TitleLoc::Left,
            title_size: 10.0,
            x_label: None,
            y_label: None,
            font_size: 20.0,
            font_weight: FontWeight::Bold,
            label_rotation: 0.0,
            figure_size: (6.4, 4.8),
            scatter: true,
            significance_bars: true,
            hide_top_right_spines: true,
            bar_edge_width: 3.0,
            errorbar_width: 2.0,
            seed: None,
        }
    }

    /// Defaults for box plots.
    pub fn boxplot() -> Self {
        Self {
            body_width: 0.5,
            font_size: 16.0,
            label_rotation: 45.0,
            significance_bars: false,
            hide_top_right_spines: false,
            ..Self::violin()
        }
    }

    /// Defaults for bar plots.
    pub fn bar() -> Self {
        Self {
            body_width: 0.5,
            label_rotation: 45.0,
            scatter: false,
            ..Self::violin()
        }
    }

    /// Defaults for faceted plots.
    pub fn multi() -> Self {
        Self {
            figure_size: (12.0, 8.0),
            ..Self::violin()
        }
    }

    /// Check every numeric field, the edge color and the group colors.
    pub fn validate(&self) -> Result<(), DeliceError> {
        Validator::validate_positive(self.point_size, "point_size")?;
        Validator::validate_non_negative(self.jitter, "jitter")?;
        Validator::validate_positive(self.body_width, "body_width")?;
        Validator::validate_positive(self.title_size, "title_size")?;
        Validator::validate_positive(self.font_size, "font_size")?;
        Validator::validate_positive(self.figure_size.0, "figure_width")?;
        Validator::validate_positive(self.figure_size.1, "figure_height")?;
        Validator::validate_non_negative(self.bar_edge_width, "bar_edge_width")?;
        Validator::validate_non_negative(self.errorbar_width, "errorbar_width")?;
        if !self.label_rotation.is_finite() {
            return Err(DeliceError::InvalidParameter {
                parameter: "label_rotation",
                value: self.label_rotation,
            });
        }
        self.edge()?;
        match &self.colors {
            Some(colors) => colors.iter().try_for_each(|c| Color::parse(c).map(|_| ())),
            None => Palette::from_name(&self.palette).map(|_| ()),
        }
    }

    /// Parsed edge color.
    pub fn edge(&self) -> Result<Color, DeliceError> {
        Color::parse(&self.edge_color)
    }

    /// One color per group.
    pub fn colors_for(&self, n: usize) -> Result<Vec<Color>, DeliceError> {
        group_colors(&self.palette, self.colors.as_deref(), n)
    }
}

//! SVG rendering of figures through `plotters`.
//!
//! ## Purpose
//!
//! This module draws a [`Figure`] onto a `plotters` SVG backend: a cartesian
//! chart over the axes limits, a mesh with one x label per group tick, the
//! scene elements as series, the title, and the legend of faceted plots.
//!
//! ## Key concepts
//!
//! * **Resolution**: 100 pixels per inch; point sizes convert at 72 points
//!   per inch.
//! * **Plot area**: Margins and label areas follow matplotlib's default
//!   subplot fractions (left 0.125, right 0.9, bottom 0.11, top 0.88).
//! * **Rotation**: The backend turns text in quarter turns only, so x tick
//!   labels rotated by 45 degrees or more are drawn vertically.

// External dependencies
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;

// Internal dependencies
use crate::primitives::errors::DeliceError;
use crate::render::figure::{Axes, Element, Figure};
use crate::render::palette;
use crate::render::style::{FontWeight, TitleLoc};

/// Pixels per inch.
pub const DPI: f64 = 100.0;

const PT: f64 = DPI / 72.0;
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
const BOTTOM: f64 = 0.11;
const TOP: f64 = 0.88;
const Y_LABELS: usize = 6;
const LEGEND_FONT: f64 = 15.0;

impl<E: Error + Send + Sync> From<DrawingAreaErrorKind<E>> for DeliceError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        DeliceError::Render(err.to_string())
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Pixel dimensions of a figure measured in inches.
pub fn pixel_size((width, height): (f64, f64)) -> (u32, u32) {
    (px(width * DPI), px(height * DPI))
}

/// Serialize `figure` to an SVG document.
pub fn render(figure: &Figure) -> Result<String, DeliceError> {
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, pixel_size(figure.size)).into_drawing_area();
        draw(&root, &figure.axes)?;
        root.present()?;
    }
    Ok(out)
}

/// Draw `axes` onto a drawing area of any backend.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();
    let (w, h) = (f64::from(width), f64::from(height));

    let (x0, x1) = axes.x_limits;
    let (y0, y1) = axes.y_limits;
    let positions: Vec<f64> = axes.x_ticks.iter().map(|t| t.position).collect();

    let mut chart = ChartBuilder::on(root)
        .margin_top(px((1.0 - TOP) * h))
        .margin_right(px((1.0 - RIGHT) * w))
        .x_label_area_size(px(BOTTOM * h))
        .y_label_area_size(px(LEFT * w))
        .build_cartesian_2d((x0..x1).with_key_points(positions), y0..y1)?;

    let label_font = font(axes.font_size, axes.font_weight);
    let tick_font = if axes.label_rotation.abs() >= 45.0 {
        label_font.clone().transform(FontTransform::Rotate270)
    } else {
        label_font.clone()
    };
    let tick_label = |x: &f64| {
        axes.x_ticks
            .iter()
            .find(|t| (t.position - x).abs() < 1e-9)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(axes.x_ticks.len())
        .y_labels(Y_LABELS)
        .x_label_formatter(&tick_label)
        .x_label_style(tick_font)
        .y_label_style(label_font.clone())
        .x_desc(axes.x_label.as_str())
        .y_desc(axes.y_label.as_str())
        .axis_desc_style(label_font)
        .axis_style(BLACK.stroke_width(px(axes.spine_width * PT)))
        .draw()?;

    for element in &axes.elements {
        match element {
            Element::Polyline { points, stroke, width } => {
                chart.draw_series(std::iter::once(PathElement::new(
                    points.clone(),
                    rgb(*stroke).stroke_width(px(width * PT)),
                )))?;
            }
            Element::Polygon {
                points,
                fill,
                stroke,
                width,
            } => {
                let mut outline = points.clone();
                outline.extend(points.first().copied());
                chart.draw_series(std::iter::once(Polygon::new(points.clone(), rgb(*fill).filled())))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    outline,
                    rgb(*stroke).stroke_width(px(width * PT)),
                )))?;
            }
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
                stroke_width,
            } => {
                let corners = [(*x, *y), (x + width, y + height)];
                chart.draw_series([
                    Rectangle::new(corners, rgb(*fill).filled()),
                    Rectangle::new(corners, rgb(*stroke).stroke_width(px(stroke_width * PT))),
                ])?;
            }
            Element::Scatter {
                points,
                fill,
                edge,
                size,
            } => {
                let radius = marker_radius(*size);
                let (face, rim) = (rgb(*fill).filled(), rgb(*edge).stroke_width(1));
                chart.draw_series(
                    points
                        .iter()
                        .flat_map(|&p| [Circle::new(p, radius, face), Circle::new(p, radius, rim)]),
                )?;
            }
            Element::Text {
                x,
                y,
                text,
                size,
                weight,
                color,
            } => {
                let ink = rgb(*color);
                let style = font(*size, *weight)
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Bottom));
                chart.draw_series(std::iter::once(Text::new(text.clone(), (*x, *y), style)))?;
            }
        }
    }

    let (xs, ys) = chart.plotting_area().get_pixel_range();
    if !axes.hide_top_right_spines {
        root.draw(&PathElement::new(
            vec![(xs.start, ys.start), (xs.end, ys.start), (xs.end, ys.end)],
            BLACK.stroke_width(1),
        ))?;
    }

    if let Some(title) = &axes.title {
        let (x, anchor) = match axes.title_loc {
            TitleLoc::Left => (xs.start, HPos::Left),
            TitleLoc::Center => ((xs.start + xs.end) / 2, HPos::Center),
            TitleLoc::Right => (xs.end, HPos::Right),
        };
        let style = font(axes.title_size, FontWeight::Normal)
            .color(&BLACK)
            .pos(Pos::new(anchor, VPos::Bottom));
        let baseline = ys.start - (6.0 * PT).round() as i32;
        root.draw(&Text::new(title.clone(), (x, baseline), style))?;
    }

    if !axes.legend.is_empty() {
        let radius = marker_radius(LEGEND_FONT * LEGEND_FONT * 0.36);
        for entry in &axes.legend {
            let marker = rgb(entry.color);
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                .label(entry.label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), radius, marker.filled()));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(font(LEGEND_FONT, FontWeight::Normal))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.4))
            .draw()?;
    }

    Ok(())
}

// ============================================================================
// Conversions
// ============================================================================

fn rgb(c: palette::Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Sans-serif font of `points` size.
fn font(points: f64, weight: FontWeight) -> FontDesc<'static> {
    let style = match weight {
        FontWeight::Normal => FontStyle::Normal,
        FontWeight::Bold => FontStyle::Bold,
    };
    FontDesc::new(FontFamily::SansSerif, points * PT, style)
}

/// Radius in pixels of a marker with `area` in points squared.
fn marker_radius(area: f64) -> i32 {
    (area.sqrt() / 2.0 * PT).round().max(1.0) as i32
}

#[inline]
fn px(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

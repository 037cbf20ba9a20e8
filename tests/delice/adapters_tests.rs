#![cfg(feature = "dev")]
//! Tests for the execution adapters.
//!
//! These tests drive each processor on small frames and inspect the
//! annotation, the placed brackets, and the scene model.
//!
//! ## Test Organization
//!
//! 1. **Compare** - Annotation without a figure
//! 2. **Violin** - Bodies, mean lines, brackets
//! 3. **Box** - Whiskers and disabled brackets
//! 4. **Bar** - Bars and error bars
//! 5. **Multi** - Facets, legend, per-facet brackets
//! 6. **Validation** - Build-time errors

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use delice::internals::adapters::bar::BarBuilder;
use delice::internals::adapters::boxplot::{whisker_bounds, BoxPlotBuilder};
use delice::internals::adapters::compare::ComparatorBuilder;
use delice::internals::adapters::multi::{BodyKind, MultiBuilder};
use delice::internals::adapters::violin::ViolinBuilder;
use delice::internals::engine::executor::NsPolicy;
use delice::internals::evaluation::summary::GroupSummary;
use delice::internals::math::density::BandwidthRule;
use delice::internals::primitives::errors::DeliceError;
use delice::internals::primitives::frame::DataFrame;
use delice::internals::primitives::groups::{Group, GroupOrder, ObservationSet};
use delice::internals::render::figure::Element;
use delice::internals::render::style::PlotStyle;

// ============================================================================
// Helper Functions
// ============================================================================

fn treatment_frame() -> DataFrame<f64> {
    DataFrame::new()
        .with_categorical(
            "treatment",
            [
                "control", "control", "control", "control", "control", "drug", "drug", "drug", "drug", "drug",
                "placebo", "placebo", "placebo", "placebo", "placebo",
            ],
        )
        .unwrap()
        .with_numeric(
            "response",
            [
                4.1, 5.2, 6.3, 5.5, 4.9, 6.0, 7.1, 6.8, 7.5, 6.4, 4.0, 5.0, 6.0, 5.0, 4.5,
            ],
        )
        .unwrap()
}

fn two_group_frame() -> DataFrame<f64> {
    DataFrame::new()
        .with_categorical("g", ["a", "a", "a", "b", "b", "b"])
        .unwrap()
        .with_numeric("v", [1.0, 2.0, 3.0, 10.0, 11.0, 12.0])
        .unwrap()
}

fn constant_frame() -> DataFrame<f64> {
    DataFrame::new()
        .with_categorical("g", ["a", "a", "a", "b", "b", "b"])
        .unwrap()
        .with_numeric("v", [5.0; 6])
        .unwrap()
}

fn degenerate_ab() -> DeliceError {
    DeliceError::DegenerateComparison {
        first: "a".to_string(),
        second: "b".to_string(),
    }
}

fn seeded_style(style: PlotStyle) -> PlotStyle {
    PlotStyle {
        seed: Some(7),
        ..style
    }
}

fn count<F: Fn(&Element) -> bool>(elements: &[Element], pred: F) -> usize {
    elements.iter().filter(|e| pred(e)).count()
}

// ============================================================================
// Compare Tests
// ============================================================================

/// Test annotation from a data frame.
#[test]
fn test_compare_run() {
    let comparator = ComparatorBuilder::<f64>::default().build().unwrap();
    let result = comparator.run(&treatment_frame(), "treatment", "response").unwrap();

    assert_eq!(result.labels(), ["control", "drug", "placebo"]);
    assert_eq!(result.pairs_tested, 3);
    let symbols: Vec<&str> = result.comparisons.iter().map(|c| c.symbol()).collect();
    assert_eq!(symbols, vec!["ns", "*", "**"]);
}

/// Test that a single group is rejected for annotation.
#[test]
fn test_compare_too_few_groups() {
    let comparator = ComparatorBuilder::<f64>::default().build().unwrap();
    let set = ObservationSet::from_groups([("only", vec![1.0, 2.0, 3.0])]);

    assert_eq!(
        comparator.run_set(&set).unwrap_err(),
        DeliceError::TooFewGroups { got: 1, min: 2 }
    );
}

/// Test missing columns.
#[test]
fn test_compare_missing_column() {
    let comparator = ComparatorBuilder::<f64>::default().build().unwrap();

    assert_eq!(
        comparator.run(&treatment_frame(), "dose", "response").unwrap_err(),
        DeliceError::ColumnNotFound("dose".to_string())
    );
}

/// Test the explicit group order and the discard policy.
#[test]
fn test_compare_order_and_policy() {
    let comparator = ComparatorBuilder::<f64>::default()
        .group_order(GroupOrder::Explicit(vec!["drug".to_string(), "control".to_string()]))
        .ns_policy(NsPolicy::Discard)
        .build()
        .unwrap();
    let result = comparator.run(&treatment_frame(), "treatment", "response").unwrap();

    assert_eq!(result.labels(), ["drug", "control"]);
    assert_eq!(result.comparisons.len(), 1);
    assert_relative_eq!(result.comparisons[0].p_adjusted, 0.008_072_697_219_346_93, max_relative = 1e-6);
}

/// Test that identical constant groups still fail a bare comparison.
#[test]
fn test_compare_degenerate_pair() {
    let comparator = ComparatorBuilder::<f64>::default().build().unwrap();

    assert_eq!(comparator.run(&constant_frame(), "g", "v").unwrap_err(), degenerate_ab());
}

// ============================================================================
// Violin Tests
// ============================================================================

/// Test the elements of a violin plot.
#[test]
fn test_violin_plot() {
    let plotter = ViolinBuilder::<f64>::default()
        .style(seeded_style(PlotStyle::violin()))
        .build()
        .unwrap();
    let out = plotter.plot(&treatment_frame(), "treatment", "response").unwrap();
    let elements = &out.figure.axes.elements;

    assert_eq!(count(elements, |e| matches!(e, Element::Polygon { .. })), 3);
    assert_eq!(count(elements, |e| matches!(e, Element::Scatter { .. })), 3);
    assert_eq!(out.brackets.len(), 2);
    assert_eq!(out.figure.axes.texts(), vec!["*", "**"]);
    assert_eq!(out.figure.axes.x_ticks[2].label, "placebo");
    assert_eq!(out.figure.axes.x_label, "treatment");
}

/// Test bracket positions and stacking for the reference frame.
#[test]
fn test_violin_brackets() {
    let plotter = ViolinBuilder::<f64>::default().build().unwrap();
    let out = plotter
        .plot_with_rng(&treatment_frame(), "treatment", "response", &mut StdRng::seed_from_u64(1))
        .unwrap();

    let first = &out.brackets[0];
    assert_eq!((first.x1, first.x2), (1.0, 2.0));
    assert_eq!(first.level, 2);
    assert_eq!(out.brackets[1].level, 1);
    assert!(first.height > out.brackets[1].height);
    assert!(out.figure.axes.y_limits.1 > first.text_y);
}

/// Test that a fixed seed reproduces the figure.
#[test]
fn test_violin_seeded() {
    let plotter = ViolinBuilder::<f64>::default()
        .style(seeded_style(PlotStyle::violin()))
        .build()
        .unwrap();
    let a = plotter.plot(&two_group_frame(), "g", "v").unwrap();
    let b = plotter.plot(&two_group_frame(), "g", "v").unwrap();

    assert_eq!(a.to_svg().unwrap(), b.to_svg().unwrap());
    assert!(a.to_svg().unwrap().contains("***"));
}

/// Test that a constant group has a mean line but no body.
#[test]
fn test_violin_constant_group() {
    let frame = DataFrame::new()
        .with_categorical("g", ["a", "a", "b", "b", "b"])
        .unwrap()
        .with_numeric("v", [2.0, 2.0, 5.0, 6.0, 7.0])
        .unwrap();
    let plotter = ViolinBuilder::<f64>::default()
        .style(PlotStyle {
            scatter: false,
            ..PlotStyle::violin()
        })
        .build()
        .unwrap();
    let out = plotter.plot(&frame, "g", "v").unwrap();
    let elements = &out.figure.axes.elements;

    assert_eq!(count(elements, |e| matches!(e, Element::Polygon { .. })), 1);
    assert_eq!(count(elements, |e| matches!(e, Element::Scatter { .. })), 0);
}

/// Test that bracket-free violins draw no symbols.
#[test]
fn test_violin_without_brackets() {
    let plotter = ViolinBuilder::<f64>::default()
        .style(PlotStyle {
            significance_bars: false,
            ..PlotStyle::violin()
        })
        .build()
        .unwrap();
    let out = plotter.plot(&two_group_frame(), "g", "v").unwrap();

    assert!(out.brackets.is_empty());
    assert!(out.figure.axes.texts().is_empty());
    assert_eq!(out.annotation.comparisons.len(), 1);
}

/// Test that an untestable pair is skipped while the others are bracketed.
#[test]
fn test_violin_untestable_pair() {
    let frame = DataFrame::new()
        .with_categorical("g", ["a", "a", "a", "b", "b", "b", "c", "c", "c"])
        .unwrap()
        .with_numeric("v", [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 10.0, 11.0, 12.0])
        .unwrap();
    let plotter = ViolinBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&frame, "g", "v").unwrap();

    assert_eq!(out.annotation.pairs_tested, 3);
    assert_eq!(out.annotation.comparisons.len(), 2);
    assert_eq!(out.annotation.skipped.len(), 1);
    assert_eq!(out.annotation.skipped[0].reason, degenerate_ab());
    assert_eq!(out.brackets.len(), 2);
}

// ============================================================================
// Box Tests
// ============================================================================

/// Test that box plots skip brackets by default.
#[test]
fn test_box_defaults() {
    let plotter = BoxPlotBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&treatment_frame(), "treatment", "response").unwrap();

    assert!(out.brackets.is_empty());
    assert_eq!(out.annotation.comparisons.len(), 3);
    assert_eq!(out.figure.axes.label_rotation, 45.0);
}

/// Test that box plots can opt into brackets.
#[test]
fn test_box_with_brackets() {
    let plotter = BoxPlotBuilder::<f64>::default()
        .style(PlotStyle {
            significance_bars: true,
            ..PlotStyle::boxplot()
        })
        .build()
        .unwrap();
    let out = plotter.plot(&two_group_frame(), "g", "v").unwrap();

    assert_eq!(out.brackets.len(), 1);
    assert_eq!(out.brackets[0].symbol, "***");
}

/// Test that identical constant groups do not stop a box plot.
#[test]
fn test_box_untestable_pair() {
    let plotter = BoxPlotBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&constant_frame(), "g", "v").unwrap();

    assert!(out.brackets.is_empty());
    assert!(out.annotation.comparisons.is_empty());
    assert_eq!(out.annotation.skipped.len(), 1);
    assert_eq!(out.annotation.skipped[0].first_label, "a");
    assert_eq!(out.annotation.skipped[0].reason, degenerate_ab());
    assert!(out.to_svg().unwrap().contains("</svg>"));
}

/// Test whisker ends with and without outliers.
#[test]
fn test_whisker_bounds() {
    let values = vec![1.0, 2.0, 3.0, 4.0, 100.0];
    let group = Group {
        label: "g".to_string(),
        values: values.clone(),
    };
    let summary = GroupSummary::from_group(&group, 0);

    // q1 = 2, q3 = 4, reach = 3
    assert_eq!(whisker_bounds(&summary, &values, 1.5), (1.0, 4.0));
    assert_eq!(whisker_bounds(&summary, &values, 100.0), (1.0, 100.0));
}

// ============================================================================
// Bar Tests
// ============================================================================

/// Test one bar and three error bar strokes per group.
#[test]
fn test_bar_plot() {
    let plotter = BarBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&treatment_frame(), "treatment", "response").unwrap();
    let elements = &out.figure.axes.elements;

    let heights: Vec<f64> = elements
        .iter()
        .filter_map(|e| match e {
            Element::Rect { height, .. } => Some(*height),
            _ => None,
        })
        .collect();
    assert_eq!(heights.len(), 3);
    assert_relative_eq!(heights[1], 6.76, epsilon = 1e-12);
    assert_eq!(count(elements, |e| matches!(e, Element::Scatter { .. })), 0);
    assert_eq!(out.brackets.len(), 2);
}

/// Test that error bars span one population standard deviation.
#[test]
fn test_bar_error_bars() {
    let plotter = BarBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&two_group_frame(), "g", "v").unwrap();
    let std = (2.0_f64 / 3.0).sqrt();

    let spans: Vec<(f64, f64)> = out
        .figure
        .axes
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Polyline { points, .. } if points.len() == 2 && points[0].0 == points[1].0 => {
                Some((points[0].1, points[1].1))
            }
            _ => None,
        })
        .collect();

    assert_relative_eq!(spans[0].0, 2.0 - std, epsilon = 1e-12);
    assert_relative_eq!(spans[0].1, 2.0 + std, epsilon = 1e-12);
}

/// Test that identical constant groups do not stop a bar plot.
#[test]
fn test_bar_untestable_pair() {
    for significance_bars in [false, true] {
        let plotter = BarBuilder::<f64>::default()
            .style(PlotStyle {
                significance_bars,
                ..PlotStyle::bar()
            })
            .build()
            .unwrap();
        let out = plotter.plot(&constant_frame(), "g", "v").unwrap();

        assert!(out.brackets.is_empty());
        assert_eq!(out.annotation.skipped.len(), 1);
        assert_eq!(count(&out.figure.axes.elements, |e| matches!(e, Element::Rect { .. })), 2);
    }
}

// ============================================================================
// Multi Tests
// ============================================================================

fn faceted_frame() -> DataFrame<f64> {
    DataFrame::new()
        .with_categorical(
            "line",
            ["wt", "wt", "wt", "ko", "ko", "ko", "wt", "wt", "wt", "ko", "ko", "ko"],
        )
        .unwrap()
        .with_numeric("day", [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0])
        .unwrap()
        .with_numeric(
            "size",
            [1.0, 1.1, 0.9, 1.0, 1.2, 0.8, 2.0, 2.1, 1.9, 5.0, 5.1, 4.9],
        )
        .unwrap()
}

/// Test per-facet annotation and legend.
#[test]
fn test_multi_facets() {
    let plotter = MultiBuilder::<f64>::default()
        .style(seeded_style(PlotStyle::multi()))
        .build()
        .unwrap();
    let out = plotter.plot(&faceted_frame(), "line", "day", "size").unwrap();

    assert_eq!(out.facets.len(), 2);
    assert_eq!(out.facets[0].facet, 1.0);
    assert_eq!(out.figure.axes.legend.len(), 2);
    assert_eq!(out.figure.axes.legend[0].label, "ko");

    let day1 = out.facet(1.0).unwrap();
    assert_eq!(day1.comparisons[0].symbol(), "ns");
    let day2 = out.facet(2.0).unwrap();
    assert!(day2.comparisons[0].is_significant());
    assert!(out.facet(3.0).is_none());
}

/// Test that brackets span the group positions within a cluster.
#[test]
fn test_multi_bracket_positions() {
    let plotter = MultiBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&faceted_frame(), "line", "day", "size").unwrap();

    assert_eq!(out.brackets.len(), 1);
    let b = &out.brackets[0];
    // spacing 2, offset 0.5: ko at 4 - 0.5, wt at 4 + 0.5
    assert_relative_eq!(b.x1, 3.5, epsilon = 1e-12);
    assert_relative_eq!(b.x2, 4.5, epsilon = 1e-12);
    assert_eq!(out.figure.axes.x_ticks[1].label, "2");
}

/// Test the body kinds.
#[test]
fn test_multi_bodies() {
    let frame = faceted_frame();
    let violin = MultiBuilder::<f64>::default()
        .body(BodyKind::Violin)
        .build()
        .unwrap()
        .plot(&frame, "line", "day", "size")
        .unwrap();
    let dots = MultiBuilder::<f64>::default()
        .body(BodyKind::Dots)
        .build()
        .unwrap()
        .plot(&frame, "line", "day", "size")
        .unwrap();

    assert_eq!(count(&violin.figure.axes.elements, |e| matches!(e, Element::Polygon { .. })), 4);
    assert_eq!(count(&dots.figure.axes.elements, |e| matches!(e, Element::Polygon { .. })), 0);
}

/// Test that a missing facet value cannot be ordered.
#[test]
fn test_multi_unorderable_facet() {
    let frame = DataFrame::new()
        .with_categorical("line", ["wt", "ko"])
        .unwrap()
        .with_numeric("day", [1.0, f64::NAN])
        .unwrap()
        .with_numeric("size", [1.0, 2.0])
        .unwrap();
    let plotter = MultiBuilder::<f64>::default().build().unwrap();

    assert_eq!(
        plotter.plot(&frame, "line", "day", "size").unwrap_err(),
        DeliceError::UnorderableColumn("day".to_string())
    );
}

/// Test that a facet with single observations is skipped, not fatal.
#[test]
fn test_multi_untestable_facet() {
    let frame = DataFrame::new()
        .with_categorical("line", ["wt", "ko", "wt", "wt", "wt", "ko", "ko", "ko"])
        .unwrap()
        .with_numeric("day", [1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0])
        .unwrap()
        .with_numeric("size", [1.0, 1.2, 2.0, 2.1, 1.9, 5.0, 5.1, 4.9])
        .unwrap();
    let plotter = MultiBuilder::<f64>::default().build().unwrap();
    let out = plotter.plot(&frame, "line", "day", "size").unwrap();

    let day1 = out.facet(1.0).unwrap();
    assert!(day1.comparisons.is_empty());
    assert_eq!(day1.skipped.len(), 1);
    assert!(matches!(day1.skipped[0].reason, DeliceError::TooFewObservations { .. }));
    let day2 = out.facet(2.0).unwrap();
    assert!(day2.comparisons[0].is_significant());
    assert_eq!(out.brackets.len(), 1);
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test build-time parameter checks.
#[test]
fn test_builder_validation() {
    assert_eq!(
        ViolinBuilder::<f64>::default().points(1).build().unwrap_err(),
        DeliceError::InvalidParameter {
            parameter: "points",
            value: 1.0
        }
    );
    assert_eq!(
        ViolinBuilder::<f64>::default()
            .bandwidth(BandwidthRule::Factor(-1.0))
            .build()
            .unwrap_err(),
        DeliceError::InvalidParameter {
            parameter: "bandwidth",
            value: -1.0
        }
    );
    assert!(BoxPlotBuilder::<f64>::default().whisker(-0.5).build().is_err());
    assert!(MultiBuilder::<f64>::default().spacing(0.0).build().is_err());
}

/// Test that too few colors surface at plot time.
#[test]
fn test_insufficient_colors() {
    let plotter = BarBuilder::<f64>::default()
        .style(PlotStyle {
            colors: Some(vec!["red".to_string()]),
            ..PlotStyle::bar()
        })
        .build()
        .unwrap();

    assert_eq!(
        plotter.plot(&treatment_frame(), "treatment", "response").unwrap_err(),
        DeliceError::InsufficientColors { got: 1, needed: 3 }
    );
}

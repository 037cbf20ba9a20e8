//! # delice: Pairwise Significance Annotation for Grouped Data
//!
//! Statistical annotation and styled plotting of grouped numeric data.
//! Every pair of groups is compared with an independent two-sample t-test,
//! the p-values are Bonferroni-corrected, classified into the familiar
//! `ns` / `*` / `**` / `***` tiers, and drawn as stacked brackets above
//! violin, box, bar, or faceted plots rendered to SVG.
//!
//! ## What is this for?
//!
//! A common figure in experimental papers shows a handful of treatment
//! groups side by side with asterisks marking which differences are
//! significant. Producing it means computing every pairwise test, correcting
//! for the number of tests, and placing brackets so they do not overlap.
//! This crate does all three, deterministically, and hands back both the
//! numbers and a figure.
//!
//! ## Quick Start
//!
//! ### Annotation Only
//!
//! ```rust
//! use delice::prelude::*;
//!
//! let frame = DataFrame::new()
//!     .with_categorical("treatment", [
//!         "control", "control", "control", "control", "control",
//!         "drug", "drug", "drug", "drug", "drug",
//!         "placebo", "placebo", "placebo", "placebo", "placebo",
//!     ])?
//!     .with_numeric("response", [
//!         4.1, 5.2, 6.3, 5.5, 4.9,
//!         6.0, 7.1, 6.8, 7.5, 6.4,
//!         4.0, 5.0, 6.0, 5.0, 4.5,
//!     ])?;
//!
//! let result = Delice::new()
//!     .test(TTest::Student)            // Equal-variance t-test
//!     .correction(Correction::Bonferroni)
//!     .adapter(Compare)                // Numbers only, no figure
//!     .build()?
//!     .run(&frame, "treatment", "response")?;
//!
//! println!("{}", result);
//! # Result::<(), DeliceError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Groups:       3
//!   Pairs tested: 3
//!   Test:         Student
//!   Correction:   Bonferroni
//!
//! Groups:
//!        Label      N         Mean          Std
//! ---------------------------------------------
//!      control      5     5.200000     0.721110
//!         drug      5     6.760000     0.523832
//!      placebo      5     4.900000     0.663325
//!
//! Comparisons:
//!        First       Second          t            p        p_adj   Sig
//! --------------------------------------------------------------------
//!      control      placebo     0.6124    5.5729e-1     1.6719e0    ns
//!      control         drug    -3.5005    8.0727e-3    2.4218e-2     *
//!         drug      placebo     4.4012    2.2831e-3    6.8492e-3    **
//! ```
//!
//! Note that the adjusted p-value is not capped at 1.
//!
//! ### Violin Plot
//!
//! ```rust
//! use delice::prelude::*;
//! # let frame = DataFrame::new()
//! #     .with_categorical("treatment", ["a", "a", "a", "b", "b", "b"])?
//! #     .with_numeric("response", [1.0, 2.0, 3.0, 10.0, 11.0, 12.0])?;
//!
//! let plot = Delice::new()
//!     .palette("PuRd")                 // Sequential palette for the points
//!     .title("Response by treatment")
//!     .seed(42)                        // Reproducible jitter
//!     .adapter(Violin)
//!     .build()?
//!     .plot(&frame, "treatment", "response")?;
//!
//! assert_eq!(plot.brackets.len(), 1);
//! let svg = plot.to_svg()?;
//! assert!(svg.contains("***"));
//! # Result::<(), DeliceError>::Ok(())
//! ```
//!
//! The same configuration works with `BoxPlot`, `Bar`, and (with an extra
//! facet column) `Multi`.
//!
//! ### Result and Error Handling
//!
//! Every operation returns `Result<_, DeliceError>`. Missing columns, groups
//! too small to compare, pairs of identical constant groups, unknown palettes,
//! and invalid parameters are all reported as errors rather than producing a
//! misleading figure.
//!
//! ```rust
//! use delice::prelude::*;
//! # let frame = DataFrame::new()
//! #     .with_categorical("g", ["a", "a", "b", "b"])?
//! #     .with_numeric("v", [1.0, 1.0, 2.0, 2.0])?;
//!
//! match Delice::new().adapter(Compare).build()?.run(&frame, "g", "v") {
//!     Ok(result) => println!("{}", result),
//!     Err(e) => eprintln!("Annotation failed: {}", e),
//! }
//! # Result::<(), DeliceError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Each comparison is emitted as a `tracing` event at `DEBUG` level and each
//! placed bracket at `TRACE`. Install any `tracing` subscriber to see them.
//! For a plain-text report without a subscriber, attach a
//! [`ConsoleObserver`](prelude::ConsoleObserver) via `.observer(...)`.
//!
//! ## References
//!
//! - Student (1908). "The Probable Error of a Mean"
//! - Welch, B. L. (1947). "The generalization of 'Student's' problem when
//!   several different population variances are involved"
//! - Scott, D. W. (1992). "Multivariate Density Estimation"

// Layer 1: Primitives - data frame, groups, and errors.
mod primitives;

// Layer 2: Math - descriptive statistics, distributions, densities.
mod math;

// Layer 3: Algorithms - pair enumeration, t-tests, correction, tiers.
mod algorithms;

// Layer 4: Evaluation - group summaries, comparison rows, observers.
mod evaluation;

// Layer 5: Engine - orchestration, validation, bracket layout.
mod engine;

// Layer 6: Render - style, palettes, scene model, SVG output.
mod render;

// Layer 7: Adapters - per-plot-kind execution builders.
mod adapters;

// High-level fluent API.
mod api;

// Standard delice prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Bar, BoxPlot, Compare, Multi, Violin},
        AnnotationResult, BandwidthRule, BodyKind, Bracket, BracketLayout, Color, Column, Comparison,
        ComparisonObserver, ConsoleObserver, Correction, DataFrame, DeliceBuilder as Delice, DeliceError,
        DensityKernel, FontWeight, GroupOrder, GroupSummary, MultiOutput, NsPolicy, ObservationSet, Palette,
        PlotOutput, PlotStyle, SignificanceTier, TTest, TitleLoc,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod render {
        pub use crate::render::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

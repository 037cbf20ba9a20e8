//! Layer 7: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing execution builders that adapt the engine
//! and render layers to each plot kind:
//!
//! - **Compare**: Pairwise annotation only, no figure
//! - **Violin**: Density bodies with mean lines and scatter
//! - **Box**: Quartile boxes with whiskers, mean lines and scatter
//! - **Bar**: Mean bars with standard deviation error bars
//! - **Multi**: Groups clustered at each value of a numeric facet column
//!
//! # Architecture
//!
//! ```text
//! Layer 8: API
//!   ↓
//! Layer 7: Adapters ← You are here
//!   ↓
//! Layer 6: Render
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Annotation-only adapter and shared plot plumbing.
pub mod compare;

/// Violin plots.
pub mod violin;

/// Box plots.
pub mod boxplot;

/// Bar plots.
pub mod bar;

/// Faceted multi-group plots.
pub mod multi;

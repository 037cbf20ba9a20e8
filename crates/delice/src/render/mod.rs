//! Layer 6: Render
//!
//! # Purpose
//!
//! This layer describes what a plot looks like: the explicit style
//! configuration, group colors, seeded jitter, a renderer-agnostic scene
//! model, and its SVG rendering through `plotters`.
//!
//! # Architecture
//!
//! ```text
//! Layer 8: API
//!   ↓
//! Layer 7: Adapters
//!   ↓
//! Layer 6: Render ← You are here
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

/// Plot configuration.
pub mod style;

/// Colors and palettes.
pub mod palette;

/// Scatter jitter.
pub mod jitter;

/// Scene model.
pub mod figure;

/// SVG rendering.
pub mod svg;

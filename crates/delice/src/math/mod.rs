//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions: descriptive statistics,
//! Student's t tail probabilities, and kernel density estimation. Nothing here
//! knows about groups, pairs, or figures.
//!
//! # Architecture
//!
//! ```text
//! Layer 8: API
//!   ↓
//! Layer 7: Adapters
//!   ↓
//! Layer 6: Render
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Mean, variance, and quantiles.
pub mod descriptive;

/// Student's t distribution.
pub mod distribution;

/// Kernel density estimation.
pub mod density;

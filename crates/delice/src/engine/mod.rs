//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the annotation run by coordinating between
//! primitives (groups, errors) and algorithms (pairs, tests, tiers).
//! It also stacks the resulting brackets above a plot's y-limits.
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
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Execution engine for pairwise annotation.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for annotation runs.
pub mod output;

/// Bracket stacking.
pub mod layout;

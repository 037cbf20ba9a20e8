//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data structures every other layer works on: the
//! named-column data frame, the grouped observation set, and the shared error
//! type. It has zero internal dependencies within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Named-column data frame.
pub mod frame;

/// Observation sets and group ordering.
pub mod groups;

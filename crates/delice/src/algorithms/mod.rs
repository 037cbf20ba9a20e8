//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the comparison procedure piece by piece: pair
//! enumeration, the t-test, the multiple-comparison correction, and the
//! significance tiers.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pair enumeration.
pub mod pairs;

/// Two-sample t-tests.
pub mod ttest;

/// p-value correction.
pub mod correction;

/// Significance tiers.
pub mod tier;

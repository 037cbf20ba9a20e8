//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns groups and test outcomes into reportable records: group
//! summaries, comparison records, and the observer hook that reports them.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Group summaries and comparison records.
pub mod summary;

/// Reporting observers.
pub mod observer;

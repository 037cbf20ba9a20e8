//! Error types for significance annotation and plot construction.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while building an
//! observation set, running pairwise comparisons, and assembling a figure.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending column, group, or value.
//! * **Deferred**: Builder misconfiguration is stored and surfaced by `build()`.
//! * **Explicit**: Conditions the plotting layer used to swallow (an
//!   unorderable group column) are reported as their own variant.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Missing columns, mismatched lengths, non-finite values.
//! 2. **Group validation**: Unknown labels, empty groups, too few groups.
//! 3. **Test validity**: Too few observations or an undefined t statistic.
//! 4. **Styling**: Unknown palettes, malformed colors, invalid parameters.
//! 5. **Output**: Drawing backend failures and file writes.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for `delice` operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliceError {
    /// The data frame has no rows.
    EmptyInput,

    /// No column with the requested name exists.
    ColumnNotFound(String),

    /// The column exists but holds the wrong kind of data.
    ColumnTypeMismatch {
        /// Name of the column.
        column: String,
        /// Kind of column the operation needed ("numeric" or "categorical").
        expected: &'static str,
    },

    /// A column was added whose length differs from the frame's row count.
    MismatchedColumnLength {
        /// Name of the column.
        column: String,
        /// Length of the column.
        got: usize,
        /// Row count of the frame.
        expected: usize,
    },

    /// A column with the same name is already present.
    DuplicateColumn(String),

    /// A value column contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Sorting was requested on a column without a total order (NaN keys).
    UnorderableColumn(String),

    /// An explicitly requested group label does not occur in the data.
    GroupNotFound(String),

    /// Fewer distinct groups than the operation requires.
    TooFewGroups {
        /// Number of groups found.
        got: usize,
        /// Minimum number of groups.
        min: usize,
    },

    /// Two groups share the same label.
    DuplicateGroup(String),

    /// A group selected for comparison has no observations.
    EmptyGroup(String),

    /// A group has too few observations for the selected t-test.
    TooFewObservations {
        /// Label of the group.
        group: String,
        /// Number of observations in the group.
        got: usize,
        /// Minimum number of observations.
        min: usize,
    },

    /// The t statistic is undefined (zero variance and equal means).
    DegenerateComparison {
        /// Label of the first group of the pair.
        first: String,
        /// Label of the second group of the pair.
        second: String,
    },

    /// The t distribution could not be constructed for these degrees of freedom.
    InvalidDegreesOfFreedom(f64),

    /// No palette with this name is known.
    UnknownPalette(String),

    /// A color string could not be parsed.
    InvalidColor(String),

    /// The explicit color list is shorter than the number of groups.
    InsufficientColors {
        /// Number of colors supplied.
        got: usize,
        /// Number of groups to color.
        needed: usize,
    },

    /// A styling or layout parameter is out of range.
    InvalidParameter {
        /// Name of the parameter.
        parameter: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// The drawing backend rejected the figure.
    Render(String),

    /// Writing a rendered figure failed.
    Io(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for DeliceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input data frame is empty"),
            Self::ColumnNotFound(name) => write!(f, "Column not found: '{name}'"),
            Self::ColumnTypeMismatch { column, expected } => {
                write!(f, "Column '{column}' is not {expected}")
            }
            Self::MismatchedColumnLength {
                column,
                got,
                expected,
            } => {
                write!(
                    f,
                    "Length mismatch: column '{column}' has {got} rows, frame has {expected}"
                )
            }
            Self::DuplicateColumn(name) => write!(f, "Column '{name}' already exists"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::UnorderableColumn(name) => {
                write!(f, "Column '{name}' cannot be sorted: it contains NaN keys")
            }
            Self::GroupNotFound(label) => write!(f, "Group not found: '{label}'"),
            Self::TooFewGroups { got, min } => {
                write!(f, "Too few groups: got {got}, need at least {min}")
            }
            Self::DuplicateGroup(label) => write!(f, "Duplicate group label: '{label}'"),
            Self::EmptyGroup(label) => write!(f, "Group '{label}' has no observations"),
            Self::TooFewObservations { group, got, min } => {
                write!(
                    f,
                    "Too few observations in group '{group}': got {got}, need at least {min}"
                )
            }
            Self::DegenerateComparison { first, second } => {
                write!(
                    f,
                    "Undefined t statistic for '{first}' x '{second}': both groups have zero variance and equal means"
                )
            }
            Self::InvalidDegreesOfFreedom(df) => {
                write!(f, "Invalid degrees of freedom: {df} (must be > 0)")
            }
            Self::UnknownPalette(name) => write!(f, "Unknown palette: '{name}'"),
            Self::InvalidColor(s) => write!(f, "Invalid color: '{s}'"),
            Self::InsufficientColors { got, needed } => {
                write!(f, "Too few colors: got {got}, need {needed} (one per group)")
            }
            Self::InvalidParameter { parameter, value } => {
                write!(f, "Invalid {parameter}: {value}")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::Render(msg) => write!(f, "Rendering failed: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for DeliceError {}

impl From<std::io::Error> for DeliceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

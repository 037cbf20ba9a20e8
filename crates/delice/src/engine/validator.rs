//! Input validation for annotation runs and plot configuration.
//!
//! ## Purpose
//!
//! This module checks observation sets and styling parameters before any
//! statistics or geometry are computed.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not run the t-tests; their own preconditions are
//!   checked where they are computed.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::DeliceError;
use crate::primitives::groups::ObservationSet;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for observation sets and parameters.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate an observation set before annotation.
    pub fn validate_observations<T: Float>(set: &ObservationSet<T>) -> Result<(), DeliceError> {
        // Check 1: At least one group
        if set.is_empty() {
            return Err(DeliceError::EmptyInput);
        }

        // Check 2: Unique labels
        for (i, g) in set.groups.iter().enumerate() {
            if set.groups[..i].iter().any(|h| h.label == g.label) {
                return Err(DeliceError::DuplicateGroup(g.label.clone()));
            }
        }

        // Check 3: All values finite
        for g in &set.groups {
            if let Some((i, v)) = g.values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(DeliceError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    g.label,
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    /// Require at least `min` groups.
    pub fn validate_group_count<T: Float>(set: &ObservationSet<T>, min: usize) -> Result<(), DeliceError> {
        if set.len() < min {
            return Err(DeliceError::TooFewGroups { got: set.len(), min });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Require a finite, strictly positive parameter.
    pub fn validate_positive(value: f64, parameter: &'static str) -> Result<(), DeliceError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DeliceError::InvalidParameter { parameter, value });
        }
        Ok(())
    }

    /// Require a finite, non-negative parameter.
    pub fn validate_non_negative(value: f64, parameter: &'static str) -> Result<(), DeliceError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DeliceError::InvalidParameter { parameter, value });
        }
        Ok(())
    }

    /// Surface a duplicate builder parameter, if one was recorded.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> Result<(), DeliceError> {
        match duplicate {
            Some(parameter) => Err(DeliceError::DuplicateParameter { parameter }),
            None => Ok(()),
        }
    }
}

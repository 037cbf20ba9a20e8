//! Vertical stacking of significance brackets.
//!
//! ## Purpose
//!
//! This module turns the ordered comparison list into drawable brackets
//! stacked above the current y-limits, the outermost pair highest.
//!
//! ## Key concepts
//!
//! For the retained entry at index `i` of a list of length `len`, with
//! `(bottom, top)` the y-limits and `range = top - bottom`:
//!
//! ```text
//! level  = len - i
//! height = range * level_step * level + top + offset
//! tip    = height - range * tip_fraction
//! text_y = height + range * text_gap
//! ```
//!
//! Only significant entries produce a bracket, but every retained entry
//! consumes its level.
//!
//! ## Invariants
//!
//! * Bracket heights strictly decrease along the list when `range > 0`.
//! * Tips hang below the bar; the symbol sits above it.
//!
//! ## Non-goals
//!
//! * This module does not resolve overlaps between brackets.

// Internal dependencies
use crate::engine::validator::Validator;
use crate::evaluation::summary::Comparison;
use crate::primitives::errors::DeliceError;

// ============================================================================
// Bracket Geometry
// ============================================================================

/// One drawable significance bracket.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bracket {
    /// Label of the left group.
    pub first_label: String,

    /// Label of the right group.
    pub second_label: String,

    /// x coordinate of the left end.
    pub x1: f64,

    /// x coordinate of the right end.
    pub x2: f64,

    /// y coordinate of the horizontal bar.
    pub height: f64,

    /// y coordinate of the lower ends of the vertical tips.
    pub tip: f64,

    /// Baseline of the symbol text.
    pub text_y: f64,

    /// Tier symbol drawn above the bar.
    pub symbol: String,

    /// Stacking level (1 is the lowest).
    pub level: usize,
}

impl Bracket {
    /// Horizontal center, where the symbol is drawn.
    #[inline]
    pub fn center(&self) -> f64 {
        (self.x1 + self.x2) * 0.5
    }

    /// Polyline through both tips and the bar.
    pub fn path(&self) -> [(f64, f64); 4] {
        [
            (self.x1, self.tip),
            (self.x1, self.height),
            (self.x2, self.height),
            (self.x2, self.tip),
        ]
    }
}

// ============================================================================
// Layout Parameters
// ============================================================================

/// Stacking parameters, expressed as fractions of the visible y-range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BracketLayout {
    /// Height added per stacking level.
    pub level_step: f64,

    /// Absolute offset above the top limit (data units).
    pub offset: f64,

    /// Length of the bracket tips.
    pub tip_fraction: f64,

    /// Gap between the bar and the symbol.
    pub text_gap: f64,
}

impl Default for BracketLayout {
    fn default() -> Self {
        Self {
            level_step: 0.2,
            offset: 0.4,
            tip_fraction: 0.02,
            text_gap: 0.01,
        }
    }
}

impl BracketLayout {
    /// Compact stacking used by faceted plots.
    pub fn compact() -> Self {
        Self {
            level_step: 0.07,
            ..Self::default()
        }
    }

    /// Check that every parameter is finite and non-negative.
    pub fn validate(&self) -> Result<(), DeliceError> {
        Validator::validate_non_negative(self.level_step, "level_step")?;
        Validator::validate_non_negative(self.offset, "bracket_offset")?;
        Validator::validate_non_negative(self.tip_fraction, "tip_fraction")?;
        Validator::validate_non_negative(self.text_gap, "text_gap")
    }

    /// Place brackets for `comparisons`.
    ///
    /// `x_of` maps a 0-based group index to its x coordinate.
    pub fn place<F>(&self, comparisons: &[Comparison], x_of: F, limits: (f64, f64)) -> Vec<Bracket>
    where
        F: Fn(usize) -> f64,
    {
        let (bottom, top) = limits;
        let range = top - bottom;
        let len = comparisons.len();

        comparisons
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_significant())
            .map(|(i, c)| {
                let level = len - i;
                let height = range * self.level_step * level as f64 + top + self.offset;
                let bracket = Bracket {
                    first_label: c.first_label.clone(),
                    second_label: c.second_label.clone(),
                    x1: x_of(c.pair.first),
                    x2: x_of(c.pair.second),
                    height,
                    tip: height - range * self.tip_fraction,
                    text_y: height + range * self.text_gap,
                    symbol: c.symbol().to_string(),
                    level,
                };
                tracing::trace!(
                    first = %bracket.first_label,
                    second = %bracket.second_label,
                    level,
                    height,
                    "placed bracket"
                );
                bracket
            })
            .collect()
    }
}

/// Highest y coordinate reached by any bracket, symbol included.
pub fn upper_extent(brackets: &[Bracket]) -> Option<f64> {
    brackets.iter().map(|b| b.text_y).reduce(f64::max)
}

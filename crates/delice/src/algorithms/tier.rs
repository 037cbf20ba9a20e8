//! Significance tiers and their bracket symbols.

// External dependencies
use core::fmt::{Display, Formatter, Result};

/// Adjusted p-value below which a comparison is `***`.
pub const THRESHOLD_EXTREME: f64 = 0.001;

/// Adjusted p-value below which a comparison is `**`.
pub const THRESHOLD_STRONG: f64 = 0.01;

/// Adjusted p-value below which a comparison is `*`.
pub const THRESHOLD_SIGNIFICANT: f64 = 0.05;

/// Ordinal classification of an adjusted p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignificanceTier {
    /// `p >= 0.05` (and NaN).
    NotSignificant,

    /// `0.01 <= p < 0.05`.
    Significant,

    /// `0.001 <= p < 0.01`.
    Strong,

    /// `p < 0.001`.
    Extreme,
}

impl SignificanceTier {
    /// Classify an adjusted p-value.
    pub fn from_p_value(p: f64) -> Self {
        if p < THRESHOLD_EXTREME {
            Self::Extreme
        } else if p < THRESHOLD_STRONG {
            Self::Strong
        } else if p < THRESHOLD_SIGNIFICANT {
            Self::Significant
        } else {
            Self::NotSignificant
        }
    }

    /// Symbol drawn above the bracket.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Extreme => "***",
            Self::Strong => "**",
            Self::Significant => "*",
            Self::NotSignificant => "ns",
        }
    }

    /// Whether a bracket is drawn for this tier.
    #[inline]
    pub const fn is_significant(&self) -> bool {
        !matches!(self, Self::NotSignificant)
    }
}

impl Display for SignificanceTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.symbol())
    }
}

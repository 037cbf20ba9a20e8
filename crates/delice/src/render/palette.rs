//! Colors and named sequential palettes.
//!
//! ## Purpose
//!
//! This module parses user-supplied colors and samples the sequential
//! colormaps used to tint groups.
//!
//! ## Key concepts
//!
//! A palette is a piecewise-linear ramp through nine control colors. Sampling
//! `n` colors picks the interior stops `k / (n + 1)` for `k = 1..=n`, so
//! neither the near-white start nor the darkest end is used.
//!
//! ## Non-goals
//!
//! * Qualitative or diverging palettes.
//! * Alpha channels.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;

// Internal dependencies
use crate::primitives::errors::DeliceError;

// ============================================================================
// Color
// ============================================================================

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Red, used for violin mean lines.
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        }
    }

    /// Look up a basic color name.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" | "k" => Self::BLACK,
            "white" | "w" => Self::WHITE,
            "red" | "r" => Self::RED,
            "green" | "g" => Self::rgb(0, 128, 0),
            "blue" | "b" => Self::rgb(0, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "pink" => Self::rgb(255, 192, 203),
            _ => return None,
        };
        Some(color)
    }

    /// Parse a hex string or a basic color name.
    pub fn parse(s: &str) -> Result<Self, DeliceError> {
        let s = s.trim();
        let parsed = if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s).or_else(|| Self::from_hex(s))
        };
        parsed.ok_or_else(|| DeliceError::InvalidColor(s.to_string()))
    }

    /// CSS hex form, e.g. `#df65b0`.
    pub fn to_css_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_css_hex())
    }
}

impl FromStr for Color {
    type Err = DeliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Palettes
// ============================================================================

/// Named sequential palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Purple to red.
    PuRd,
    /// Light to dark blue.
    Blues,
    /// Light to dark green.
    Greens,
    /// White to black.
    Greys,
    /// Light to dark orange.
    Oranges,
    /// Light to dark purple.
    Purples,
    /// Light to dark red.
    Reds,
}

const PURD: [Color; 9] = [
    Color::rgb(0xf7, 0xf4, 0xf9),
    Color::rgb(0xe7, 0xe1, 0xef),
    Color::rgb(0xd4, 0xb9, 0xda),
    Color::rgb(0xc9, 0x94, 0xc7),
    Color::rgb(0xdf, 0x65, 0xb0),
    Color::rgb(0xe7, 0x29, 0x8a),
    Color::rgb(0xce, 0x12, 0x56),
    Color::rgb(0x98, 0x00, 0x43),
    Color::rgb(0x67, 0x00, 0x1f),
];

const BLUES: [Color; 9] = [
    Color::rgb(0xf7, 0xfb, 0xff),
    Color::rgb(0xde, 0xeb, 0xf7),
    Color::rgb(0xc6, 0xdb, 0xef),
    Color::rgb(0x9e, 0xca, 0xe1),
    Color::rgb(0x6b, 0xae, 0xd6),
    Color::rgb(0x42, 0x92, 0xc6),
    Color::rgb(0x21, 0x71, 0xb5),
    Color::rgb(0x08, 0x51, 0x9c),
    Color::rgb(0x08, 0x30, 0x6b),
];

const GREENS: [Color; 9] = [
    Color::rgb(0xf7, 0xfc, 0xf5),
    Color::rgb(0xe5, 0xf5, 0xe0),
    Color::rgb(0xc7, 0xe9, 0xc0),
    Color::rgb(0xa1, 0xd9, 0x9b),
    Color::rgb(0x74, 0xc4, 0x76),
    Color::rgb(0x41, 0xab, 0x5d),
    Color::rgb(0x23, 0x8b, 0x45),
    Color::rgb(0x00, 0x6d, 0x2c),
    Color::rgb(0x00, 0x44, 0x1b),
];

const GREYS: [Color; 9] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0xf0, 0xf0, 0xf0),
    Color::rgb(0xd9, 0xd9, 0xd9),
    Color::rgb(0xbd, 0xbd, 0xbd),
    Color::rgb(0x96, 0x96, 0x96),
    Color::rgb(0x73, 0x73, 0x73),
    Color::rgb(0x52, 0x52, 0x52),
    Color::rgb(0x25, 0x25, 0x25),
    Color::rgb(0x00, 0x00, 0x00),
];

const ORANGES: [Color; 9] = [
    Color::rgb(0xff, 0xf5, 0xeb),
    Color::rgb(0xfe, 0xe6, 0xce),
    Color::rgb(0xfd, 0xd0, 0xa2),
    Color::rgb(0xfd, 0xae, 0x6b),
    Color::rgb(0xfd, 0x8d, 0x3c),
    Color::rgb(0xf1, 0x69, 0x13),
    Color::rgb(0xd9, 0x48, 0x01),
    Color::rgb(0xa6, 0x36, 0x03),
    Color::rgb(0x7f, 0x27, 0x04),
];

const PURPLES: [Color; 9] = [
    Color::rgb(0xfc, 0xfb, 0xfd),
    Color::rgb(0xef, 0xed, 0xf5),
    Color::rgb(0xda, 0xda, 0xeb),
    Color::rgb(0xbc, 0xbd, 0xdc),
    Color::rgb(0x9e, 0x9a, 0xc8),
    Color::rgb(0x80, 0x7d, 0xba),
    Color::rgb(0x6a, 0x51, 0xa3),
    Color::rgb(0x54, 0x27, 0x8f),
    Color::rgb(0x3f, 0x00, 0x7d),
];

const REDS: [Color; 9] = [
    Color::rgb(0xff, 0xf5, 0xf0),
    Color::rgb(0xfe, 0xe0, 0xd2),
    Color::rgb(0xfc, 0xbb, 0xa1),
    Color::rgb(0xfc, 0x92, 0x72),
    Color::rgb(0xfb, 0x6a, 0x4a),
    Color::rgb(0xef, 0x3b, 0x2c),
    Color::rgb(0xcb, 0x18, 0x1d),
    Color::rgb(0xa5, 0x0f, 0x15),
    Color::rgb(0x67, 0x00, 0x0d),
];

impl Palette {
    /// All known palettes.
    pub const ALL: [Palette; 7] = [
        Palette::PuRd,
        Palette::Blues,
        Palette::Greens,
        Palette::Greys,
        Palette::Oranges,
        Palette::Purples,
        Palette::Reds,
    ];

    /// Look up a palette by name (case-sensitive, as matplotlib names them).
    pub fn from_name(name: &str) -> Result<Self, DeliceError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| DeliceError::UnknownPalette(name.to_string()))
    }

    /// Name of the palette.
    pub const fn name(&self) -> &'static str {
        match self {
            Palette::PuRd => "PuRd",
            Palette::Blues => "Blues",
            Palette::Greens => "Greens",
            Palette::Greys => "Greys",
            Palette::Oranges => "Oranges",
            Palette::Purples => "Purples",
            Palette::Reds => "Reds",
        }
    }

    fn stops(&self) -> &'static [Color; 9] {
        match self {
            Palette::PuRd => &PURD,
            Palette::Blues => &BLUES,
            Palette::Greens => &GREENS,
            Palette::Greys => &GREYS,
            Palette::Oranges => &ORANGES,
            Palette::Purples => &PURPLES,
            Palette::Reds => &REDS,
        }
    }

    /// Color at position `t` in `[0, 1]` along the ramp.
    pub fn at(&self, t: f64) -> Color {
        let stops = self.stops();
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(&stops[i + 1], scaled - i as f64)
    }

    /// `n` colors at the interior stops of the ramp.
    pub fn sample(&self, n: usize) -> Vec<Color> {
        (1..=n).map(|k| self.at(k as f64 / (n + 1) as f64)).collect()
    }
}

// ============================================================================
// Group Colors
// ============================================================================

/// Resolve one color per group: the explicit list if given, else the palette.
pub fn group_colors(
    palette: &str,
    explicit: Option<&[String]>,
    n: usize,
) -> Result<Vec<Color>, DeliceError> {
    match explicit {
        Some(colors) => {
            if colors.len() < n {
                return Err(DeliceError::InsufficientColors {
                    got: colors.len(),
                    needed: n,
                });
            }
            colors.iter().take(n).map(|c| Color::parse(c)).collect()
        }
        None => Ok(Palette::from_name(palette)?.sample(n)),
    }
}

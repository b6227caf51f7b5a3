// crates/design-resolver-core/src/core/color.rs
// ============================================================================
// Module: Design Resolver Colors
// Description: sRGB color values and perceptual color distance.
// Purpose: Compare requested colors with inventory and document colors.
// Dependencies: palette, serde, thiserror
// ============================================================================

//! ## Overview
//! Colors travel through the resolver as `#RRGGBB` hex strings and are parsed
//! into [`Rgb`] at the boundary. Distance between two colors is the CIEDE2000
//! difference computed in CIE L*a*b* (D65), where one unit is roughly the
//! smallest difference a person can notice.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use palette::FromColor;
use palette::Lab;
use palette::Srgb;
use palette::color_difference::Ciede2000;
use palette::white_point::D65;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing a color literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Input is not a 3- or 6-digit hex color.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

// ============================================================================
// SECTION: Rgb
// ============================================================================

/// Opaque 8-bit sRGB color.
///
/// # Invariants
/// - Serializes as an uppercase `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
        }
    }

    /// Parses `#RGB`, `#RRGGBB`, or the same forms without the leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] for any other input.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ColorParseError::InvalidHex(input.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0 .. 2)?, channel(2 .. 4)?, channel(4 .. 6)?))
    }

    /// Returns the uppercase `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts to CIE L*a*b* under the D65 white point.
    fn to_lab(self) -> Lab<D65, f32> {
        let srgb = Srgb::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        );
        Lab::from_color(srgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

// ============================================================================
// SECTION: Perceptual Distance
// ============================================================================

/// Returns the CIEDE2000 difference between two colors.
///
/// The result is symmetric, zero for identical colors, and roughly 100 for
/// black versus white.
#[must_use]
pub fn perceptual_distance(a: Rgb, b: Rgb) -> f64 {
    if a == b {
        return 0.0;
    }
    f64::from(a.to_lab().difference(b.to_lab()))
}

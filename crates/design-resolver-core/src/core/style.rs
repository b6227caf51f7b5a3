// crates/design-resolver-core/src/core/style.rs
// ============================================================================
// Module: Design Resolver Style Properties
// Description: Monitored style properties and their values.
// Purpose: Give every source of a style value (component, preset, request,
// default) one shared vocabulary.
// Dependencies: crate::core::color, serde
// ============================================================================

//! ## Overview
//! The conflict resolver compares values for a fixed set of monitored
//! properties. Component-inherent values, user presets, request values, and
//! system defaults are all expressed as a [`StyleTable`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::color::Rgb;

// ============================================================================
// SECTION: Monitored Properties
// ============================================================================

/// Style property monitored for cross-source conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoredProperty {
    /// Height in pixels.
    Height,
    /// Width in pixels.
    Width,
    /// Uniform padding in pixels.
    Padding,
    /// Spacing between children in pixels.
    ItemSpacing,
    /// Fill color.
    Fill,
    /// Stroke color.
    Stroke,
    /// Corner radius in pixels.
    CornerRadius,
    /// Font size in pixels.
    FontSize,
}

impl MonitoredProperty {
    /// All monitored properties in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Height,
        Self::Width,
        Self::Padding,
        Self::ItemSpacing,
        Self::Fill,
        Self::Stroke,
        Self::CornerRadius,
        Self::FontSize,
    ];

    /// Returns a stable label for the property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Width => "width",
            Self::Padding => "padding",
            Self::ItemSpacing => "item_spacing",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::CornerRadius => "corner_radius",
            Self::FontSize => "font_size",
        }
    }

    /// Returns true when the property holds a color.
    #[must_use]
    pub const fn is_color(self) -> bool {
        matches!(self, Self::Fill | Self::Stroke)
    }
}

impl fmt::Display for MonitoredProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Property Values
// ============================================================================

/// Concrete value of a monitored property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Pixel dimension.
    Number(f64),
    /// Color.
    Color(Rgb),
}

impl PropertyValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Color(_) => None,
        }
    }

    /// Returns the color value, if any.
    #[must_use]
    pub const fn as_color(&self) -> Option<Rgb> {
        match self {
            Self::Number(_) => None,
            Self::Color(color) => Some(*color),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Color(color) => color.fmt(f),
        }
    }
}

/// Table of monitored property values from one source.
pub type StyleTable = BTreeMap<MonitoredProperty, PropertyValue>;

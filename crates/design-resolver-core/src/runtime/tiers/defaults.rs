// crates/design-resolver-core/src/runtime/tiers/defaults.rs
// ============================================================================
// Module: Tier 5 System Defaults
// Description: Fixed palette, spacing, and radius table.
// Purpose: Terminal tier that always produces a buildable container.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! The default table is the last resort and the priority-4 conflict source.
//! Literal values the node declares are kept; everything else comes from the
//! table. The tier always accepts at confidence 0.30 with a warning.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContainerStyling;
use crate::core::Instructions;
use crate::core::MonitoredProperty;
use crate::core::PropertyValue;
use crate::core::ResolutionWarning;
use crate::core::Rgb;
use crate::core::StyleBinding;
use crate::core::StyleTable;
use crate::core::WarningCategory;
use crate::runtime::conflict::request_table;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;

// ============================================================================
// SECTION: Defaults Table
// ============================================================================

/// Fixed confidence of the default tier.
pub const SYSTEM_DEFAULT_CONFIDENCE: f64 = 0.30;

/// Fixed values used when nothing better is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemDefaults {
    /// Container fill.
    pub fill: Rgb,
    /// Container stroke.
    pub stroke: Rgb,
    /// Text color.
    pub text_color: Rgb,
    /// Padding in pixels.
    pub padding: f64,
    /// Item spacing in pixels.
    pub item_spacing: f64,
    /// Corner radius in pixels.
    pub corner_radius: f64,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            fill: Rgb::new(0xFF, 0xFF, 0xFF),
            stroke: Rgb::new(0xE0, 0xE0, 0xE0),
            text_color: Rgb::new(0x1A, 0x1A, 0x1A),
            padding: 16.0,
            item_spacing: 8.0,
            corner_radius: 8.0,
            font_size: 14.0,
        }
    }
}

impl SystemDefaults {
    /// Returns the defaults as a monitored-property table.
    #[must_use]
    pub fn style_table(&self) -> StyleTable {
        StyleTable::from([
            (MonitoredProperty::Padding, PropertyValue::Number(self.padding)),
            (MonitoredProperty::ItemSpacing, PropertyValue::Number(self.item_spacing)),
            (MonitoredProperty::Fill, PropertyValue::Color(self.fill)),
            (MonitoredProperty::Stroke, PropertyValue::Color(self.stroke)),
            (MonitoredProperty::CornerRadius, PropertyValue::Number(self.corner_radius)),
            (MonitoredProperty::FontSize, PropertyValue::Number(self.font_size)),
        ])
    }
}

// ============================================================================
// SECTION: Tier
// ============================================================================

/// Produces the default container; never declines.
#[must_use]
pub fn attempt(ctx: &TierContext<'_>) -> TierAcceptance {
    let node = ctx.node;
    let defaults = &ctx.config.defaults;
    let mut table = defaults.style_table();
    table.extend(request_table(node));

    let styling = ContainerStyling {
        properties: table
            .into_iter()
            .map(|(property, value)| {
                (
                    property,
                    StyleBinding::Raw {
                        value,
                    },
                )
            })
            .collect(),
        text_color: node.text.as_ref().map(|_| StyleBinding::Raw {
            value: PropertyValue::Color(defaults.text_color),
        }),
    };
    TierAcceptance {
        confidence: SYSTEM_DEFAULT_CONFIDENCE,
        instructions: Instructions::Construct {
            role: node.role.clone(),
            styling,
            text: node.text.clone(),
        },
        warnings: vec![ResolutionWarning::new(
            WarningCategory::SystemDefault,
            format!(
                "no design-system match for `{}`; using system defaults disconnected from the design system",
                node.role
            ),
        )],
        component: None,
    }
}

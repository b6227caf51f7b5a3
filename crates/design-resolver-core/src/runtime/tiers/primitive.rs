// crates/design-resolver-core/src/runtime/tiers/primitive.rs
// ============================================================================
// Module: Tier 4 Primitive Frequency Fallback
// Description: Containers styled with the nearest frequently used raw values.
// Purpose: Stay visually consistent with the document when tokens are missing.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Every literal color, spacing, and radius the node declares is replaced by
//! the document value with the smallest frequency-weighted distance. Per
//! property confidence comes from the distance band plus frequency bonuses;
//! the tier confidence is the mean over matched properties.

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
use crate::core::WarningCategory;
use crate::core::summary::count_to_f64;
use crate::runtime::frequency::FrequencyMaps;
use crate::runtime::frequency::NearestValue;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;

// ============================================================================
// SECTION: Confidence
// ============================================================================

/// Usage count at which a value counts as common.
const COMMON_FREQUENCY: u32 = 20;
/// Share above which the most frequent value earns the larger bonus.
const DOMINANT_SHARE: f64 = 0.5;

/// Base confidence of a color match by perceptual distance.
#[must_use]
pub fn color_confidence(distance: f64) -> f64 {
    if distance < 2.0 {
        0.80
    } else if distance < 5.0 {
        0.60
    } else {
        0.40
    }
}

/// Base confidence of a spacing or radius match by absolute difference.
#[must_use]
pub fn dimension_confidence(distance: f64) -> f64 {
    if distance == 0.0 {
        0.90
    } else if distance <= 4.0 {
        0.70
    } else if distance <= 8.0 {
        0.50
    } else {
        0.30
    }
}

/// Adds the frequency bonuses to a base confidence.
///
/// Common values earn 0.05; the single most frequent value earns another 0.05,
/// or 0.10 when it holds at least half of all observations.
#[must_use]
pub fn with_frequency_bonus<T>(base: f64, nearest: &NearestValue<T>) -> f64 {
    let mut confidence = base;
    if nearest.frequency >= COMMON_FREQUENCY {
        confidence += 0.05;
    }
    if nearest.most_frequent {
        confidence += if nearest.share >= DOMINANT_SHARE { 0.10 } else { 0.05 };
    }
    confidence.clamp(0.0, 1.0)
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Literal value the node needs approximated.
#[derive(Debug, Clone, Copy)]
enum Needed {
    /// Color property.
    Color(MonitoredProperty, Rgb),
    /// Spacing property (padding or item spacing).
    Spacing(MonitoredProperty, f64),
    /// Corner radius.
    Radius(f64),
}

/// One approximated property.
struct Approximation {
    /// Property approximated.
    property: MonitoredProperty,
    /// Chosen document value.
    value: PropertyValue,
    /// Per-property confidence.
    confidence: f64,
    /// Raw distance to the requested value.
    distance: f64,
    /// Usage count of the chosen value.
    frequency: u32,
}

/// Finds the document value for one needed property.
fn approximate(maps: &FrequencyMaps, needed: Needed, ceiling: f64) -> Option<Approximation> {
    match needed {
        Needed::Color(property, color) => maps.nearest_color(color, ceiling).map(|nearest| Approximation {
            property,
            value: PropertyValue::Color(nearest.value),
            confidence: with_frequency_bonus(color_confidence(nearest.distance), &nearest),
            distance: nearest.distance,
            frequency: nearest.frequency,
        }),
        Needed::Spacing(property, value) => maps.nearest_spacing(value).map(|nearest| Approximation {
            property,
            value: PropertyValue::Number(f64::from(nearest.value)),
            confidence: with_frequency_bonus(dimension_confidence(nearest.distance), &nearest),
            distance: nearest.distance,
            frequency: nearest.frequency,
        }),
        Needed::Radius(value) => maps.nearest_radius(value).map(|nearest| Approximation {
            property: MonitoredProperty::CornerRadius,
            value: PropertyValue::Number(f64::from(nearest.value)),
            confidence: with_frequency_bonus(dimension_confidence(nearest.distance), &nearest),
            distance: nearest.distance,
            frequency: nearest.frequency,
        }),
    }
}

/// Returns the requested literal for a needed property.
const fn requested_value(needed: Needed) -> (MonitoredProperty, PropertyValue) {
    match needed {
        Needed::Color(property, color) => (property, PropertyValue::Color(color)),
        Needed::Spacing(property, value) => (property, PropertyValue::Number(value)),
        Needed::Radius(value) => (MonitoredProperty::CornerRadius, PropertyValue::Number(value)),
    }
}

// ============================================================================
// SECTION: Tier
// ============================================================================

/// Attempts a primitive frequency approximation.
#[must_use]
pub fn attempt(ctx: &TierContext<'_>) -> Option<TierAcceptance> {
    let node = ctx.node;
    let needed: Vec<Needed> = [
        node.literal_fill().map(|color| Needed::Color(MonitoredProperty::Fill, color)),
        node.literal_stroke().map(|color| Needed::Color(MonitoredProperty::Stroke, color)),
        node.literal_padding().map(|value| Needed::Spacing(MonitoredProperty::Padding, value)),
        node.literal_item_spacing().map(|value| Needed::Spacing(MonitoredProperty::ItemSpacing, value)),
        node.literal_corner_radius().map(Needed::Radius),
    ]
    .into_iter()
    .flatten()
    .collect();
    if needed.is_empty() {
        return None;
    }

    let maps = ctx.scanner.maps_for(ctx.document);
    let mut styling = ContainerStyling::default();
    let mut warnings = Vec::new();
    let mut confidences = Vec::new();
    for item in needed {
        let (property, requested) = requested_value(item);
        let Some(found) = approximate(&maps, item, ctx.config.color_distance_ceiling) else {
            warnings.push(ResolutionWarning::new(
                WarningCategory::Approximation,
                format!("no document value close to {property} {requested}"),
            ));
            continue;
        };
        if found.distance > 0.0 {
            warnings.push(ResolutionWarning::new(
                WarningCategory::Approximation,
                format!(
                    "{property} {requested} approximated by document value {} (distance {:.2}, used {}x)",
                    found.value, found.distance, found.frequency
                ),
            ));
        }
        styling.properties.insert(
            found.property,
            StyleBinding::Raw {
                value: found.value,
            },
        );
        confidences.push(found.confidence);
    }
    if confidences.is_empty() {
        return None;
    }

    let confidence = confidences.iter().sum::<f64>() / count_to_f64(confidences.len());
    if confidence < ctx.config.tier4_min_confidence {
        return None;
    }
    Some(TierAcceptance {
        confidence,
        instructions: Instructions::Construct {
            role: node.role.clone(),
            styling,
            text: node.text.clone(),
        },
        warnings,
        component: None,
    })
}

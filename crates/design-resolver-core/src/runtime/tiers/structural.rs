// crates/design-resolver-core/src/runtime/tiers/structural.rs
// ============================================================================
// Module: Tier 2 Structural Match
// Description: Structurally similar components with safety-checked overrides.
// Purpose: Reuse a flexible component when no role-matched one fits.
// Dependencies: crate::{core, runtime}, tracing
// ============================================================================

//! ## Overview
//! Components sharing the node's layout mode are scored 0-100:
//!
//! | Signal | Points |
//! |---|---|
//! | layout mode match | 40 |
//! | both axes aligned (one axis: 15) | 30 |
//! | flexible name (`base`, `slot`, `template`, `container`, `generic`) | 20 |
//! | fewer than five descendants | 10 |
//!
//! An axis the node leaves unspecified counts as aligned. The three best
//! candidates are tried in score order (ties keep inventory order); the first
//! whose overrides pass every safety check is accepted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::AxisAlign;
use crate::core::ComponentDescriptor;
use crate::core::Instructions;
use crate::core::MonitoredProperty;
use crate::core::PropertyValue;
use crate::core::ResolutionTier;
use crate::core::ResolutionWarning;
use crate::core::TargetNode;
use crate::core::WarningCategory;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name fragments marking a component as designed for reuse.
const FLEXIBLE_KEYWORDS: [&str; 5] = ["base", "slot", "template", "container", "generic"];
/// Number of ranked candidates tried.
const MAX_CANDIDATES: usize = 3;
/// Descendant count below which a component counts as simple.
const SIMPLE_DESCENDANTS: usize = 5;

// ============================================================================
// SECTION: Scoring
// ============================================================================

/// Returns the 0-100 structural score of a component for a node.
#[must_use]
pub fn structural_score(node: &TargetNode, component: &ComponentDescriptor) -> u32 {
    let anatomy = &component.anatomy;
    let mut score = 0;
    if anatomy.layout_mode == node.layout.mode {
        score += 40;
    }
    let primary = axis_matches(node.layout.primary_align, anatomy.primary_align);
    let counter = axis_matches(node.layout.counter_align, anatomy.counter_align);
    score += match (primary, counter) {
        (true, true) => 30,
        (true, false) | (false, true) => 15,
        (false, false) => 0,
    };
    let name = component.name.to_ascii_lowercase();
    if FLEXIBLE_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
        score += 20;
    }
    if anatomy.descendant_count < SIMPLE_DESCENDANTS {
        score += 10;
    }
    score
}

/// Returns true when the node leaves the axis open or both sides agree.
fn axis_matches(requested: Option<AxisAlign>, actual: Option<AxisAlign>) -> bool {
    requested.is_none_or(|requested| actual == Some(requested))
}

/// Converts a structural score into a raw confidence.
#[must_use]
pub fn score_confidence(score: u32) -> f64 {
    ResolutionTier::StructuralMatch.clamp_confidence(0.65 + f64::from(score) / 1000.0)
}

// ============================================================================
// SECTION: Safety Checks
// ============================================================================

/// Override set proposed for a structural candidate.
#[derive(Debug, Clone, PartialEq, Default)]
struct ProposedOverrides {
    /// Style overrides from node literals.
    styles: BTreeMap<MonitoredProperty, PropertyValue>,
    /// Text override.
    text: Option<String>,
}

impl ProposedOverrides {
    /// Collects literal fill, stroke, padding, and text from a node.
    fn from_node(node: &TargetNode) -> Self {
        let mut styles = BTreeMap::new();
        if let Some(color) = node.literal_fill() {
            styles.insert(MonitoredProperty::Fill, PropertyValue::Color(color));
        }
        if let Some(color) = node.literal_stroke() {
            styles.insert(MonitoredProperty::Stroke, PropertyValue::Color(color));
        }
        if let Some(padding) = node.literal_padding() {
            styles.insert(MonitoredProperty::Padding, PropertyValue::Number(padding));
        }
        Self {
            styles,
            text: node.text.clone(),
        }
    }

    /// Returns the first safety violation for a candidate, if any.
    fn violation(&self, component: &ComponentDescriptor) -> Option<&'static str> {
        let anatomy = &component.anatomy;
        if self.text.is_some() && !anatomy.has_label {
            return Some("text override without a text-capable descendant");
        }
        self.styles.keys().find_map(|property| anatomy.override_violation(*property))
    }
}

// ============================================================================
// SECTION: Tier
// ============================================================================

/// Attempts a structural match.
#[must_use]
pub fn attempt(ctx: &TierContext<'_>) -> Option<TierAcceptance> {
    let node = ctx.node;
    let mut ranked: Vec<(&ComponentDescriptor, u32)> = ctx
        .inventory
        .components
        .iter()
        .filter(|component| component.anatomy.layout_mode == node.layout.mode)
        .map(|component| (component, structural_score(node, component)))
        .collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1));
    ranked.truncate(MAX_CANDIDATES);

    let overrides = ProposedOverrides::from_node(node);
    for (component, score) in ranked {
        if let Some(reason) = overrides.violation(component) {
            tracing::debug!(
                target: "design_resolver::engine",
                node = %node.id,
                component = %component.id,
                score,
                reason,
                "structural candidate failed safety check"
            );
            continue;
        }
        let properties = literal_properties(node, component);
        let warnings = vec![ResolutionWarning::new(
            WarningCategory::ComponentMapping,
            format!(
                "no `{}` component matched exactly; using structurally similar `{}` (score {score})",
                node.role, component.name
            ),
        )];
        return Some(TierAcceptance {
            confidence: score_confidence(score),
            instructions: Instructions::Instantiate {
                component_id: component.id.clone(),
                component_name: component.name.clone(),
                properties,
                overrides: overrides.styles.clone(),
                text: overrides.text.clone(),
            },
            warnings,
            component: Some(component.id.clone()),
        });
    }
    None
}

/// Keeps requested properties that equal a literal native option.
fn literal_properties(node: &TargetNode, component: &ComponentDescriptor) -> BTreeMap<String, String> {
    node.requested_properties()
        .iter()
        .filter_map(|(key, value)| component.literal_option(key, value))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

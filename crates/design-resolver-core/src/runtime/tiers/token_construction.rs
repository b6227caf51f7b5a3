// crates/design-resolver-core/src/runtime/tiers/token_construction.rs
// ============================================================================
// Module: Tier 3 Token Construction
// Description: Generic containers styled entirely from bound design tokens.
// Purpose: Stay on the design system when no component fits.
// Dependencies: crate::{core, runtime}, tracing
// ============================================================================

//! ## Overview
//! Inputs are the node's style hints plus every deferred style reference on
//! the node. Each input is bound through the token resolver; the tier accepts
//! only when the share of inputs bound at or above the per-hint floor meets
//! the coverage threshold. Confidence is the mean of the accepted bindings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ContainerStyling;
use crate::core::Instructions;
use crate::core::PropertyValue;
use crate::core::ResolutionWarning;
use crate::core::StyleBinding;
use crate::core::StyleValue;
use crate::core::TargetNode;
use crate::core::TokenValue;
use crate::core::WarningCategory;
use crate::core::summary::count_to_f64;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;
use crate::runtime::tiers::TierError;
use crate::runtime::tokens::HintTarget;
use crate::runtime::tokens::StyleHint;
use crate::runtime::tokens::TokenResolver;
use crate::runtime::tokens::parse_hint;

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Returns hints for every deferred reference on the node.
fn reference_hints(node: &TargetNode) -> Vec<StyleHint> {
    let mut hints = Vec::new();
    let mut push = |target: HintTarget, name: Option<&str>| {
        if let Some(name) = name {
            hints.push(StyleHint::reference(target, name));
        }
    };
    push(HintTarget::Fill, node.fill.as_ref().and_then(StyleValue::reference));
    push(HintTarget::Stroke, node.stroke.as_ref().and_then(StyleValue::reference));
    push(HintTarget::Padding, node.padding.as_ref().and_then(StyleValue::reference));
    push(HintTarget::ItemSpacing, node.item_spacing.as_ref().and_then(StyleValue::reference));
    push(HintTarget::CornerRadius, node.corner_radius.as_ref().and_then(StyleValue::reference));
    hints
}

/// Converts a token value into a monitored property value.
const fn token_property_value(value: TokenValue) -> PropertyValue {
    match value {
        TokenValue::Color(color) => PropertyValue::Color(color),
        TokenValue::Number(number) => PropertyValue::Number(number),
    }
}

// ============================================================================
// SECTION: Tier
// ============================================================================

/// Attempts token construction.
///
/// # Errors
///
/// Returns [`TierError`] when the semantic match call fails.
pub async fn attempt(ctx: &TierContext<'_>) -> Result<Option<TierAcceptance>, TierError> {
    if !ctx.config.tier3_enabled {
        return Ok(None);
    }
    let node = ctx.node;
    let mut warnings = Vec::new();
    let mut hints = Vec::new();
    for raw in &node.style_hints {
        match parse_hint(raw) {
            Ok(hint) => hints.push(hint),
            Err(err) => {
                warnings.push(ResolutionWarning::new(WarningCategory::TokenResolution, err.to_string()));
            }
        }
    }
    hints.extend(reference_hints(node));
    let total = hints.len() + warnings.len();
    if total == 0 {
        return Ok(None);
    }

    let resolver = TokenResolver::new(
        ctx.inventory,
        ctx.classifier,
        ctx.aliases,
        ctx.config.semantic_match_floor,
        ctx.config.color_distance_ceiling,
    );
    let mut styling = ContainerStyling::default();
    let mut accepted = Vec::new();
    for hint in &hints {
        let bound = resolver
            .resolve(hint)
            .await?
            .filter(|found| found.confidence >= ctx.config.hint_confidence_floor);
        let Some(found) = bound else {
            warnings.push(ResolutionWarning::new(
                WarningCategory::TokenResolution,
                format!("no design token found for `{}`", hint.raw),
            ));
            continue;
        };
        let binding = StyleBinding::Token {
            token_id: found.token.id.clone(),
            name: found.token.name.clone(),
            value: token_property_value(found.token.value),
        };
        match hint.target.monitored() {
            Some(property) => {
                styling.properties.insert(property, binding);
            }
            None => styling.text_color = Some(binding),
        }
        accepted.push(found.confidence);
    }

    let coverage = count_to_f64(accepted.len()) / count_to_f64(total);
    if accepted.is_empty() || coverage < ctx.config.hint_coverage {
        tracing::debug!(
            target: "design_resolver::tokens",
            node = %node.id,
            bound = accepted.len(),
            total,
            "token coverage below threshold"
        );
        return Ok(None);
    }
    let confidence = accepted.iter().sum::<f64>() / count_to_f64(accepted.len());
    Ok(Some(TierAcceptance {
        confidence,
        instructions: Instructions::Construct {
            role: node.role.clone(),
            styling,
            text: node.text.clone(),
        },
        warnings,
        component: None,
    }))
}

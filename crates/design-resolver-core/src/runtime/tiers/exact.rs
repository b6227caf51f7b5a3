// crates/design-resolver-core/src/runtime/tiers/exact.rs
// ============================================================================
// Module: Tier 1 Exact Component Match
// Description: Role-matched components with mapped variant properties.
// Purpose: Prefer a library component built for exactly this role.
// Dependencies: crate::{core, runtime}, tracing
// ============================================================================

//! ## Overview
//! Candidates are components whose declared role equals the node's role, in
//! inventory order. A node that requests no properties takes the first
//! candidate at a fixed confidence. Otherwise the first candidate whose
//! mapping confidence and mappable share both meet the configured floors wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::ComponentDescriptor;
use crate::core::Instructions;
use crate::core::ResolutionWarning;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;
use crate::runtime::tiers::TierError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Confidence when a role match needs no property mapping.
pub const ROLE_ONLY_CONFIDENCE: f64 = 0.9;

// ============================================================================
// SECTION: Tier
// ============================================================================

/// Attempts an exact component match.
///
/// # Errors
///
/// Returns [`TierError`] when learning a candidate's mapping fails.
pub async fn attempt(ctx: &TierContext<'_>) -> Result<Option<TierAcceptance>, TierError> {
    let requested = ctx.node.requested_properties();
    let candidates = ctx.inventory.components.iter().filter(|component| component.has_role(&ctx.node.role));

    for component in candidates {
        if requested.is_empty() {
            return Ok(Some(accept(ctx, component, BTreeMap::new(), Vec::new(), ROLE_ONLY_CONFIDENCE)));
        }
        let mapping = ctx.mapper.mapping_for(component).await?;
        let mapped = ctx.mapper.apply(component, &mapping, &requested);
        if mapped.confidence >= ctx.config.tier1_min_confidence
            && mapped.mappable >= ctx.config.tier1_min_mappable
        {
            return Ok(Some(accept(
                ctx,
                component,
                mapped.properties,
                mapped.warnings,
                mapped.confidence,
            )));
        }
        tracing::debug!(
            target: "design_resolver::engine",
            node = %ctx.node.id,
            component = %component.id,
            confidence = mapped.confidence,
            mappable = mapped.mappable,
            "exact candidate below mapping floors"
        );
    }
    Ok(None)
}

/// Builds an instantiate acceptance for a component.
fn accept(
    ctx: &TierContext<'_>,
    component: &ComponentDescriptor,
    properties: BTreeMap<String, String>,
    warnings: Vec<ResolutionWarning>,
    confidence: f64,
) -> TierAcceptance {
    TierAcceptance {
        confidence,
        instructions: Instructions::Instantiate {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            properties,
            overrides: BTreeMap::new(),
            text: ctx.node.text.clone(),
        },
        warnings,
        component: Some(component.id.clone()),
    }
}

// crates/design-resolver-core/tests/common/mod.rs
// ============================================================================
// Module: Resolution Test Fixtures
// Description: Shared inventories, documents, and engines for integration tests.
// Purpose: Keep scenario setup identical across suites.
// ============================================================================

#![allow(dead_code, reason = "Fixtures are selectively used across suites.")]

use std::collections::BTreeSet;
use std::sync::Arc;

use design_resolver_core::ComponentDescriptor;
use design_resolver_core::DocumentSnapshot;
use design_resolver_core::EngineConfig;
use design_resolver_core::Inventory;
use design_resolver_core::ResolutionEngine;
use design_resolver_core::Rgb;
use design_resolver_core::SceneNode;
use design_resolver_core::TokenDescriptor;
use design_resolver_core::TokenId;
use design_resolver_core::TokenValue;

/// Tolerance for float comparisons.
pub const EPSILON: f64 = 1e-9;

/// Returns true when two floats are within [`EPSILON`].
pub fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}

/// Parses a hex color that is known to be valid.
pub fn rgb(hex: &str) -> Rgb {
    Rgb::from_hex(hex).unwrap()
}

/// Button component declaring the `button` role and a size property.
pub fn button_component() -> ComponentDescriptor {
    let mut component = ComponentDescriptor::new("cmp-button", "Button/Primary");
    component.role = Some("button".to_string());
    component.anatomy.has_label = true;
    component.variant_properties.insert(
        "Size".to_string(),
        ["S", "M", "L", "lg"].into_iter().map(str::to_string).collect::<BTreeSet<_>>(),
    );
    component
}

/// Color token with a fill scope.
pub fn color_token(id: &str, name: &str, hex: &str) -> TokenDescriptor {
    TokenDescriptor {
        id: TokenId::new(id),
        name: name.to_string(),
        value: TokenValue::Color(rgb(hex)),
        scopes: vec!["fill".to_string()],
        usage_count: 0,
    }
}

/// Number token with the given scope.
pub fn number_token(id: &str, name: &str, value: f64, scope: &str) -> TokenDescriptor {
    TokenDescriptor {
        id: TokenId::new(id),
        name: name.to_string(),
        value: TokenValue::Number(value),
        scopes: vec![scope.to_string()],
        usage_count: 0,
    }
}

/// Layer with a single fill.
pub fn filled_layer(hex: &str) -> SceneNode {
    SceneNode {
        fills: vec![rgb(hex)],
        ..SceneNode::default()
    }
}

/// Document using `#FE0101` forty times and `#CC0000` twice.
pub fn red_document() -> DocumentSnapshot {
    let mut layers: Vec<SceneNode> = (0 .. 40).map(|_| filled_layer("#FE0101")).collect();
    layers.extend((0 .. 2).map(|_| filled_layer("#CC0000")));
    DocumentSnapshot::new(
        "doc-red",
        vec![SceneNode {
            children: layers,
            ..SceneNode::default()
        }],
    )
}

/// Document without any styled layers.
pub fn empty_document() -> DocumentSnapshot {
    DocumentSnapshot::new("doc-empty", Vec::new())
}

/// Engine over the given inventory and document with default configuration.
pub fn engine(inventory: Inventory, document: DocumentSnapshot) -> ResolutionEngine {
    ResolutionEngine::new(Arc::new(inventory), Arc::new(document), EngineConfig::default())
}

// crates/design-resolver-core/tests/conflict_resolution.rs
// ============================================================================
// Module: Conflict Resolution Tests
// Description: Cross-source conflict detection and splicing.
// Purpose: Verify the fixed priority order and its justifications.
// ============================================================================

//! ## Overview
//! Covers [`detect_conflicts`] directly and through the engine.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use design_resolver_core::ComponentDescriptor;
use design_resolver_core::ConflictSource;
use design_resolver_core::Instructions;
use design_resolver_core::Inventory;
use design_resolver_core::LayoutMode;
use design_resolver_core::MonitoredProperty;
use design_resolver_core::PropertyValue;
use design_resolver_core::ResolutionTier;
use design_resolver_core::StyleBinding;
use design_resolver_core::StyleTable;
use design_resolver_core::StyleValue;
use design_resolver_core::TargetNode;
use design_resolver_core::WarningCategory;
use design_resolver_core::runtime::ConflictSources;
use design_resolver_core::runtime::detect_conflicts;
use proptest::prelude::*;

// ============================================================================
// SECTION: Detection
// ============================================================================

fn table(entries: &[(MonitoredProperty, f64)]) -> StyleTable {
    entries.iter().map(|(property, value)| (*property, PropertyValue::Number(*value))).collect()
}

#[test]
fn component_beats_default_with_brand_justification() {
    let component = table(&[(MonitoredProperty::Padding, 12.0)]);
    let defaults = table(&[(MonitoredProperty::Padding, 16.0)]);
    let empty = StyleTable::new();
    let conflicts = detect_conflicts(&ConflictSources {
        component: Some(&component),
        presets: &empty,
        request: &empty,
        defaults: &defaults,
    });

    assert_eq!(conflicts.len(), 1);
    let conflict = &conflicts[0];
    assert_eq!(conflict.property, MonitoredProperty::Padding);
    assert_eq!(conflict.winner.source, ConflictSource::ComponentInherent);
    assert_eq!(conflict.winner.value, PropertyValue::Number(12.0));
    assert!(conflict.justification.contains("brand"));
    assert_eq!(conflict.candidates.len(), 2);
}

#[test]
fn single_source_and_agreeing_sources_do_not_conflict() {
    let request = table(&[(MonitoredProperty::Padding, 16.0), (MonitoredProperty::Width, 320.0)]);
    let defaults = table(&[(MonitoredProperty::Padding, 16.0)]);
    let empty = StyleTable::new();
    let conflicts = detect_conflicts(&ConflictSources {
        component: None,
        presets: &empty,
        request: &request,
        defaults: &defaults,
    });

    assert!(conflicts.is_empty());
}

#[test]
fn preset_beats_request() {
    let presets = table(&[(MonitoredProperty::CornerRadius, 4.0)]);
    let request = table(&[(MonitoredProperty::CornerRadius, 12.0)]);
    let empty = StyleTable::new();
    let conflicts = detect_conflicts(&ConflictSources {
        component: None,
        presets: &presets,
        request: &request,
        defaults: &empty,
    });

    assert_eq!(conflicts[0].winner.source, ConflictSource::UserPreset);
    assert_eq!(conflicts[0].winner.priority, 2);
}

fn optional_value() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.0 .. 64.0_f64)
}

proptest! {
    #[test]
    fn winner_is_highest_priority_present_source(
        component in optional_value(),
        preset in optional_value(),
        request in optional_value(),
        default in optional_value(),
    ) {
        let build = |value: Option<f64>| {
            value.map_or_else(StyleTable::new, |value| table(&[(MonitoredProperty::Padding, value)]))
        };
        let component_table = build(component);
        let presets = build(preset);
        let request_table = build(request);
        let defaults = build(default);
        let conflicts = detect_conflicts(&ConflictSources {
            component: Some(&component_table),
            presets: &presets,
            request: &request_table,
            defaults: &defaults,
        });

        let present: Vec<(ConflictSource, f64)> = [
            (ConflictSource::ComponentInherent, component),
            (ConflictSource::UserPreset, preset),
            (ConflictSource::RequestDeclared, request),
            (ConflictSource::SystemDefault, default),
        ]
        .into_iter()
        .filter_map(|(source, value)| value.map(|value| (source, value)))
        .collect();
        let disagree = present.windows(2).any(|pair| pair[0].1 != pair[1].1);

        if disagree {
            prop_assert_eq!(conflicts.len(), 1);
            prop_assert_eq!(conflicts[0].winner.source, present[0].0);
        } else {
            prop_assert!(conflicts.is_empty());
        }
    }
}

// ============================================================================
// SECTION: Engine Integration
// ============================================================================

#[tokio::test]
async fn engine_keeps_component_padding_over_request() {
    let mut button = common::button_component();
    button.inherent.insert(MonitoredProperty::Padding, PropertyValue::Number(12.0));
    let engine = common::engine(Inventory::new(vec![button], Vec::new()), common::empty_document());
    let mut node = TargetNode::new("cta", "button");
    node.padding = Some(StyleValue::Literal(24.0));

    let outcome = engine.resolve_node(&node).await;

    let conflict = outcome
        .conflicts
        .iter()
        .find(|conflict| conflict.property == MonitoredProperty::Padding)
        .unwrap();
    assert_eq!(conflict.winner.source, ConflictSource::ComponentInherent);
    assert!(conflict.justification.contains("brand"));
    let Instructions::Instantiate {
        overrides, ..
    } = outcome.instructions
    else {
        panic!("expected an instantiate instruction");
    };
    assert!(!overrides.contains_key(&MonitoredProperty::Padding));
}

#[tokio::test]
async fn engine_applies_user_preset_to_constructed_container() {
    let presets = table(&[(MonitoredProperty::Padding, 20.0)]);
    let engine = common::engine(Inventory::default(), common::empty_document()).with_presets(presets);

    let outcome = engine.resolve_node(&TargetNode::new("mystery", "widget")).await;

    let Instructions::Construct {
        styling, ..
    } = outcome.instructions
    else {
        panic!("expected a construct instruction");
    };
    assert_eq!(
        styling.properties.get(&MonitoredProperty::Padding).map(StyleBinding::value),
        Some(PropertyValue::Number(20.0))
    );
    assert!(outcome.conflicts.iter().any(|conflict| conflict.winner.source == ConflictSource::UserPreset));
}

/// Presets carrying a padding and a fill that both differ from the defaults.
fn padding_and_fill_presets() -> StyleTable {
    let mut presets = table(&[(MonitoredProperty::Padding, 20.0)]);
    presets.insert(MonitoredProperty::Fill, PropertyValue::Color(common::rgb("#123456")));
    presets
}

#[tokio::test]
async fn preset_winners_skip_overrides_the_component_cannot_take() {
    let mut icon = ComponentDescriptor::new("cmp-icon", "Icon/Base");
    icon.anatomy.has_icon = true;
    icon.anatomy.layout_mode = LayoutMode::None;
    let engine = common::engine(Inventory::new(vec![icon], Vec::new()), common::empty_document())
        .with_presets(padding_and_fill_presets());

    let outcome = engine.resolve_node(&TargetNode::new("n", "glyph")).await;

    assert_eq!(outcome.tier, ResolutionTier::StructuralMatch);
    for property in [MonitoredProperty::Padding, MonitoredProperty::Fill] {
        let conflict = outcome
            .conflicts
            .iter()
            .find(|conflict| conflict.property == property)
            .unwrap_or_else(|| panic!("missing {property} conflict"));
        assert_eq!(conflict.winner.source, ConflictSource::UserPreset);
    }
    let withheld: Vec<&str> = outcome
        .warnings
        .iter()
        .filter(|warning| warning.category == WarningCategory::ComponentMapping)
        .map(|warning| warning.message.as_str())
        .filter(|message| message.contains("not applied"))
        .collect();
    assert_eq!(withheld.len(), 2, "warnings: {:?}", outcome.warnings);
    let Instructions::Instantiate {
        overrides, ..
    } = outcome.instructions
    else {
        panic!("expected an instantiate instruction");
    };
    assert!(overrides.is_empty(), "unexpected overrides: {overrides:?}");
}

#[tokio::test]
async fn preset_winners_reach_components_that_accept_them() {
    let mut row = ComponentDescriptor::new("cmp-row", "Row/Container");
    row.anatomy.layout_mode = LayoutMode::Horizontal;
    let engine = common::engine(Inventory::new(vec![row], Vec::new()), common::empty_document())
        .with_presets(padding_and_fill_presets());
    let mut node = TargetNode::new("n", "toolbar");
    node.layout.mode = LayoutMode::Horizontal;

    let outcome = engine.resolve_node(&node).await;

    assert_eq!(outcome.tier, ResolutionTier::StructuralMatch);
    assert!(!outcome.warnings.iter().any(|warning| warning.message.contains("not applied")));
    let Instructions::Instantiate {
        overrides, ..
    } = outcome.instructions
    else {
        panic!("expected an instantiate instruction");
    };
    assert_eq!(overrides.get(&MonitoredProperty::Padding), Some(&PropertyValue::Number(20.0)));
    assert_eq!(
        overrides.get(&MonitoredProperty::Fill),
        Some(&PropertyValue::Color(common::rgb("#123456")))
    );
}

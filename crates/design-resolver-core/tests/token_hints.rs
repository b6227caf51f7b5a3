// crates/design-resolver-core/tests/token_hints.rs
// ============================================================================
// Module: Token Hint Tests
// Description: Style-hint parsing and the four token lookup strategies.
// Purpose: Verify confidence per strategy and the semantic-match floor.
// ============================================================================

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

use std::collections::BTreeMap;

use async_trait::async_trait;
use design_resolver_core::Classifier;
use design_resolver_core::ClassifierError;
use design_resolver_core::Inventory;
use design_resolver_core::MatchRequest;
use design_resolver_core::MatchSuggestion;
use design_resolver_core::runtime::AliasTable;
use design_resolver_core::runtime::HintTarget;
use design_resolver_core::runtime::TokenMatchStrategy;
use design_resolver_core::runtime::TokenResolver;
use design_resolver_core::runtime::parse_hint;
use design_resolver_core::runtime::tokens::HintParseError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Classifier that always suggests one token at a fixed confidence.
struct FixedClassifier {
    name: &'static str,
    confidence: f64,
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn suggest(&self, _request: &MatchRequest) -> Result<MatchSuggestion, ClassifierError> {
        Ok(MatchSuggestion {
            value: Some(self.name.to_string()),
            category: None,
            value_mappings: Vec::new(),
            confidence: self.confidence,
        })
    }
}

fn inventory() -> Inventory {
    Inventory::new(Vec::new(), vec![
        common::color_token("tok-primary", "color/brand/primary", "#3366FF"),
        common::color_token("tok-surface", "color/surface", "#FAFAFA"),
        common::number_token("tok-radius-sm", "radius/sm", 4.0, "corner_radius"),
    ])
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn hints_parse_prefix_and_query() {
    let hint = parse_hint("bg-primary").unwrap();
    assert_eq!(hint.target, HintTarget::Fill);
    assert_eq!(hint.query, "primary");

    assert_eq!(parse_hint("rounded-sm").unwrap().target, HintTarget::CornerRadius);
    assert_eq!(parse_hint("text-foreground").unwrap().target, HintTarget::TextColor);
    assert_eq!(parse_hint("gap-4").unwrap().target, HintTarget::ItemSpacing);
}

#[test]
fn malformed_hints_are_rejected() {
    assert!(matches!(parse_hint("primary"), Err(HintParseError::MissingQuery(_))));
    assert!(matches!(parse_hint("bg-"), Err(HintParseError::MissingQuery(_))));
    assert!(matches!(parse_hint("shadow-lg"), Err(HintParseError::UnknownPrefix(_))));
}

// ============================================================================
// SECTION: Strategies
// ============================================================================

#[tokio::test]
async fn full_name_and_segment_matches() {
    let inventory = inventory();
    let aliases = AliasTable::default();
    let resolver = TokenResolver::new(&inventory, None, &aliases, 0.75, 10.0);

    let full = resolver.resolve(&parse_hint("bg-color/surface").unwrap()).await.unwrap().unwrap();
    assert!(common::approx(full.confidence, 1.0));
    assert_eq!(full.strategy, TokenMatchStrategy::ExactName);

    let segment = resolver.resolve(&parse_hint("rounded-sm").unwrap()).await.unwrap().unwrap();
    assert_eq!(segment.token.name, "radius/sm");
    assert!(common::approx(segment.confidence, 0.95));
}

#[tokio::test]
async fn alias_matches_use_builtin_and_extra_groups() {
    let inventory = inventory();
    let builtin = AliasTable::default();
    let resolver = TokenResolver::new(&inventory, None, &builtin, 0.75, 10.0);

    let found = resolver.resolve(&parse_hint("bg-brand").unwrap()).await.unwrap().unwrap();
    assert_eq!(found.token.name, "color/brand/primary");
    assert_eq!(found.strategy, TokenMatchStrategy::Alias);
    assert!(common::approx(found.confidence, 0.85));

    let extra = AliasTable::with_extra(&BTreeMap::from([(
        "surface".to_string(),
        vec!["paper".to_string()],
    )]));
    let resolver = TokenResolver::new(&inventory, None, &extra, 0.75, 10.0);
    let found = resolver.resolve(&parse_hint("bg-paper").unwrap()).await.unwrap().unwrap();
    assert_eq!(found.token.name, "color/surface");
}

#[tokio::test]
async fn semantic_match_respects_floor() {
    let inventory = inventory();
    let aliases = AliasTable::default();
    let confident = FixedClassifier {
        name: "color/surface",
        confidence: 0.8,
    };
    let unsure = FixedClassifier {
        name: "color/surface",
        confidence: 0.5,
    };

    let resolver = TokenResolver::new(&inventory, Some(&confident), &aliases, 0.75, 10.0);
    let found = resolver.resolve(&parse_hint("bg-paper").unwrap()).await.unwrap().unwrap();
    assert_eq!(found.strategy, TokenMatchStrategy::Semantic);

    let resolver = TokenResolver::new(&inventory, Some(&unsure), &aliases, 0.75, 10.0);
    assert!(resolver.resolve(&parse_hint("bg-paper").unwrap()).await.unwrap().is_none());
}

#[tokio::test]
async fn literal_color_query_uses_proximity() {
    let inventory = inventory();
    let aliases = AliasTable::default();
    let resolver = TokenResolver::new(&inventory, None, &aliases, 0.75, 10.0);

    let found = resolver.resolve(&parse_hint("bg-[#3366FE]").unwrap()).await.unwrap().unwrap();
    assert_eq!(found.token.name, "color/brand/primary");
    assert_eq!(found.strategy, TokenMatchStrategy::Proximity);
    assert!(common::approx(found.confidence, 0.9));

    let far = resolver.resolve(&parse_hint("bg-#FF0000").unwrap()).await.unwrap();
    assert!(far.is_none());
}

#[tokio::test]
async fn hints_never_bind_tokens_of_the_wrong_kind() {
    let inventory = inventory();
    let aliases = AliasTable::default();
    let resolver = TokenResolver::new(&inventory, None, &aliases, 0.75, 10.0);

    assert!(resolver.resolve(&parse_hint("p-primary").unwrap()).await.unwrap().is_none());
}

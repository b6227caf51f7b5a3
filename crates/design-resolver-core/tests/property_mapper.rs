// crates/design-resolver-core/tests/property_mapper.rs
// ============================================================================
// Module: Property Mapper Tests
// Description: Mapping learning, persistence, and translation.
// Purpose: Verify literal short-circuits, semantic translation, and warnings.
// ============================================================================

//! ## Overview
//! Exercises [`PropertyMapper`] directly against the in-memory mapping store.

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
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use design_resolver_core::Classifier;
use design_resolver_core::ClassifierError;
use design_resolver_core::ComponentDescriptor;
use design_resolver_core::InMemoryMappingStore;
use design_resolver_core::MappingStore;
use design_resolver_core::MatchContext;
use design_resolver_core::MatchRequest;
use design_resolver_core::MatchSuggestion;
use design_resolver_core::PropertyCategory;
use design_resolver_core::ValueMapping;
use design_resolver_core::WarningCategory;
use design_resolver_core::runtime::PropertyMapper;
use design_resolver_core::runtime::fuzzy::DEFAULT_FUZZY_THRESHOLD;
use design_resolver_core::runtime::mapper::canonical_value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Classifier that labels every property as a style and counts calls.
#[derive(Default)]
struct CountingClassifier {
    calls: AtomicUsize,
}

#[async_trait]
impl Classifier for CountingClassifier {
    async fn suggest(&self, request: &MatchRequest) -> Result<MatchSuggestion, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let MatchContext::PropertyClassification {
            options, ..
        } = &request.context
        else {
            return Err(ClassifierError::InvalidResponse("unexpected context".to_string()));
        };
        Ok(MatchSuggestion {
            value: None,
            category: Some(PropertyCategory::Style),
            value_mappings: options
                .iter()
                .map(|native| ValueMapping {
                    semantic: native.to_ascii_lowercase(),
                    native: native.clone(),
                    confidence: 0.85,
                })
                .collect(),
            confidence: 0.85,
        })
    }
}

fn request(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

fn mapper(store: Arc<InMemoryMappingStore>, classifier: Option<Arc<dyn Classifier>>) -> PropertyMapper {
    PropertyMapper::new(store, classifier, DEFAULT_FUZZY_THRESHOLD, 0.7)
}

// ============================================================================
// SECTION: Translation
// ============================================================================

#[tokio::test]
async fn literal_option_short_circuits_translation() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let component = common::button_component();

    let mapping = mapper.mapping_for(&component).await.unwrap();
    let mapped = mapper.apply(&component, &mapping, &request(&[("Size", "LG")]));

    assert_eq!(mapped.properties.get("Size").map(String::as_str), Some("lg"));
    assert!(mapped.warnings.is_empty(), "unexpected warnings: {:?}", mapped.warnings);
}

#[tokio::test]
async fn semantic_values_translate_through_synonyms() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let component = common::button_component();

    let mapping = mapper.mapping_for(&component).await.unwrap();
    let mapped = mapper.apply(&component, &mapping, &request(&[("size", "large")]));

    assert_eq!(mapped.properties.get("Size").map(String::as_str), Some("L"));
    assert!(common::approx(mapped.mappable, 1.0));
    assert!(common::approx(mapped.confidence, 0.8));
}

#[tokio::test]
async fn misspelled_key_and_value_fall_back_to_fuzzy_match() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let mut component = ComponentDescriptor::new("cmp-chip", "Chip");
    component.variant_properties.insert(
        "Iconography".to_string(),
        ["Arrow-Left", "Chevron"].into_iter().map(str::to_string).collect::<BTreeSet<_>>(),
    );

    let mapping = mapper.mapping_for(&component).await.unwrap();
    let mapped = mapper.apply(&component, &mapping, &request(&[("iconograph", "arrow-lft")]));

    assert_eq!(mapped.properties.get("Iconography").map(String::as_str), Some("Arrow-Left"));
    assert!(
        !mapped.warnings.iter().any(|warning| warning.message.contains("could not map")),
        "unexpected warnings: {:?}",
        mapped.warnings
    );
}

#[tokio::test]
async fn unmappable_pair_becomes_a_warning() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let component = common::button_component();

    let mapping = mapper.mapping_for(&component).await.unwrap();
    let mapped = mapper.apply(&component, &mapping, &request(&[("icon", "arrow")]));

    assert!(mapped.properties.is_empty());
    assert!(common::approx(mapped.mappable, 0.0));
    assert!(mapped.warnings.iter().all(|warning| warning.category == WarningCategory::ComponentMapping));
    assert_eq!(mapped.warnings.len(), 2, "expected pair and quality warnings");
}

#[tokio::test]
async fn empty_request_is_fully_mappable() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let component = common::button_component();

    let mapping = mapper.mapping_for(&component).await.unwrap();

    assert!(common::approx(mapper.mappable_percentage(&mapping, &BTreeMap::new()), 1.0));
}

#[test]
fn synonyms_canonicalize_values() {
    assert_eq!(canonical_value("LG"), "large");
    assert_eq!(canonical_value(" inactive "), "disabled");
    assert_eq!(canonical_value("Tertiary"), "tertiary");
}

// ============================================================================
// SECTION: Learning
// ============================================================================

#[tokio::test]
async fn learned_mapping_is_persisted_and_reused() {
    let store = Arc::new(InMemoryMappingStore::new());
    let classifier = Arc::new(CountingClassifier::default());
    let mapper = mapper(Arc::clone(&store), Some(Arc::clone(&classifier) as Arc<dyn Classifier>));
    let mut component = ComponentDescriptor::new("cmp-chip", "Chip");
    component.variant_properties.insert(
        "Look".to_string(),
        ["Filled", "Outlined"].into_iter().map(str::to_string).collect::<BTreeSet<_>>(),
    );

    let first = mapper.mapping_for(&component).await.unwrap();
    let second = mapper.mapping_for(&component).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    let stored = store.load(&component.id).unwrap().unwrap();
    assert_eq!(stored.entries[0].category, PropertyCategory::Style);
}

#[tokio::test]
async fn heuristic_names_skip_the_classifier() {
    let store = Arc::new(InMemoryMappingStore::new());
    let classifier = Arc::new(CountingClassifier::default());
    let mapper = mapper(Arc::clone(&store), Some(Arc::clone(&classifier) as Arc<dyn Classifier>));

    let mapping = mapper.mapping_for(&common::button_component()).await.unwrap();

    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(mapping.entries[0].category, PropertyCategory::Size);
}

#[tokio::test]
async fn unclassified_property_without_classifier_is_custom() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mapper = mapper(Arc::clone(&store), None);
    let mut component = ComponentDescriptor::new("cmp-chip", "Chip");
    component.variant_properties.insert(
        "Look".to_string(),
        ["Filled"].into_iter().map(str::to_string).collect::<BTreeSet<_>>(),
    );

    let mapping = mapper.mapping_for(&component).await.unwrap();

    assert_eq!(mapping.entries[0].category, PropertyCategory::Custom("look".to_string()));
    assert!(common::approx(mapping.overall_confidence(), 0.6));
}

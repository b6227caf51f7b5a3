// crates/design-resolver-core/src/runtime/mapper.rs
// ============================================================================
// Module: Design Resolver Property Mapper
// Description: Semantic-to-native property translation for library components.
// Purpose: Decide how well a component can express a requested property set.
// Dependencies: crate::{core, interfaces, runtime::fuzzy}, thiserror, tracing
// ============================================================================

//! ## Overview
//! The mapper learns, once per component, how each native variant property
//! maps onto a semantic category and how each option value maps onto a
//! semantic value. Learning prefers the native-name heuristic and only asks
//! the external classifier about properties the heuristic cannot place.
//! Learned mappings are persisted through [`MappingStore`].
//!
//! Requested `(key, value)` pairs that already equal a literal native
//! property/option pair (case-insensitive) are used verbatim and never go
//! through semantic translation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::ComponentDescriptor;
use crate::core::ComponentMapping;
use crate::core::MappingEntry;
use crate::core::PropertyCategory;
use crate::core::ResolutionWarning;
use crate::core::ValueMapping;
use crate::core::WarningCategory;
use crate::core::summary::count_to_f64;
use crate::interfaces::Classifier;
use crate::interfaces::ClassifierError;
use crate::interfaces::MappingStore;
use crate::interfaces::MappingStoreError;
use crate::interfaces::MatchContext;
use crate::interfaces::MatchRequest;
use crate::runtime::fuzzy::best_match;
use crate::runtime::fuzzy::similarity;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Confidence of a value mapping derived from a recognized property name.
const HEURISTIC_CONFIDENCE: f64 = 0.9;
/// Confidence of a value mapping for an unclassified custom property.
const CUSTOM_CONFIDENCE: f64 = 0.6;
/// Penalty applied when the semantic value came from the synonym table.
const SYNONYM_PENALTY: f64 = 0.1;

/// Value synonym groups: canonical semantic value, then accepted spellings.
const VALUE_SYNONYMS: &[(&str, &[&str])] = &[
    ("small", &["sm", "s", "compact"]),
    ("medium", &["md", "m", "regular", "base"]),
    ("large", &["lg", "l", "big"]),
    ("extra-large", &["xl", "x-large", "xlarge"]),
    ("default", &["rest", "normal", "enabled", "idle"]),
    ("hover", &["hovered", "hovering"]),
    ("pressed", &["active", "down"]),
    ("focused", &["focus", "focus-visible"]),
    ("disabled", &["inactive", "off"]),
    ("primary", &["main", "brand"]),
    ("secondary", &["alt", "alternate"]),
    ("danger", &["destructive", "error", "critical"]),
];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while learning a component mapping.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Classification service failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    /// Mapping store failed on load.
    #[error(transparent)]
    Store(#[from] MappingStoreError),
}

// ============================================================================
// SECTION: Mapped Properties
// ============================================================================

/// Result of applying a requested property set to a component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappedProperties {
    /// Native property name to native option value.
    pub properties: BTreeMap<String, String>,
    /// Warnings for skipped pairs and low overall quality.
    pub warnings: Vec<ResolutionWarning>,
    /// Mean confidence across the component's value mappings.
    pub confidence: f64,
    /// Fraction of requested keys that resolve to a known category.
    pub mappable: f64,
}

// ============================================================================
// SECTION: Property Mapper
// ============================================================================

/// Per-component property translation service.
pub struct PropertyMapper {
    /// Persistent mapping cache.
    store: Arc<dyn MappingStore>,
    /// Optional classification service.
    classifier: Option<Arc<dyn Classifier>>,
    /// Minimum similarity for fuzzy key and value matches.
    fuzzy_threshold: f64,
    /// Minimum confidence and mappability before a quality warning is added.
    quality_floor: f64,
}

impl PropertyMapper {
    /// Creates a mapper over a store and an optional classifier.
    #[must_use]
    pub fn new(
        store: Arc<dyn MappingStore>,
        classifier: Option<Arc<dyn Classifier>>,
        fuzzy_threshold: f64,
        quality_floor: f64,
    ) -> Self {
        Self {
            store,
            classifier,
            fuzzy_threshold,
            quality_floor,
        }
    }

    /// Returns the component's mapping, learning and persisting it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError`] when the store cannot be read or the classifier fails.
    pub async fn mapping_for(
        &self,
        component: &ComponentDescriptor,
    ) -> Result<ComponentMapping, MapperError> {
        if let Some(mapping) = self.store.load(&component.id)? {
            return Ok(mapping);
        }
        let mapping = self.learn(component).await?;
        if let Err(err) = self.store.save(&mapping) {
            tracing::warn!(
                target: "design_resolver::mapper",
                component = %component.id,
                error = %err,
                "failed to persist learned mapping"
            );
        }
        Ok(mapping)
    }

    /// Derives a mapping for every variant property of a component.
    async fn learn(&self, component: &ComponentDescriptor) -> Result<ComponentMapping, MapperError> {
        let mut entries = Vec::with_capacity(component.variant_properties.len());
        for (name, options) in &component.variant_properties {
            let options: Vec<String> = options.iter().cloned().collect();
            let entry = if let Some(category) = PropertyCategory::from_native_name(name) {
                MappingEntry {
                    native_property: name.clone(),
                    category,
                    values: derive_values(&options, HEURISTIC_CONFIDENCE),
                }
            } else if let Some(classifier) = &self.classifier {
                let request = MatchRequest {
                    query: name.clone(),
                    context: MatchContext::PropertyClassification {
                        component_name: component.name.clone(),
                        options: options.clone(),
                    },
                };
                let suggestion = classifier.suggest(&request).await?;
                let confidence = clamp_unit(suggestion.confidence);
                let category = suggestion
                    .category
                    .unwrap_or_else(|| PropertyCategory::Custom(name.trim().to_ascii_lowercase()));
                let suggested: Vec<ValueMapping> = suggestion
                    .value_mappings
                    .into_iter()
                    .filter(|mapping| options.contains(&mapping.native))
                    .map(|mapping| ValueMapping {
                        confidence: clamp_unit(mapping.confidence),
                        ..mapping
                    })
                    .collect();
                MappingEntry {
                    native_property: name.clone(),
                    category,
                    values: if suggested.is_empty() {
                        derive_values(&options, confidence)
                    } else {
                        suggested
                    },
                }
            } else {
                MappingEntry {
                    native_property: name.clone(),
                    category: PropertyCategory::Custom(name.trim().to_ascii_lowercase()),
                    values: derive_values(&options, CUSTOM_CONFIDENCE),
                }
            };
            entries.push(entry);
        }
        Ok(ComponentMapping {
            component_id: component.id.clone(),
            entries,
        })
    }

    /// Returns the fraction of requested keys that resolve to a known property.
    ///
    /// An empty request is fully mappable.
    #[must_use]
    pub fn mappable_percentage(
        &self,
        mapping: &ComponentMapping,
        requested: &BTreeMap<String, String>,
    ) -> f64 {
        if requested.is_empty() {
            return 1.0;
        }
        let resolved = requested.keys().filter(|key| self.key_is_known(mapping, key)).count();
        count_to_f64(resolved) / count_to_f64(requested.len())
    }

    /// Returns true when a requested key maps to one of the mapping's entries.
    fn key_is_known(&self, mapping: &ComponentMapping, key: &str) -> bool {
        let category = PropertyCategory::from_semantic_key(key);
        mapping.entries.iter().any(|entry| {
            PropertyCategory::from_native_name(&entry.native_property).as_ref() == Some(&category)
        }) || mapping.entries.iter().any(|entry| entry.category == category)
            || mapping
                .entries
                .iter()
                .any(|entry| similarity(key, &entry.native_property) >= self.fuzzy_threshold)
    }

    /// Translates requested properties into native properties, collecting warnings.
    #[must_use]
    pub fn apply(
        &self,
        component: &ComponentDescriptor,
        mapping: &ComponentMapping,
        requested: &BTreeMap<String, String>,
    ) -> MappedProperties {
        let mut result = MappedProperties {
            confidence: mapping.overall_confidence(),
            mappable: self.mappable_percentage(mapping, requested),
            ..MappedProperties::default()
        };

        for (key, value) in requested {
            if let Some((native_key, native_value)) = component.literal_option(key, value) {
                result.properties.insert(native_key.to_string(), native_value.to_string());
                continue;
            }
            if let Some((native_key, native_value)) = self.translate(mapping, key, value) {
                result.properties.insert(native_key, native_value);
                continue;
            }
            result.warnings.push(ResolutionWarning::new(
                WarningCategory::ComponentMapping,
                format!("could not map property `{key}` = `{value}` on component `{}`", component.name),
            ));
        }

        if result.confidence < self.quality_floor || result.mappable < self.quality_floor {
            result.warnings.push(ResolutionWarning::new(
                WarningCategory::ComponentMapping,
                format!(
                    "low mapping quality for component `{}` (confidence {:.0}%, mappable {:.0}%)",
                    component.name,
                    result.confidence * 100.0,
                    result.mappable * 100.0
                ),
            ));
        }
        result
    }

    /// Translates one pair by semantic category, then by fuzzy key match.
    fn translate(
        &self,
        mapping: &ComponentMapping,
        key: &str,
        value: &str,
    ) -> Option<(String, String)> {
        let category = PropertyCategory::from_semantic_key(key);
        let direct = mapping.entries.iter().find(|entry| {
            entry.category == category
                || PropertyCategory::from_native_name(&entry.native_property).as_ref()
                    == Some(&category)
        });
        if let Some(entry) = direct
            && let Some(native) = self.lookup_value(entry, value)
        {
            return Some((entry.native_property.clone(), native));
        }

        let names = mapping.entries.iter().map(|entry| entry.native_property.as_str());
        let found = best_match(key, names, self.fuzzy_threshold)?;
        let entry = mapping.entries.get(found.index)?;
        self.lookup_value(entry, value).map(|native| (entry.native_property.clone(), native))
    }

    /// Finds the native option for a requested value within one entry.
    fn lookup_value(&self, entry: &MappingEntry, value: &str) -> Option<String> {
        let canonical = canonical_value(value);
        if let Some(found) = entry
            .values
            .iter()
            .find(|mapping| mapping.native.eq_ignore_ascii_case(value) || mapping.semantic == canonical)
        {
            return Some(found.native.clone());
        }
        let options = entry.values.iter().map(|mapping| mapping.native.as_str());
        best_match(value, options, self.fuzzy_threshold).map(|found| found.candidate.to_string())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the canonical semantic spelling of an option value.
#[must_use]
pub fn canonical_value(value: &str) -> String {
    let normalized = value.trim().to_ascii_lowercase();
    VALUE_SYNONYMS
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map_or(normalized, |(canonical, _)| (*canonical).to_string())
}

/// Builds value mappings for a list of native options.
fn derive_values(options: &[String], base_confidence: f64) -> Vec<ValueMapping> {
    options
        .iter()
        .map(|native| {
            let semantic = canonical_value(native);
            let confidence = if semantic == native.trim().to_ascii_lowercase() {
                base_confidence
            } else {
                base_confidence - SYNONYM_PENALTY
            };
            ValueMapping {
                semantic,
                native: native.clone(),
                confidence: clamp_unit(confidence),
            }
        })
        .collect()
}

/// Clamps a score into [0, 1], mapping NaN to 0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

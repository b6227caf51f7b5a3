// crates/design-resolver-core/src/core/mapping.rs
// ============================================================================
// Module: Design Resolver Property Mappings
// Description: Learned semantic-to-native property translations per component.
// Purpose: Persistable cache entries consumed by the property mapper.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Each component's variant properties are classified into a closed set of
//! semantic categories with an explicit `Custom` escape hatch. Every option
//! value is paired with a semantic value and a confidence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ComponentId;

// ============================================================================
// SECTION: Property Category
// ============================================================================

/// Semantic category of a component property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum PropertyCategory {
    /// Visual variant (primary, secondary, ...).
    Variant,
    /// Size scale (small, medium, large, ...).
    Size,
    /// Interaction state (default, hover, disabled, ...).
    State,
    /// Stylistic treatment (filled, outlined, ghost, ...).
    Style,
    /// Any other property, keyed by its normalized name.
    Custom(String),
}

impl PropertyCategory {
    /// Classifies a semantic (requested) property key.
    #[must_use]
    pub fn from_semantic_key(key: &str) -> Self {
        let normalized = key.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "variant" | "type" | "kind" | "intent" => Self::Variant,
            "size" | "scale" => Self::Size,
            "state" | "status" => Self::State,
            "style" | "appearance" | "treatment" => Self::Style,
            _ => Self::Custom(normalized),
        }
    }

    /// Classifies a native property name by naming heuristic.
    ///
    /// Returns `None` when the name does not contain a recognized keyword.
    #[must_use]
    pub fn from_native_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized.contains("variant") || normalized.contains("type") {
            Some(Self::Variant)
        } else if normalized.contains("size") {
            Some(Self::Size)
        } else if normalized.contains("state") || normalized.contains("status") {
            Some(Self::State)
        } else if normalized.contains("style") || normalized.contains("appearance") {
            Some(Self::Style)
        } else {
            None
        }
    }

    /// Returns a stable label for the category.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Variant => "variant",
            Self::Size => "size",
            Self::State => "state",
            Self::Style => "style",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Mapping Entries
// ============================================================================

/// Translation of one option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMapping {
    /// Semantic value (lowercase, e.g. `large`).
    pub semantic: String,
    /// Native option value as declared by the component (e.g. `L`).
    pub native: String,
    /// Confidence of the translation in [0, 1].
    pub confidence: f64,
}

/// Classification of one native property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Native property name.
    pub native_property: String,
    /// Semantic category.
    pub category: PropertyCategory,
    /// Option value translations.
    pub values: Vec<ValueMapping>,
}

/// Learned mapping for one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMapping {
    /// Component identifier.
    pub component_id: ComponentId,
    /// Property classifications in native-name order.
    pub entries: Vec<MappingEntry>,
}

impl ComponentMapping {
    /// Returns the mean confidence across every value translation.
    ///
    /// A component without any value translations has confidence 0.
    #[must_use]
    pub fn overall_confidence(&self) -> f64 {
        let (sum, count) = self
            .entries
            .iter()
            .flat_map(|entry| entry.values.iter())
            .fold((0.0, 0_u32), |(sum, count), value| (sum + value.confidence, count + 1));
        if count == 0 { 0.0 } else { sum / f64::from(count) }
    }
}

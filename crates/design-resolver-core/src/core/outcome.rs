// crates/design-resolver-core/src/core/outcome.rs
// ============================================================================
// Module: Design Resolver Outcomes
// Description: Per-node resolution results, construction instructions, warnings,
// and conflict records.
// Purpose: Canonical, serializable output of the resolution engine.
// Dependencies: crate::core::{identifiers, style}, serde
// ============================================================================

//! ## Overview
//! Every target node yields exactly one [`ResolutionOutcome`]. An outcome
//! names the accepted tier, carries one of two instruction shapes, and keeps
//! the warning and conflict trail that explains how it was reached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ComponentId;
use crate::core::identifiers::NodeId;
use crate::core::identifiers::TokenId;
use crate::core::style::MonitoredProperty;
use crate::core::style::PropertyValue;

// ============================================================================
// SECTION: Tiers
// ============================================================================

/// Fallback tier, ordered from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Tier 1: role-matched component with mapped properties.
    ExactComponent,
    /// Tier 2: structurally similar component with safe overrides.
    StructuralMatch,
    /// Tier 3: container built from bound design tokens.
    TokenConstruction,
    /// Tier 4: container styled with the nearest frequent document values.
    PrimitiveApproximation,
    /// Tier 5: container styled with fixed system defaults.
    SystemDefault,
}

impl ResolutionTier {
    /// All tiers in attempt order.
    pub const ORDER: [Self; 5] = [
        Self::ExactComponent,
        Self::StructuralMatch,
        Self::TokenConstruction,
        Self::PrimitiveApproximation,
        Self::SystemDefault,
    ];

    /// Returns the tier number (1-5).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::ExactComponent => 1,
            Self::StructuralMatch => 2,
            Self::TokenConstruction => 3,
            Self::PrimitiveApproximation => 4,
            Self::SystemDefault => 5,
        }
    }

    /// Returns the documented confidence band `(min, max)` for the tier.
    #[must_use]
    pub const fn confidence_band(self) -> (f64, f64) {
        match self {
            Self::ExactComponent => (0.7, 1.0),
            Self::StructuralMatch => (0.65, 0.75),
            Self::TokenConstruction => (0.7, 0.9),
            Self::PrimitiveApproximation => (0.35, 1.0),
            Self::SystemDefault => (0.30, 0.30),
        }
    }

    /// Clamps a raw confidence into the tier's band.
    #[must_use]
    pub fn clamp_confidence(self, raw: f64) -> f64 {
        let (min, max) = self.confidence_band();
        if raw.is_nan() { min } else { raw.clamp(min, max) }
    }

    /// Returns the method tag recorded for outcomes of this tier.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::ExactComponent => "exact_component_match",
            Self::StructuralMatch => "structural_match",
            Self::TokenConstruction => "token_construction",
            Self::PrimitiveApproximation => "primitive_frequency_fallback",
            Self::SystemDefault => "system_defaults",
        }
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {} ({})", self.number(), self.method())
    }
}

// ============================================================================
// SECTION: Instructions
// ============================================================================

/// Where a constructed style value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StyleBinding {
    /// Bound to an inventory token.
    Token {
        /// Token identifier.
        token_id: TokenId,
        /// Token name.
        name: String,
        /// Token value at resolution time.
        value: PropertyValue,
    },
    /// Raw value (document primitive, request literal, or default).
    Raw {
        /// Concrete value.
        value: PropertyValue,
    },
}

impl StyleBinding {
    /// Returns the concrete value.
    #[must_use]
    pub const fn value(&self) -> PropertyValue {
        match self {
            Self::Token {
                value, ..
            }
            | Self::Raw {
                value,
            } => *value,
        }
    }
}

/// Explicit styling for a generic container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerStyling {
    /// Monitored property values.
    pub properties: BTreeMap<MonitoredProperty, StyleBinding>,
    /// Text color when the node carries text.
    #[serde(default)]
    pub text_color: Option<StyleBinding>,
}

/// Construction instructions for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instructions {
    /// Instantiate an existing library component.
    Instantiate {
        /// Component to instantiate.
        component_id: ComponentId,
        /// Component name (for display).
        component_name: String,
        /// Native variant properties to set.
        properties: BTreeMap<String, String>,
        /// Style overrides applied on the instance.
        overrides: BTreeMap<MonitoredProperty, PropertyValue>,
        /// Text override, when requested.
        text: Option<String>,
    },
    /// Construct a generic container.
    Construct {
        /// Semantic role carried over from the request.
        role: String,
        /// Explicit styling.
        styling: ContainerStyling,
        /// Literal text content.
        text: Option<String>,
    },
}

// ============================================================================
// SECTION: Warnings
// ============================================================================

/// Warning category used for summary aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    /// Component property mapping or override issues (tiers 1-2).
    ComponentMapping,
    /// Token binding issues (tier 3).
    TokenResolution,
    /// Value approximations (tier 4).
    Approximation,
    /// System defaults in use (tier 5).
    SystemDefault,
}

impl WarningCategory {
    /// Returns a stable label for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComponentMapping => "component_mapping",
            Self::TokenResolution => "token_resolution",
            Self::Approximation => "approximation",
            Self::SystemDefault => "system_default",
        }
    }
}

/// Categorized, human-readable warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionWarning {
    /// Warning category.
    pub category: WarningCategory,
    /// Message text.
    pub message: String,
}

impl ResolutionWarning {
    /// Creates a warning.
    #[must_use]
    pub fn new(category: WarningCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category.as_str(), self.message)
    }
}

// ============================================================================
// SECTION: Conflicts
// ============================================================================

/// Source of a monitored property value, ordered by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSource {
    /// Value inherent to the matched component.
    ComponentInherent,
    /// Value from the user's preset table.
    UserPreset,
    /// Value declared by the request.
    RequestDeclared,
    /// Fixed system default.
    SystemDefault,
}

impl ConflictSource {
    /// Returns the fixed priority (1 is highest).
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::ComponentInherent => 1,
            Self::UserPreset => 2,
            Self::RequestDeclared => 3,
            Self::SystemDefault => 4,
        }
    }

    /// Returns the canned justification used when this source wins.
    #[must_use]
    pub const fn justification(self) -> &'static str {
        match self {
            Self::ComponentInherent => {
                "component value takes precedence to keep brand and accessibility consistency"
            }
            Self::UserPreset => "user preset reflects an explicit user choice",
            Self::RequestDeclared => {
                "request-declared value used in the absence of a stronger design-system signal"
            }
            Self::SystemDefault => "system default used in the absence of any design-system data",
        }
    }
}

/// One candidate value for a conflicted property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictCandidate {
    /// Source of the value.
    pub source: ConflictSource,
    /// Candidate value.
    pub value: PropertyValue,
    /// Source priority (1-4).
    pub priority: u8,
}

/// Resolved conflict for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Conflicted property.
    pub property: MonitoredProperty,
    /// Present candidates in priority order.
    pub candidates: Vec<ConflictCandidate>,
    /// Winning candidate.
    pub winner: ConflictCandidate,
    /// Justification for the winner.
    pub justification: String,
}

// ============================================================================
// SECTION: Resolution Outcome
// ============================================================================

/// Result of resolving one target node.
///
/// # Invariants
/// - `success` is always true; the engine never fails a node.
/// - `confidence` lies within `tier.confidence_band()`.
/// - `attempted_tiers` ends with `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Resolved node.
    pub node_id: NodeId,
    /// Always true.
    pub success: bool,
    /// Accepted tier.
    pub tier: ResolutionTier,
    /// Method tag of the accepted tier.
    pub method: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Construction instructions.
    pub instructions: Instructions,
    /// Warnings collected by the accepted tier and the conflict resolver.
    pub warnings: Vec<ResolutionWarning>,
    /// Property conflicts detected after the tier was accepted.
    pub conflicts: Vec<Conflict>,
    /// Tiers attempted in order, ending with the accepted tier.
    pub attempted_tiers: Vec<ResolutionTier>,
    /// Elapsed resolution time in microseconds.
    pub elapsed_micros: u64,
}

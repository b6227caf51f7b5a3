// crates/design-resolver-core/src/core/summary.rs
// ============================================================================
// Module: Design Resolver Summaries
// Description: Aggregate quality report across all resolved nodes.
// Purpose: Communicate overall output quality and actionable next steps.
// Dependencies: crate::core::outcome, serde
// ============================================================================

//! ## Overview
//! A [`ResolutionSummary`] rolls up per-node outcomes into a quality grade,
//! per-tier usage, categorized warning counts, and canned recommendations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::outcome::ResolutionTier;
use crate::core::outcome::WarningCategory;

// ============================================================================
// SECTION: Quality Grade
// ============================================================================

/// Quality label derived from average confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    /// Average confidence above 0.9.
    Excellent,
    /// Average confidence in [0.75, 0.9].
    Good,
    /// Average confidence in [0.6, 0.75).
    Fair,
    /// Average confidence below 0.6.
    Poor,
}

impl QualityGrade {
    /// Grades an average confidence.
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average > 0.9 {
            Self::Excellent
        } else if average >= 0.75 {
            Self::Good
        } else if average >= 0.6 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Recommendations
// ============================================================================

/// Canned recommendation triggered by summary rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// System defaults were used at least once.
    AddTokens,
    /// More than five nodes fell back to primitive approximation.
    AddSemanticVariables,
    /// Fewer than half of the nodes matched a component exactly.
    AddComponents,
    /// Average confidence is below 0.6.
    ReviewOutput,
}

impl Recommendation {
    /// Returns the recommendation text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddTokens => {
                "Add design tokens for colors, spacing, and radii so defaults are not needed"
            }
            Self::AddSemanticVariables => {
                "Add more semantic variables; many values were approximated from raw document styles"
            }
            Self::AddComponents => {
                "Add components to the library; fewer than half of the elements matched exactly"
            }
            Self::ReviewOutput => "Review the output manually; overall confidence is low",
        }
    }
}

// ============================================================================
// SECTION: Resolution Summary
// ============================================================================

/// Aggregate report over a set of node outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Number of resolved nodes.
    pub total_nodes: usize,
    /// Node count per accepted tier.
    pub tier_counts: BTreeMap<ResolutionTier, usize>,
    /// Mean confidence across nodes (0 when empty).
    pub average_confidence: f64,
    /// Quality label.
    pub quality: QualityGrade,
    /// Warning counts per category.
    pub warning_counts: BTreeMap<WarningCategory, usize>,
    /// Triggered recommendations in rule order.
    pub recommendations: Vec<Recommendation>,
}

impl ResolutionSummary {
    /// Returns the node count for a tier.
    #[must_use]
    pub fn tier_count(&self, tier: ResolutionTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    /// Returns the share of nodes (0-1) resolved by a tier.
    #[must_use]
    pub fn tier_share(&self, tier: ResolutionTier) -> f64 {
        if self.total_nodes == 0 {
            return 0.0;
        }
        count_to_f64(self.tier_count(tier)) / count_to_f64(self.total_nodes)
    }

    /// Returns the warning count for a category.
    #[must_use]
    pub fn warning_count(&self, category: WarningCategory) -> usize {
        self.warning_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Converts a count into `f64` for ratio math.
#[allow(clippy::cast_precision_loss, reason = "Counts stay far below 2^52.")]
pub(crate) const fn count_to_f64(count: usize) -> f64 {
    count as f64
}

// crates/design-resolver-core/src/runtime/tracker.rs
// ============================================================================
// Module: Design Resolver Tracker
// Description: Aggregation of node outcomes into a resolution summary.
// Purpose: Grade overall quality and derive recommendations.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The tracker keeps running counts only; it never holds on to outcomes.
//! Recommendation rules, in order:
//!
//! - any tier-5 outcome: add tokens
//! - more than five tier-4 outcomes: add semantic variables
//! - tier-1 share below one half: add components
//! - average confidence below 0.6: review output
//!
//! An empty tracker triggers no recommendations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::QualityGrade;
use crate::core::Recommendation;
use crate::core::ResolutionOutcome;
use crate::core::ResolutionSummary;
use crate::core::ResolutionTier;
use crate::core::WarningCategory;
use crate::core::summary::count_to_f64;

// ============================================================================
// SECTION: Thresholds
// ============================================================================

/// Tier-4 count above which semantic variables are recommended.
const PRIMITIVE_RECOMMENDATION_COUNT: usize = 5;
/// Tier-1 share below which more components are recommended.
const EXACT_SHARE_FLOOR: f64 = 0.5;
/// Average confidence below which manual review is recommended.
const REVIEW_CONFIDENCE_FLOOR: f64 = 0.6;

// ============================================================================
// SECTION: Tracker
// ============================================================================

/// Running aggregate of resolution outcomes.
#[derive(Debug, Clone, Default)]
pub struct ResolutionTracker {
    /// Number of recorded outcomes.
    total: usize,
    /// Sum of recorded confidences.
    confidence_sum: f64,
    /// Outcome count per tier.
    tier_counts: BTreeMap<ResolutionTier, usize>,
    /// Warning count per category.
    warning_counts: BTreeMap<WarningCategory, usize>,
}

impl ResolutionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome.
    pub fn record(&mut self, outcome: &ResolutionOutcome) {
        self.total += 1;
        self.confidence_sum += outcome.confidence;
        *self.tier_counts.entry(outcome.tier).or_insert(0) += 1;
        for warning in &outcome.warnings {
            *self.warning_counts.entry(warning.category).or_insert(0) += 1;
        }
    }

    /// Builds the summary for everything recorded so far.
    #[must_use]
    pub fn summary(&self) -> ResolutionSummary {
        let average_confidence =
            if self.total == 0 { 0.0 } else { self.confidence_sum / count_to_f64(self.total) };
        let mut summary = ResolutionSummary {
            total_nodes: self.total,
            tier_counts: self.tier_counts.clone(),
            average_confidence,
            quality: QualityGrade::from_average(average_confidence),
            warning_counts: self.warning_counts.clone(),
            recommendations: Vec::new(),
        };
        summary.recommendations = recommendations(&summary);
        summary
    }
}

/// Summarizes a slice of outcomes.
#[must_use]
pub fn summarize(outcomes: &[ResolutionOutcome]) -> ResolutionSummary {
    let mut tracker = ResolutionTracker::new();
    for outcome in outcomes {
        tracker.record(outcome);
    }
    tracker.summary()
}

/// Evaluates the recommendation rules in order.
fn recommendations(summary: &ResolutionSummary) -> Vec<Recommendation> {
    if summary.total_nodes == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    if summary.tier_count(ResolutionTier::SystemDefault) > 0 {
        out.push(Recommendation::AddTokens);
    }
    if summary.tier_count(ResolutionTier::PrimitiveApproximation) > PRIMITIVE_RECOMMENDATION_COUNT {
        out.push(Recommendation::AddSemanticVariables);
    }
    if summary.tier_share(ResolutionTier::ExactComponent) < EXACT_SHARE_FLOOR {
        out.push(Recommendation::AddComponents);
    }
    if summary.average_confidence < REVIEW_CONFIDENCE_FLOOR {
        out.push(Recommendation::ReviewOutput);
    }
    out
}

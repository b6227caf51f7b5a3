// crates/design-resolver-core/src/core/assessment.rs
// ============================================================================
// Module: Design Resolver Assessments
// Description: Structural validation reports and confidence breakdowns.
// Purpose: Canonical types shared by the validator and the confidence scorer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ValidationReport`] summarizes structural checks over a produced tree.
//! A [`ConfidenceBreakdown`] grades a whole result against the original
//! request text with five weighted factors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Validation Report
// ============================================================================

/// Outcome of structural validation.
///
/// # Invariants
/// - `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no errors were found.
    pub valid: bool,
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    /// Blocking findings.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Builds a report from findings, deriving `valid`.
    #[must_use]
    pub fn from_findings(warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

// ============================================================================
// SECTION: Confidence Factors
// ============================================================================

/// Named factor of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceFactor {
    /// Structural validation result.
    Validation,
    /// Vagueness of the request text.
    Ambiguity,
    /// Agreement between request and output complexity.
    ComplexityMatch,
    /// Unknown roles or layout primitives in the output.
    UnknownElements,
    /// Maximum nesting depth of the output.
    NestingDepth,
}

impl ConfidenceFactor {
    /// All factors in report order.
    pub const ALL: [Self; 5] = [
        Self::Validation,
        Self::Ambiguity,
        Self::ComplexityMatch,
        Self::UnknownElements,
        Self::NestingDepth,
    ];

    /// Returns the fixed weight of the factor (weights sum to 1).
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Validation => 0.30,
            Self::Ambiguity => 0.20,
            Self::ComplexityMatch => 0.25,
            Self::UnknownElements => 0.15,
            Self::NestingDepth => 0.10,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "Validation",
            Self::Ambiguity => "Ambiguity",
            Self::ComplexityMatch => "Complexity match",
            Self::UnknownElements => "Unknown elements",
            Self::NestingDepth => "Nesting depth",
        }
    }
}

/// Score and explanation of one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Factor.
    pub factor: ConfidenceFactor,
    /// Score in [0, 1].
    pub score: f64,
    /// Short explanation.
    pub detail: String,
}

/// Weighted confidence grade for a generated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    /// Factor scores in report order.
    pub factors: Vec<FactorScore>,
    /// Weighted sum of factor scores.
    pub weighted: f64,
    /// Externally supplied self-assessment, if any.
    pub self_assessment: Option<f64>,
    /// Final score: the weighted sum, lowered to the self-assessment if smaller.
    pub overall: f64,
    /// Seven-line human-readable trace.
    pub trace: Vec<String>,
}

impl ConfidenceBreakdown {
    /// Returns the score of a factor.
    #[must_use]
    pub fn factor(&self, factor: ConfidenceFactor) -> Option<f64> {
        self.factors.iter().find(|entry| entry.factor == factor).map(|entry| entry.score)
    }

    /// Returns the trace joined with newlines.
    #[must_use]
    pub fn render(&self) -> String {
        self.trace.join("\n")
    }
}

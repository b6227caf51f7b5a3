// crates/design-resolver-core/src/runtime/confidence.rs
// ============================================================================
// Module: Design Resolver Confidence Scorer
// Description: Five-factor plausibility grade of a generated tree.
// Purpose: Compare what was built with what the request text asked for.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The scorer runs post hoc over a whole produced tree, its validation
//! report, and the original request text. Factor scores are clamped to
//! [0, 1] and combined with fixed weights. An external self-assessment can
//! only lower the final score.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::ConfidenceBreakdown;
use crate::core::ConfidenceFactor;
use crate::core::FactorScore;
use crate::core::QualityGrade;
use crate::core::TargetNode;
use crate::core::ValidationReport;
use crate::core::summary::count_to_f64;

// ============================================================================
// SECTION: Vocabulary
// ============================================================================

/// Words that signal an underspecified request.
const VAGUE_TERMS: &[&str] = &[
    "nice", "good", "modern", "clean", "simple", "cool", "pretty", "better", "some", "something",
    "stuff", "thing", "things", "whatever", "etc", "maybe", "somehow", "kinda", "sorta",
];

/// Semantic roles the scorer recognizes.
const KNOWN_ROLES: &[&str] = &[
    "alert", "avatar", "badge", "banner", "button", "card", "checkbox", "chip", "column",
    "container", "dialog", "divider", "dropdown", "footer", "form", "header", "heading", "icon",
    "image", "input", "label", "link", "list", "list-item", "menu", "modal", "nav", "navbar",
    "progress", "radio", "row", "search", "section", "select", "sidebar", "slider", "switch",
    "tab", "table", "tabs", "tag", "text", "textarea", "title", "toggle", "tooltip",
];

/// Layout primitive tags the scorer recognizes.
const KNOWN_ELEMENTS: &[&str] = &[
    "component", "ellipse", "frame", "grid", "group", "hstack", "icon", "image", "instance",
    "line", "rectangle", "stack", "text", "vector", "vstack",
];

/// Words that join separately requested elements.
const CONNECTORS: &[&str] = &["and", "with", "plus", "containing", "including"];

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Everything the scorer grades.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    /// Original free-text request.
    pub request_text: &'a str,
    /// Produced tree root.
    pub root: &'a TargetNode,
    /// Structural validation of the tree.
    pub validation: &'a ValidationReport,
    /// External self-assessment in [0, 1], if any.
    pub self_assessment: Option<f64>,
}

// ============================================================================
// SECTION: Scorer
// ============================================================================

/// Weighted five-factor confidence scorer.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    /// Known semantic roles.
    known_roles: BTreeSet<String>,
    /// Known layout primitive tags.
    known_elements: BTreeSet<String>,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self {
            known_roles: KNOWN_ROLES.iter().map(|role| (*role).to_string()).collect(),
            known_elements: KNOWN_ELEMENTS.iter().map(|element| (*element).to_string()).collect(),
        }
    }
}

impl ConfidenceScorer {
    /// Creates a scorer with the built-in vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds roles to the known-role vocabulary.
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known_roles.extend(roles.into_iter().map(|role| role.as_ref().to_ascii_lowercase()));
        self
    }

    /// Grades a produced tree against its request.
    #[must_use]
    pub fn score(&self, input: &ScoringInput<'_>) -> ConfidenceBreakdown {
        let words = tokenize(input.request_text);
        let factors = vec![
            validation_factor(input.validation),
            ambiguity_factor(&words),
            self.complexity_factor(&words, input.root),
            self.unknown_elements_factor(input.root),
            depth_factor(input.root.depth()),
        ];
        let weighted = factors
            .iter()
            .map(|entry| entry.factor.weight() * entry.score)
            .sum::<f64>()
            .clamp(0.0, 1.0);
        let self_assessment =
            input.self_assessment.map(|value| if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) });
        let overall = self_assessment.map_or(weighted, |external| weighted.min(external));
        let trace = render_trace(&factors, weighted, self_assessment, overall);
        ConfidenceBreakdown {
            factors,
            weighted,
            self_assessment,
            overall,
            trace,
        }
    }

    /// Compares request complexity with produced tree size.
    fn complexity_factor(&self, words: &[String], root: &TargetNode) -> FactorScore {
        let mentions = words.iter().filter(|word| self.is_role_word(word)).count();
        let connectors = words.iter().filter(|word| CONNECTORS.contains(&word.as_str())).count();
        let expected = mentions.max(1) + connectors;
        let produced = root.node_count();
        let low = count_to_f64(expected.min(produced));
        let high = count_to_f64(expected.max(produced));
        let score = if high == 0.0 { 1.0 } else { low / high };
        FactorScore {
            factor: ConfidenceFactor::ComplexityMatch,
            score: score.clamp(0.0, 1.0),
            detail: format!("expected about {expected} elements, produced {produced}"),
        }
    }

    /// Returns true when a word names a known role, singular or plural.
    fn is_role_word(&self, word: &str) -> bool {
        self.known_roles.contains(word)
            || word.strip_suffix('s').is_some_and(|singular| self.known_roles.contains(singular))
    }

    /// Penalizes unknown roles and unknown layout primitives in the tree.
    fn unknown_elements_factor(&self, root: &TargetNode) -> FactorScore {
        let mut unknown_role = false;
        let mut unknown_element = false;
        root.walk(&mut |node| {
            unknown_role |= !self.known_roles.contains(&node.role.trim().to_ascii_lowercase());
            unknown_element |= !self.known_elements.contains(&node.element.trim().to_ascii_lowercase());
        });
        let mut score = 1.0;
        let mut notes = Vec::new();
        if unknown_role {
            score -= 0.2;
            notes.push("unknown role");
        }
        if unknown_element {
            score -= 0.15;
            notes.push("unknown layout primitive");
        }
        FactorScore {
            factor: ConfidenceFactor::UnknownElements,
            score: f64::clamp(score, 0.0, 1.0),
            detail: if notes.is_empty() { "all elements known".to_string() } else { notes.join(", ") },
        }
    }
}

// ============================================================================
// SECTION: Factors
// ============================================================================

/// Lowercased words with surrounding punctuation removed; commas count as `and`.
fn tokenize(text: &str) -> Vec<String> {
    text.replace(',', " and ")
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-').to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Scores the validation report.
fn validation_factor(report: &ValidationReport) -> FactorScore {
    let (score, detail) = if report.valid && report.warnings.is_empty() {
        (1.0, "valid, no warnings".to_string())
    } else if report.valid {
        let count = count_to_f64(report.warnings.len());
        (f64::max(0.5, 0.05f64.mul_add(-count, 0.8)), format!("valid, {} warnings", report.warnings.len()))
    } else {
        let count = count_to_f64(report.errors.len());
        (f64::max(0.1, 0.1f64.mul_add(-count, 0.3)), format!("invalid, {} errors", report.errors.len()))
    };
    FactorScore {
        factor: ConfidenceFactor::Validation,
        score,
        detail,
    }
}

/// Penalizes vague wording and very short requests.
fn ambiguity_factor(words: &[String]) -> FactorScore {
    let vague = words.iter().filter(|word| VAGUE_TERMS.contains(&word.as_str())).count();
    let short = words.len() < 3;
    let mut score = 0.1f64.mul_add(-count_to_f64(vague), 1.0);
    if short {
        score -= 0.3;
    }
    FactorScore {
        factor: ConfidenceFactor::Ambiguity,
        score: score.clamp(0.0, 1.0),
        detail: format!("{vague} vague terms{}", if short { ", short request" } else { "" }),
    }
}

/// Bands the maximum tree depth; shallow trees score higher.
fn depth_factor(depth: usize) -> FactorScore {
    let score = match depth {
        0 ..= 3 => 1.0,
        4 ..= 5 => 0.95,
        6 ..= 7 => 0.85,
        8 ..= 10 => 0.7,
        _ => 0.5,
    };
    FactorScore {
        factor: ConfidenceFactor::NestingDepth,
        score,
        detail: format!("max depth {depth}"),
    }
}

// ============================================================================
// SECTION: Trace
// ============================================================================

/// Renders the seven-line breakdown.
fn render_trace(
    factors: &[FactorScore],
    weighted: f64,
    self_assessment: Option<f64>,
    overall: f64,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(7);
    lines.push(match self_assessment {
        Some(external) => format!(
            "Overall confidence: {:.0}% (weighted {:.0}%, self-assessment {:.0}%)",
            overall * 100.0,
            weighted * 100.0,
            external * 100.0
        ),
        None => format!("Overall confidence: {:.0}%", overall * 100.0),
    });
    for entry in factors {
        lines.push(format!(
            "  {} ({:.0}%): {:.0}% - {}",
            entry.factor.label(),
            entry.factor.weight() * 100.0,
            entry.score * 100.0,
            entry.detail
        ));
    }
    let weakest = factors
        .iter()
        .min_by(|left, right| left.score.total_cmp(&right.score))
        .map_or("none", |entry| entry.factor.label());
    lines.push(format!(
        "Summary: {} quality; weakest factor is {weakest}",
        QualityGrade::from_average(overall)
    ));
    lines
}

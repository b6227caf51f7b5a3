// crates/design-resolver-core/tests/confidence_scoring.rs
// ============================================================================
// Module: Confidence Scoring Tests
// Description: Structural validation and the five-factor confidence grade.
// Purpose: Verify factor arithmetic, rule isolation, and the self-assessment cap.
// ============================================================================

//! ## Overview
//! Grades small generated trees against their request text.

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

use design_resolver_core::ConfidenceFactor;
use design_resolver_core::ConfidenceScorer;
use design_resolver_core::ScoringInput;
use design_resolver_core::StructuralValidator;
use design_resolver_core::StyleValue;
use design_resolver_core::TargetNode;
use design_resolver_core::ValidationReport;
use design_resolver_core::runtime::ValidationRule;
use design_resolver_core::runtime::ValidationRuleError;
use design_resolver_core::runtime::validation::Findings;
use proptest::prelude::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rule that always fails internally.
struct BrokenRule;

impl ValidationRule for BrokenRule {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn check(&self, _root: &TargetNode, _findings: &mut Findings) -> Result<(), ValidationRuleError> {
        Err(ValidationRuleError::Internal("boom".to_string()))
    }
}

fn chain(depth: usize) -> TargetNode {
    let mut node = TargetNode::new(format!("n{depth}"), "container");
    for level in (1 .. depth).rev() {
        let mut parent = TargetNode::new(format!("n{level}"), "container");
        parent.children.push(node);
        node = parent;
    }
    node
}

fn score(text: &str, root: &TargetNode, self_assessment: Option<f64>) -> design_resolver_core::ConfidenceBreakdown {
    let validation = StructuralValidator::new().validate(root);
    ConfidenceScorer::new().score(&ScoringInput {
        request_text: text,
        root,
        validation: &validation,
        self_assessment,
    })
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn clean_tree_validates() {
    let report = StructuralValidator::new().validate(&TargetNode::new("b", "button"));

    assert!(report.valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn missing_role_and_negative_padding_are_errors() {
    let mut node = TargetNode::new("bad", " ");
    node.padding = Some(StyleValue::Literal(-2.0));

    let report = StructuralValidator::new().validate(&node);

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn text_without_content_and_bad_color_hint_are_warnings() {
    let mut node = TargetNode::new("label", "text");
    node.element = "text".to_string();
    node.style_hints = vec!["bg-#ZZZZZZ".to_string()];

    let report = StructuralValidator::new().validate(&node);

    assert!(report.valid);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn deep_tree_draws_a_warning() {
    let report = StructuralValidator::new().validate(&chain(12));

    assert!(report.valid);
    assert!(report.warnings.iter().any(|warning| warning.contains("depth 12")));
}

#[test]
fn failing_rule_is_isolated() {
    let mut node = TargetNode::new("bad", "");
    node.padding = Some(StyleValue::Literal(-1.0));
    let validator = StructuralValidator::new().with_rule(Box::new(BrokenRule));

    let report = validator.validate(&node);

    assert!(report.warnings.iter().any(|warning| warning.contains("rule `broken` skipped")));
    assert_eq!(report.errors.len(), 2);
}

// ============================================================================
// SECTION: Scoring
// ============================================================================

#[test]
fn single_word_request_is_ambiguous() {
    let breakdown = score("button", &TargetNode::new("b", "button"), None);

    assert!(common::approx(breakdown.factor(ConfidenceFactor::Validation).unwrap(), 1.0));
    assert!(common::approx(breakdown.factor(ConfidenceFactor::Ambiguity).unwrap(), 0.7));
    assert!(common::approx(breakdown.factor(ConfidenceFactor::ComplexityMatch).unwrap(), 1.0));
    assert!(common::approx(breakdown.weighted, 0.94));
    assert_eq!(breakdown.trace.len(), 7);
}

#[test]
fn self_assessment_only_lowers() {
    let root = TargetNode::new("b", "button");

    let lowered = score("button", &root, Some(0.5));
    let ignored = score("button", &root, Some(1.0));

    assert!(common::approx(lowered.overall, 0.5));
    assert!(common::approx(ignored.overall, ignored.weighted));
}

#[test]
fn vague_words_and_unknown_roles_are_penalized() {
    let mut root = TargetNode::new("root", "gizmo");
    root.element = "blob".to_string();

    let breakdown = score("make something nice and modern", &root, None);

    assert!(common::approx(breakdown.factor(ConfidenceFactor::Ambiguity).unwrap(), 0.7));
    assert!(common::approx(breakdown.factor(ConfidenceFactor::UnknownElements).unwrap(), 0.65));
}

#[test]
fn complexity_compares_mentions_with_tree_size() {
    let mut root = TargetNode::new("form", "form");
    root.children = vec![TargetNode::new("name", "input"), TargetNode::new("submit", "button")];

    let breakdown = score("a form with an input and a button", &root, None);

    assert!(common::approx(breakdown.factor(ConfidenceFactor::ComplexityMatch).unwrap(), 0.6));
}

#[test]
fn extra_roles_extend_the_known_vocabulary() {
    let node = TargetNode::new("hero", "hero-banner");
    let validation = StructuralValidator::new().validate(&node);
    let input = ScoringInput {
        request_text: "a hero-banner for the landing page",
        root: &node,
        validation: &validation,
        self_assessment: None,
    };

    let default = ConfidenceScorer::new().score(&input);
    let extended = ConfidenceScorer::new().with_roles(["Hero-Banner"]).score(&input);

    assert!(common::approx(default.factor(ConfidenceFactor::UnknownElements).unwrap(), 0.8));
    assert!(common::approx(extended.factor(ConfidenceFactor::UnknownElements).unwrap(), 1.0));
    assert!(extended.overall > default.overall);
}

#[test]
fn depth_bands() {
    let shallow = score("a tall stack of containers", &chain(3), None);
    let deep = score("a tall stack of containers", &chain(11), None);

    assert!(common::approx(shallow.factor(ConfidenceFactor::NestingDepth).unwrap(), 1.0));
    assert!(common::approx(deep.factor(ConfidenceFactor::NestingDepth).unwrap(), 0.5));
}

#[test]
fn invalid_report_scores_low() {
    let report = ValidationReport::from_findings(Vec::new(), vec!["e1".to_string(), "e2".to_string()]);
    let root = TargetNode::new("b", "button");
    let breakdown = ConfidenceScorer::new().score(&ScoringInput {
        request_text: "a primary button",
        root: &root,
        validation: &report,
        self_assessment: None,
    });

    assert!(common::approx(breakdown.factor(ConfidenceFactor::Validation).unwrap(), 0.1));
}

proptest! {
    #[test]
    fn overall_never_exceeds_self_assessment(
        text in "[a-z ,]{0,40}",
        assessment in prop::num::f64::ANY,
    ) {
        let root = TargetNode::new("b", "button");
        let breakdown = score(&text, &root, Some(assessment));
        prop_assert!((0.0 ..= 1.0).contains(&breakdown.overall));
        prop_assert!(breakdown.overall <= breakdown.self_assessment.unwrap() + common::EPSILON);
    }
}

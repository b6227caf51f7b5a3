// crates/design-resolver-core/src/runtime/validation.rs
// ============================================================================
// Module: Design Resolver Structural Validation
// Description: Independent structural rules over a produced node tree.
// Purpose: Feed the confidence scorer's validation factor.
// Dependencies: crate::{core, runtime::tokens}, thiserror
// ============================================================================

//! ## Overview
//! Each rule inspects the whole tree and records warnings or errors. A rule
//! that fails internally is reported as a warning naming the rule; the
//! remaining rules still run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Rgb;
use crate::core::StyleValue;
use crate::core::TargetNode;
use crate::core::TokenKind;
use crate::core::ValidationReport;
use crate::runtime::tokens::HintTarget;
use crate::runtime::tokens::parse_hint;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Depth above which a tree draws a warning.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Internal rule failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ValidationRuleError {
    /// Rule could not evaluate the tree.
    #[error("validation rule failed: {0}")]
    Internal(String),
}

/// Findings accumulated by rules.
#[derive(Debug, Default)]
pub struct Findings {
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    /// Blocking findings.
    pub errors: Vec<String>,
}

/// One structural rule.
pub trait ValidationRule: Send + Sync {
    /// Stable rule name.
    fn name(&self) -> &'static str;

    /// Checks the tree, appending findings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationRuleError`] when the rule cannot evaluate the tree.
    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError>;
}

/// Every node carries a non-empty role.
struct RolePresent;

impl ValidationRule for RolePresent {
    fn name(&self) -> &'static str {
        "role_present"
    }

    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError> {
        root.walk(&mut |node| {
            if node.role.trim().is_empty() {
                findings.errors.push(format!("node `{}` has no role", node.id));
            }
        });
        Ok(())
    }
}

/// Text elements carry text.
struct TextElementsHaveText;

impl ValidationRule for TextElementsHaveText {
    fn name(&self) -> &'static str {
        "text_elements_have_text"
    }

    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError> {
        root.walk(&mut |node| {
            let is_text = node.element.eq_ignore_ascii_case("text");
            if is_text && node.text.as_deref().is_none_or(|text| text.trim().is_empty()) {
                findings.warnings.push(format!("text node `{}` has no text", node.id));
            }
        });
        Ok(())
    }
}

/// Literal dimensions are finite and non-negative.
struct NonNegativeDimensions;

impl ValidationRule for NonNegativeDimensions {
    fn name(&self) -> &'static str {
        "non_negative_dimensions"
    }

    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError> {
        root.walk(&mut |node| {
            let dimensions = [
                ("width", &node.width),
                ("height", &node.height),
                ("padding", &node.padding),
                ("item_spacing", &node.item_spacing),
                ("corner_radius", &node.corner_radius),
                ("font_size", &node.font_size),
            ];
            for (label, value) in dimensions {
                if let Some(value) = value.as_ref().and_then(StyleValue::literal)
                    && (!value.is_finite() || *value < 0.0)
                {
                    findings.errors.push(format!("node `{}` has invalid {label} {value}", node.id));
                }
            }
        });
        Ok(())
    }
}

/// Color hints written as hex literals parse.
struct ParseableColorHints;

impl ValidationRule for ParseableColorHints {
    fn name(&self) -> &'static str {
        "parseable_color_hints"
    }

    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError> {
        root.walk(&mut |node| {
            for raw in &node.style_hints {
                let Ok(hint) = parse_hint(raw) else {
                    continue;
                };
                let literal = hint.query.trim_start_matches('[').trim_end_matches(']');
                if is_color_target(hint.target)
                    && literal.starts_with('#')
                    && Rgb::from_hex(literal).is_err()
                {
                    findings.warnings.push(format!("node `{}` has unparseable color hint `{raw}`", node.id));
                }
            }
        });
        Ok(())
    }
}

/// Returns true when a hint target takes a color.
fn is_color_target(target: HintTarget) -> bool {
    target.token_kind() == TokenKind::Color
}

/// Tree depth stays within a bound.
struct BoundedDepth {
    /// Maximum depth without a warning.
    max_depth: usize,
}

impl ValidationRule for BoundedDepth {
    fn name(&self) -> &'static str {
        "bounded_depth"
    }

    fn check(&self, root: &TargetNode, findings: &mut Findings) -> Result<(), ValidationRuleError> {
        let mut deepest = 0_usize;
        let mut stack = vec![(root, 1_usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let next = depth
                .checked_add(1)
                .ok_or_else(|| ValidationRuleError::Internal("depth overflow".to_string()))?;
            stack.extend(node.children.iter().map(|child| (child, next)));
        }
        if deepest > self.max_depth {
            findings
                .warnings
                .push(format!("tree depth {deepest} exceeds recommended maximum {}", self.max_depth));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Runs structural rules in isolation.
pub struct StructuralValidator {
    /// Rules in evaluation order.
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(RolePresent),
                Box::new(TextElementsHaveText),
                Box::new(NonNegativeDimensions),
                Box::new(ParseableColorHints),
                Box::new(BoundedDepth {
                    max_depth: DEFAULT_MAX_DEPTH,
                }),
            ],
        }
    }
}

impl StructuralValidator {
    /// Creates a validator with the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validates a tree.
    #[must_use]
    pub fn validate(&self, root: &TargetNode) -> ValidationReport {
        let mut findings = Findings::default();
        for rule in &self.rules {
            let mut local = Findings::default();
            match rule.check(root, &mut local) {
                Ok(()) => {
                    findings.warnings.append(&mut local.warnings);
                    findings.errors.append(&mut local.errors);
                }
                Err(err) => {
                    findings.warnings.push(format!("rule `{}` skipped: {err}", rule.name()));
                }
            }
        }
        ValidationReport::from_findings(findings.warnings, findings.errors)
    }
}

// crates/design-resolver-core/src/core/node.rs
// ============================================================================
// Module: Design Resolver Target Nodes
// Description: Requested UI elements produced by the upstream decision phase.
// Purpose: Describe what to build, independent of any component library.
// Dependencies: crate::core::{color, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`TargetNode`] is one element to realize. Nodes arrive as a tree,
//! are read-only during resolution, and are never mutated by the resolver.
//! Every styling attribute is a [`StyleValue`]: either a literal or a named
//! reference to be bound later, never both.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::color::Rgb;
use crate::core::identifiers::NodeId;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Auto-layout mode of a node or component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// No auto-layout; children are absolutely positioned.
    #[default]
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// Alignment of children along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisAlign {
    /// Align to the start of the axis.
    Start,
    /// Center on the axis.
    Center,
    /// Align to the end of the axis.
    End,
    /// Distribute remaining space between children.
    SpaceBetween,
}

/// Layout request of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Auto-layout mode.
    #[serde(default)]
    pub mode: LayoutMode,
    /// Alignment along the primary axis, when requested.
    #[serde(default)]
    pub primary_align: Option<AxisAlign>,
    /// Alignment along the counter axis, when requested.
    #[serde(default)]
    pub counter_align: Option<AxisAlign>,
}

// ============================================================================
// SECTION: Style Values
// ============================================================================

/// Literal value or deferred named reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleValue<T> {
    /// Concrete value supplied by the request.
    Literal(T),
    /// Name of a token to be bound during resolution.
    Reference(String),
}

impl<T> StyleValue<T> {
    /// Returns the literal value, if any.
    #[must_use]
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Reference(_) => None,
        }
    }

    /// Returns the reference name, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Reference(name) => Some(name),
        }
    }
}

// ============================================================================
// SECTION: Target Node
// ============================================================================

/// One requested UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    /// Node identifier.
    pub id: NodeId,
    /// Semantic role (open vocabulary, e.g. `button`).
    pub role: String,
    /// Layout primitive tag (e.g. `frame`, `text`, `stack`).
    #[serde(default = "default_element")]
    pub element: String,
    /// Layout request.
    #[serde(default)]
    pub layout: LayoutSpec,
    /// Spacing between children.
    #[serde(default)]
    pub item_spacing: Option<StyleValue<f64>>,
    /// Uniform padding.
    #[serde(default)]
    pub padding: Option<StyleValue<f64>>,
    /// Fill color.
    #[serde(default)]
    pub fill: Option<StyleValue<Rgb>>,
    /// Stroke color.
    #[serde(default)]
    pub stroke: Option<StyleValue<Rgb>>,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: Option<StyleValue<f64>>,
    /// Requested width.
    #[serde(default)]
    pub width: Option<StyleValue<f64>>,
    /// Requested height.
    #[serde(default)]
    pub height: Option<StyleValue<f64>>,
    /// Requested font size.
    #[serde(default)]
    pub font_size: Option<StyleValue<f64>>,
    /// Literal text content.
    #[serde(default)]
    pub text: Option<String>,
    /// Requested variant name.
    #[serde(default)]
    pub variant: Option<String>,
    /// Additional requested component properties (semantic key to value).
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Atomic style hints (e.g. `bg-primary`, `p-md`).
    #[serde(default)]
    pub style_hints: Vec<String>,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<Self>,
}

/// Default layout primitive tag.
fn default_element() -> String {
    "frame".to_string()
}

impl TargetNode {
    /// Creates a childless node with only a role set.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            element: default_element(),
            layout: LayoutSpec::default(),
            item_spacing: None,
            padding: None,
            fill: None,
            stroke: None,
            corner_radius: None,
            width: None,
            height: None,
            font_size: None,
            text: None,
            variant: None,
            properties: BTreeMap::new(),
            style_hints: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the requested component properties, including the variant.
    ///
    /// The variant is exposed under the `variant` key unless the explicit
    /// property map already carries one.
    #[must_use]
    pub fn requested_properties(&self) -> BTreeMap<String, String> {
        let mut out = self.properties.clone();
        if let Some(variant) = &self.variant {
            out.entry("variant".to_string()).or_insert_with(|| variant.clone());
        }
        out
    }

    /// Returns the literal fill color, if any.
    #[must_use]
    pub fn literal_fill(&self) -> Option<Rgb> {
        self.fill.as_ref().and_then(StyleValue::literal).copied()
    }

    /// Returns the literal stroke color, if any.
    #[must_use]
    pub fn literal_stroke(&self) -> Option<Rgb> {
        self.stroke.as_ref().and_then(StyleValue::literal).copied()
    }

    /// Returns the literal padding, if any.
    #[must_use]
    pub fn literal_padding(&self) -> Option<f64> {
        self.padding.as_ref().and_then(StyleValue::literal).copied()
    }

    /// Returns the literal item spacing, if any.
    #[must_use]
    pub fn literal_item_spacing(&self) -> Option<f64> {
        self.item_spacing.as_ref().and_then(StyleValue::literal).copied()
    }

    /// Returns the literal corner radius, if any.
    #[must_use]
    pub fn literal_corner_radius(&self) -> Option<f64> {
        self.corner_radius.as_ref().and_then(StyleValue::literal).copied()
    }

    /// Returns the maximum depth of the tree rooted at this node (a leaf is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Returns the total number of nodes in the tree rooted at this node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Visits nodes in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

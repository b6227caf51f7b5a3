// crates/design-resolver-core/src/core/inventory.rs
// ============================================================================
// Module: Design Resolver Inventory
// Description: Read-only snapshot of the host document's components and tokens.
// Purpose: Provide the candidate pool that every resolution tier draws from.
// Dependencies: crate::core::{color, identifiers, node, style}, serde
// ============================================================================

//! ## Overview
//! The inventory is produced by an external document scan and is immutable
//! for the duration of a resolution run. Component order is significant:
//! tiers preserve it when ranking ties.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::color::Rgb;
use crate::core::identifiers::ComponentId;
use crate::core::identifiers::TokenId;
use crate::core::node::AxisAlign;
use crate::core::node::LayoutMode;
use crate::core::style::MonitoredProperty;
use crate::core::style::StyleTable;

// ============================================================================
// SECTION: Components
// ============================================================================

/// Structural summary of a component's internals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentAnatomy {
    /// Auto-layout mode of the component root.
    #[serde(default)]
    pub layout_mode: LayoutMode,
    /// Alignment along the primary axis.
    #[serde(default)]
    pub primary_align: Option<AxisAlign>,
    /// Alignment along the counter axis.
    #[serde(default)]
    pub counter_align: Option<AxisAlign>,
    /// Number of descendant layers.
    #[serde(default)]
    pub descendant_count: usize,
    /// True when the component is (or wraps) an icon.
    #[serde(default)]
    pub has_icon: bool,
    /// True when the component has a text-capable descendant.
    #[serde(default)]
    pub has_label: bool,
    /// Approximate width in pixels.
    #[serde(default)]
    pub width: f64,
    /// Approximate height in pixels.
    #[serde(default)]
    pub height: f64,
}

impl ComponentAnatomy {
    /// Returns why the component cannot take an override of `property`.
    ///
    /// Icons keep their own fill; padding needs auto-layout to take effect.
    #[must_use]
    pub fn override_violation(&self, property: MonitoredProperty) -> Option<&'static str> {
        match property {
            MonitoredProperty::Fill if self.has_icon => Some("fill override on an icon component"),
            MonitoredProperty::Padding if self.layout_mode == LayoutMode::None => {
                Some("padding override without auto-layout")
            }
            _ => None,
        }
    }
}

/// Library component available for instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Component identifier.
    pub id: ComponentId,
    /// Display name (e.g. `Button/Primary`).
    pub name: String,
    /// Declared semantic role, when the library annotates one.
    #[serde(default)]
    pub role: Option<String>,
    /// Structural summary.
    #[serde(default)]
    pub anatomy: ComponentAnatomy,
    /// Variant property name to allowed option values.
    #[serde(default)]
    pub variant_properties: BTreeMap<String, BTreeSet<String>>,
    /// Values the component carries for monitored properties.
    #[serde(default)]
    pub inherent: StyleTable,
}

impl ComponentDescriptor {
    /// Creates a component with an empty anatomy and no variant properties.
    #[must_use]
    pub fn new(id: impl Into<ComponentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
            anatomy: ComponentAnatomy::default(),
            variant_properties: BTreeMap::new(),
            inherent: StyleTable::new(),
        }
    }

    /// Returns true when the declared role equals `role` (case-insensitive).
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref().is_some_and(|declared| declared.trim().eq_ignore_ascii_case(role.trim()))
    }

    /// Returns the literal native option matching `(key, value)` case-insensitively.
    #[must_use]
    pub fn literal_option(&self, key: &str, value: &str) -> Option<(&str, &str)> {
        self.variant_properties.iter().find_map(|(name, options)| {
            if !name.eq_ignore_ascii_case(key) {
                return None;
            }
            options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(value))
                .map(|option| (name.as_str(), option.as_str()))
        })
    }
}

// ============================================================================
// SECTION: Tokens
// ============================================================================

/// Resolved kind of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Color token.
    Color,
    /// Numeric (dimension) token.
    Number,
}

/// Concrete value of a design token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenValue {
    /// Color value.
    Color(Rgb),
    /// Numeric value.
    Number(f64),
}

impl TokenValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Color(_) => TokenKind::Color,
            Self::Number(_) => TokenKind::Number,
        }
    }
}

/// Named design value stored in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Token identifier.
    pub id: TokenId,
    /// Token name (e.g. `color/brand/primary`).
    pub name: String,
    /// Concrete value.
    pub value: TokenValue,
    /// Usage scope tags (e.g. `fill`, `gap`, `corner_radius`).
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Number of bindings observed in the document.
    #[serde(default)]
    pub usage_count: u32,
}

impl TokenDescriptor {
    /// Returns the resolved kind of the token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.value.kind()
    }
}

// ============================================================================
// SECTION: Inventory
// ============================================================================

/// Immutable snapshot of components and tokens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Components in document order.
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
    /// Tokens in document order.
    #[serde(default)]
    pub tokens: Vec<TokenDescriptor>,
}

impl Inventory {
    /// Creates an inventory from components and tokens.
    #[must_use]
    pub const fn new(components: Vec<ComponentDescriptor>, tokens: Vec<TokenDescriptor>) -> Self {
        Self {
            components,
            tokens,
        }
    }

    /// Returns the component with the given identifier.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|component| &component.id == id)
    }

    /// Returns tokens of the given kind, in inventory order.
    pub fn tokens_of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &TokenDescriptor> {
        self.tokens.iter().filter(move |token| token.kind() == kind)
    }
}

// crates/design-resolver-core/src/core/document.rs
// ============================================================================
// Module: Design Resolver Document Snapshot
// Description: Explicit, injected view of the host document's raw styling.
// Purpose: Feed the primitive frequency scan without ambient global state.
// Dependencies: crate::core::{color, identifiers}, serde
// ============================================================================

//! ## Overview
//! The host passes a [`DocumentSnapshot`] into the scanner. It carries only
//! the raw (unbound) style values of each layer, which is all the frequency
//! scan needs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::color::Rgb;
use crate::core::identifiers::DocumentId;

// ============================================================================
// SECTION: Scene Nodes
// ============================================================================

/// Raw styling of one document layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneNode {
    /// Solid fill colors.
    #[serde(default)]
    pub fills: Vec<Rgb>,
    /// Solid stroke colors.
    #[serde(default)]
    pub strokes: Vec<Rgb>,
    /// Padding values (any of top/right/bottom/left that are set).
    #[serde(default)]
    pub padding: Vec<f64>,
    /// Spacing between children.
    #[serde(default)]
    pub item_spacing: Option<f64>,
    /// Corner radius.
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Child layers.
    #[serde(default)]
    pub children: Vec<Self>,
}

// ============================================================================
// SECTION: Document Snapshot
// ============================================================================

/// Read-only document snapshot handed to the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Document identity used as the scan cache key.
    pub document_id: DocumentId,
    /// Top-level layers (pages and frames).
    #[serde(default)]
    pub roots: Vec<SceneNode>,
}

impl DocumentSnapshot {
    /// Creates a snapshot from its identity and top-level layers.
    #[must_use]
    pub fn new(document_id: impl Into<DocumentId>, roots: Vec<SceneNode>) -> Self {
        Self {
            document_id: document_id.into(),
            roots,
        }
    }
}

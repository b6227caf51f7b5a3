// crates/design-resolver-core/src/runtime/tiers/mod.rs
// ============================================================================
// Module: Design Resolver Tiers
// Description: The five fallback strategies and their shared context.
// Purpose: Keep each tier's scoring rule isolated behind one calling shape.
// Dependencies: crate::{core, interfaces, runtime}, thiserror
// ============================================================================

//! ## Overview
//! Each tier either accepts a node, returning instructions plus a raw
//! confidence, or declines. Tiers that call external collaborators may also
//! fail; the engine treats a failure exactly like a decline.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod defaults;
pub mod exact;
pub mod primitive;
pub mod structural;
pub mod token_construction;

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ComponentId;
use crate::core::DocumentSnapshot;
use crate::core::Instructions;
use crate::core::Inventory;
use crate::core::ResolutionWarning;
use crate::core::TargetNode;
use crate::interfaces::Classifier;
use crate::interfaces::ClassifierError;
use crate::runtime::engine::EngineConfig;
use crate::runtime::frequency::PrimitiveScanner;
use crate::runtime::mapper::MapperError;
use crate::runtime::mapper::PropertyMapper;
use crate::runtime::tokens::AliasTable;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Errors raised by a tier; the engine counts them as declines.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum TierError {
    /// Property mapping failed.
    #[error(transparent)]
    Mapper(#[from] MapperError),
    /// Classification service failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Read-only inputs shared by every tier for one node.
pub struct TierContext<'a> {
    /// Node being resolved.
    pub node: &'a TargetNode,
    /// Inventory snapshot.
    pub inventory: &'a Inventory,
    /// Document snapshot for primitive scans.
    pub document: &'a DocumentSnapshot,
    /// Engine thresholds and defaults.
    pub config: &'a EngineConfig,
    /// Token alias table.
    pub aliases: &'a AliasTable,
    /// Optional classification service.
    pub classifier: Option<&'a dyn Classifier>,
    /// Property mapper.
    pub mapper: &'a PropertyMapper,
    /// Primitive frequency scanner.
    pub scanner: &'a PrimitiveScanner,
}

/// Accepted tier result before conflict resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TierAcceptance {
    /// Raw confidence; the engine clamps it into the tier band.
    pub confidence: f64,
    /// Construction instructions.
    pub instructions: Instructions,
    /// Warnings collected by the tier.
    pub warnings: Vec<ResolutionWarning>,
    /// Instantiated component, when the instructions instantiate one.
    pub component: Option<ComponentId>,
}

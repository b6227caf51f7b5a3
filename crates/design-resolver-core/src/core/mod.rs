// crates/design-resolver-core/src/core/mod.rs
// ============================================================================
// Module: Design Resolver Core Types
// Description: Canonical request, inventory, outcome, and report structures.
// Purpose: Provide stable, serializable types for the resolution engine.
// Dependencies: palette, serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Core types define target nodes, the inventory snapshot, document
//! snapshots, learned property mappings, resolution outcomes, and summary
//! reports. Any surface built on the resolver consumes these types.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod assessment;
pub mod color;
pub mod document;
pub mod hashing;
pub mod identifiers;
pub mod inventory;
pub mod mapping;
pub mod node;
pub mod outcome;
pub mod style;
pub mod summary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assessment::ConfidenceBreakdown;
pub use assessment::ConfidenceFactor;
pub use assessment::FactorScore;
pub use assessment::ValidationReport;
pub use color::ColorParseError;
pub use color::Rgb;
pub use color::perceptual_distance;
pub use document::DocumentSnapshot;
pub use document::SceneNode;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::ComponentId;
pub use identifiers::DocumentId;
pub use identifiers::NodeId;
pub use identifiers::TokenId;
pub use inventory::ComponentAnatomy;
pub use inventory::ComponentDescriptor;
pub use inventory::Inventory;
pub use inventory::TokenDescriptor;
pub use inventory::TokenKind;
pub use inventory::TokenValue;
pub use mapping::ComponentMapping;
pub use mapping::MappingEntry;
pub use mapping::PropertyCategory;
pub use mapping::ValueMapping;
pub use node::AxisAlign;
pub use node::LayoutMode;
pub use node::LayoutSpec;
pub use node::StyleValue;
pub use node::TargetNode;
pub use outcome::Conflict;
pub use outcome::ConflictCandidate;
pub use outcome::ConflictSource;
pub use outcome::ContainerStyling;
pub use outcome::Instructions;
pub use outcome::ResolutionOutcome;
pub use outcome::ResolutionTier;
pub use outcome::ResolutionWarning;
pub use outcome::StyleBinding;
pub use outcome::WarningCategory;
pub use style::MonitoredProperty;
pub use style::PropertyValue;
pub use style::StyleTable;
pub use summary::QualityGrade;
pub use summary::Recommendation;
pub use summary::ResolutionSummary;

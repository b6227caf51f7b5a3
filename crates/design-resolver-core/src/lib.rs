// crates/design-resolver-core/src/lib.rs
// ============================================================================
// Module: Design Resolver Core Library
// Description: Public API surface for the design resolver core.
// Purpose: Expose core types, interfaces, and runtime services.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Design resolver core turns a tree of requested UI elements into concrete
//! construction instructions drawn from a host document's component library
//! and design tokens. Every node resolves to something buildable: five
//! fallback tiers run in order and the last one always accepts. Outcomes
//! carry a confidence, a warning trail, and any property conflicts that were
//! settled along the way.
//!
//! Storage, classification, and auditing are reached only through the traits
//! in [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::CacheError;
pub use interfaces::Classifier;
pub use interfaces::ClassifierError;
pub use interfaces::FrequencyCache;
pub use interfaces::MappingStore;
pub use interfaces::MappingStoreError;
pub use interfaces::MatchContext;
pub use interfaces::MatchRequest;
pub use interfaces::MatchSuggestion;
pub use interfaces::ResolutionAuditEvent;
pub use interfaces::ResolutionAuditSink;
pub use runtime::ConfidenceScorer;
pub use runtime::EngineConfig;
pub use runtime::InMemoryFrequencyCache;
pub use runtime::InMemoryMappingStore;
pub use runtime::PrimitiveScanner;
pub use runtime::ResolutionEngine;
pub use runtime::ResolutionTracker;
pub use runtime::ScoringInput;
pub use runtime::StructuralValidator;
pub use runtime::SystemDefaults;
pub use runtime::TreeResolution;

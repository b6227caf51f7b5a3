// crates/design-resolver-core/src/runtime/mod.rs
// ============================================================================
// Module: Design Resolver Runtime
// Description: Resolution engine, tiers, scanner, scorer, and in-memory backends.
// Purpose: Turn target nodes into construction instructions.
// Dependencies: crate::{core, interfaces}, arc-swap, strsim, tracing
// ============================================================================

//! ## Overview
//! Runtime modules implement the tiered fallback engine and the services it
//! relies on. The confidence scorer and structural validator are independent
//! of the engine and run post hoc over a produced tree.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod confidence;
pub mod conflict;
pub mod engine;
pub mod frequency;
pub mod fuzzy;
pub mod mapper;
pub mod store;
pub mod tiers;
pub mod tokens;
pub mod tracker;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use confidence::ConfidenceScorer;
pub use confidence::ScoringInput;
pub use conflict::ConflictSources;
pub use conflict::ResolvedConflicts;
pub use conflict::detect_conflicts;
pub use conflict::resolve_conflicts;
pub use engine::EngineConfig;
pub use engine::ResolutionEngine;
pub use engine::TreeResolution;
pub use frequency::FrequencyMaps;
pub use frequency::PrimitiveScanner;
pub use frequency::scan_document;
pub use fuzzy::best_match;
pub use fuzzy::similarity;
pub use mapper::MappedProperties;
pub use mapper::MapperError;
pub use mapper::PropertyMapper;
pub use store::InMemoryFrequencyCache;
pub use store::InMemoryMappingStore;
pub use tiers::TierError;
pub use tiers::defaults::SystemDefaults;
pub use tokens::AliasTable;
pub use tokens::HintTarget;
pub use tokens::StyleHint;
pub use tokens::TokenMatch;
pub use tokens::TokenMatchStrategy;
pub use tokens::TokenResolver;
pub use tokens::parse_hint;
pub use tracker::ResolutionTracker;
pub use tracker::summarize;
pub use validation::StructuralValidator;
pub use validation::ValidationRule;
pub use validation::ValidationRuleError;

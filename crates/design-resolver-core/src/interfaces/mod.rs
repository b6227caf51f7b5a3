// crates/design-resolver-core/src/interfaces/mod.rs
// ============================================================================
// Module: Design Resolver Interfaces
// Description: Backend-agnostic interfaces for classification, caching, and audit.
// Purpose: Define the contract surfaces used by the resolution runtime.
// Dependencies: crate::core, async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the resolver integrates with external collaborators
//! without embedding host-specific details. The classification service is
//! asynchronous and may fail; the runtime contains every failure locally and
//! degrades to the next strategy. Cache and store backends are swappable so
//! the engine can be exercised without the host's storage API.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ComponentId;
use crate::core::ComponentMapping;
use crate::core::DocumentId;
use crate::core::NodeId;
use crate::core::PropertyCategory;
use crate::core::ResolutionTier;
use crate::core::ValueMapping;

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Context attached to a classification or matching request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchContext {
    /// Classify a native component property into a semantic category.
    PropertyClassification {
        /// Component display name.
        component_name: String,
        /// Allowed option values of the property.
        options: Vec<String>,
    },
    /// Pick the inventory token that best matches a style hint.
    TokenLookup {
        /// Hint property label (e.g. `fill`, `padding`).
        property: String,
        /// Candidate token names of a compatible kind.
        candidates: Vec<String>,
    },
}

/// Request sent to the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Subject string (native property name or hint query).
    pub query: String,
    /// Request context.
    pub context: MatchContext,
}

/// Structured suggestion returned by the classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// Suggested match (e.g. a token name), when applicable.
    #[serde(default)]
    pub value: Option<String>,
    /// Suggested property category, when applicable.
    #[serde(default)]
    pub category: Option<PropertyCategory>,
    /// Value translations for classified properties.
    #[serde(default)]
    pub value_mappings: Vec<ValueMapping>,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Classification service errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Service could not be reached or timed out.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    /// Service returned an unusable response.
    #[error("classifier returned invalid response: {0}")]
    InvalidResponse(String),
}

/// External classification and semantic matching service.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Produces a match suggestion for the request.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the service fails.
    async fn suggest(&self, request: &MatchRequest) -> Result<MatchSuggestion, ClassifierError>;
}

// ============================================================================
// SECTION: Frequency Cache
// ============================================================================

/// Frequency cache errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backend I/O failure.
    #[error("frequency cache io error: {0}")]
    Io(String),
    /// Backend lock or state failure.
    #[error("frequency cache error: {0}")]
    Backend(String),
}

/// Swappable byte store for serialized frequency maps, keyed by document.
pub trait FrequencyCache: Send + Sync {
    /// Loads the cached payload for a document.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    fn get(&self, document_id: &DocumentId) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores (replacing) the payload for a document.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    fn put(&self, document_id: &DocumentId, payload: Vec<u8>) -> Result<(), CacheError>;

    /// Removes the payload for a document.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails.
    fn invalidate(&self, document_id: &DocumentId) -> Result<(), CacheError>;
}

// ============================================================================
// SECTION: Mapping Store
// ============================================================================

/// Mapping store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MappingStoreError {
    /// Backend failure.
    #[error("mapping store error: {0}")]
    Store(String),
}

/// Persistent store of learned component mappings.
pub trait MappingStore: Send + Sync {
    /// Loads the mapping for a component.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the backend fails.
    fn load(&self, component_id: &ComponentId)
    -> Result<Option<ComponentMapping>, MappingStoreError>;

    /// Saves (replacing) the mapping for a component.
    ///
    /// # Errors
    ///
    /// Returns [`MappingStoreError`] when the backend fails.
    fn save(&self, mapping: &ComponentMapping) -> Result<(), MappingStoreError>;
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit record emitted once per resolved node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Resolved node.
    pub node_id: NodeId,
    /// Accepted tier.
    pub tier: ResolutionTier,
    /// Method tag.
    pub method: String,
    /// Outcome confidence.
    pub confidence: f64,
    /// Number of warnings.
    pub warning_count: usize,
    /// Number of detected conflicts.
    pub conflict_count: usize,
    /// Tiers attempted in order.
    pub attempted_tiers: Vec<ResolutionTier>,
    /// Elapsed time in microseconds.
    pub elapsed_micros: u64,
}

/// Audit sink for resolution events.
pub trait ResolutionAuditSink: Send + Sync {
    /// Records a resolution event.
    fn record(&self, event: &ResolutionAuditEvent);
}

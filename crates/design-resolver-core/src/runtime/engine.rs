// crates/design-resolver-core/src/runtime/engine.rs
// ============================================================================
// Module: Design Resolver Engine
// Description: Tiered fallback orchestration for target nodes.
// Purpose: Resolve every node to buildable instructions without ever failing.
// Dependencies: crate::{core, interfaces, runtime}, tracing
// ============================================================================

//! ## Overview
//! The engine runs tiers 1 through 5 in order for each node and stops at the
//! first acceptance. Tier failures are contained and logged as declines; tier
//! 5 always accepts, so [`ResolutionEngine::resolve_node`] is infallible. The
//! accepted instructions then pass through the conflict resolver, the
//! confidence is clamped into the tier's band, and one audit event is
//! recorded.
//!
//! Nodes share only read-only state (inventory, document snapshot, published
//! frequency maps), so callers may resolve nodes concurrently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::DocumentSnapshot;
use crate::core::Inventory;
use crate::core::ResolutionOutcome;
use crate::core::ResolutionSummary;
use crate::core::ResolutionTier;
use crate::core::StyleTable;
use crate::core::TargetNode;
use crate::interfaces::Classifier;
use crate::interfaces::FrequencyCache;
use crate::interfaces::MappingStore;
use crate::interfaces::ResolutionAuditEvent;
use crate::interfaces::ResolutionAuditSink;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::audit::now_millis;
use crate::runtime::conflict::resolve_conflicts;
use crate::runtime::frequency::PrimitiveScanner;
use crate::runtime::fuzzy::DEFAULT_FUZZY_THRESHOLD;
use crate::runtime::mapper::PropertyMapper;
use crate::runtime::store::InMemoryFrequencyCache;
use crate::runtime::store::InMemoryMappingStore;
use crate::runtime::tiers::TierAcceptance;
use crate::runtime::tiers::TierContext;
use crate::runtime::tiers::TierError;
use crate::runtime::tiers::defaults;
use crate::runtime::tiers::defaults::SystemDefaults;
use crate::runtime::tiers::exact;
use crate::runtime::tiers::primitive;
use crate::runtime::tiers::structural;
use crate::runtime::tiers::token_construction;
use crate::runtime::tokens::AliasTable;
use crate::runtime::tracker::ResolutionTracker;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Thresholds and tables used by the resolution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum mapping confidence for a tier-1 candidate.
    pub tier1_min_confidence: f64,
    /// Minimum mappable share for a tier-1 candidate.
    pub tier1_min_mappable: f64,
    /// Minimum similarity for fuzzy key and value matches.
    pub fuzzy_threshold: f64,
    /// Minimum confidence of an external semantic token match.
    pub semantic_match_floor: f64,
    /// Minimum per-hint confidence counted toward tier-3 coverage.
    pub hint_confidence_floor: f64,
    /// Minimum share of hints that must bind for tier 3 to accept.
    pub hint_coverage: f64,
    /// Exclusive perceptual distance ceiling for color matches.
    pub color_distance_ceiling: f64,
    /// Minimum mean confidence for tier 4 to accept.
    pub tier4_min_confidence: f64,
    /// Enables token construction.
    pub tier3_enabled: bool,
    /// System default table.
    pub defaults: SystemDefaults,
    /// Extra alias groups merged into the built-in alias table.
    pub extra_aliases: BTreeMap<String, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tier1_min_confidence: 0.70,
            tier1_min_mappable: 0.70,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            semantic_match_floor: 0.75,
            hint_confidence_floor: 0.80,
            hint_coverage: 0.70,
            color_distance_ceiling: 10.0,
            tier4_min_confidence: 0.35,
            tier3_enabled: true,
            defaults: SystemDefaults::default(),
            extra_aliases: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Tree Resolution
// ============================================================================

/// Outcomes for every node of a tree plus their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeResolution {
    /// Outcomes in pre-order.
    pub outcomes: Vec<ResolutionOutcome>,
    /// Aggregate summary.
    pub summary: ResolutionSummary,
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Tiered fallback resolution engine.
pub struct ResolutionEngine {
    /// Engine thresholds and tables.
    config: EngineConfig,
    /// Alias table built from the config.
    aliases: AliasTable,
    /// Inventory snapshot.
    inventory: Arc<Inventory>,
    /// Document snapshot for primitive scans.
    document: Arc<DocumentSnapshot>,
    /// User preset values.
    presets: StyleTable,
    /// Optional classification service.
    classifier: Option<Arc<dyn Classifier>>,
    /// Learned mapping store.
    mapping_store: Arc<dyn MappingStore>,
    /// Primitive frequency scanner.
    scanner: Arc<PrimitiveScanner>,
    /// Audit sink.
    audit: Arc<dyn ResolutionAuditSink>,
}

impl ResolutionEngine {
    /// Creates an engine with in-memory backends, no classifier, and no audit.
    #[must_use]
    pub fn new(inventory: Arc<Inventory>, document: Arc<DocumentSnapshot>, config: EngineConfig) -> Self {
        let aliases = AliasTable::with_extra(&config.extra_aliases);
        Self {
            config,
            aliases,
            inventory,
            document,
            presets: StyleTable::new(),
            classifier: None,
            mapping_store: Arc::new(InMemoryMappingStore::new()),
            scanner: Arc::new(PrimitiveScanner::new(Arc::new(InMemoryFrequencyCache::new()))),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Sets the classification service.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Sets the learned mapping store.
    #[must_use]
    pub fn with_mapping_store(mut self, store: Arc<dyn MappingStore>) -> Self {
        self.mapping_store = store;
        self
    }

    /// Replaces the scanner with one backed by the given cache.
    #[must_use]
    pub fn with_frequency_cache(mut self, cache: Arc<dyn FrequencyCache>) -> Self {
        self.scanner = Arc::new(PrimitiveScanner::new(cache));
        self
    }

    /// Shares an existing scanner.
    #[must_use]
    pub fn with_scanner(mut self, scanner: Arc<PrimitiveScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// Sets the user preset table.
    #[must_use]
    pub fn with_presets(mut self, presets: StyleTable) -> Self {
        self.presets = presets;
        self
    }

    /// Sets the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn ResolutionAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the primitive scanner.
    #[must_use]
    pub fn scanner(&self) -> &PrimitiveScanner {
        &self.scanner
    }

    /// Resolves one node. Never fails.
    pub async fn resolve_node(&self, node: &TargetNode) -> ResolutionOutcome {
        let started = Instant::now();
        let mapper = PropertyMapper::new(
            Arc::clone(&self.mapping_store),
            self.classifier.clone(),
            self.config.fuzzy_threshold,
            self.config.tier1_min_confidence,
        );
        let ctx = TierContext {
            node,
            inventory: &self.inventory,
            document: &self.document,
            config: &self.config,
            aliases: &self.aliases,
            classifier: self.classifier.as_deref(),
            mapper: &mapper,
            scanner: &self.scanner,
        };

        let mut attempted = Vec::with_capacity(ResolutionTier::ORDER.len());
        let mut accepted = None;
        for tier in [
            ResolutionTier::ExactComponent,
            ResolutionTier::StructuralMatch,
            ResolutionTier::TokenConstruction,
            ResolutionTier::PrimitiveApproximation,
        ] {
            attempted.push(tier);
            match attempt_tier(tier, &ctx).await {
                Ok(Some(acceptance)) => {
                    accepted = Some((tier, acceptance));
                    break;
                }
                Ok(None) => {
                    tracing::debug!(
                        target: "design_resolver::engine",
                        node = %node.id,
                        tier = tier.number(),
                        "tier declined"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        target: "design_resolver::engine",
                        node = %node.id,
                        tier = tier.number(),
                        error = %err,
                        "tier failed; treating as declined"
                    );
                }
            }
        }
        let (tier, acceptance) = accepted.unwrap_or_else(|| {
            attempted.push(ResolutionTier::SystemDefault);
            (ResolutionTier::SystemDefault, defaults::attempt(&ctx))
        });

        let outcome = self.finish(node, tier, acceptance, attempted, started);
        self.audit.record(&ResolutionAuditEvent {
            event: "node_resolved",
            timestamp_ms: now_millis(),
            node_id: outcome.node_id.clone(),
            tier: outcome.tier,
            method: outcome.method.clone(),
            confidence: outcome.confidence,
            warning_count: outcome.warnings.len(),
            conflict_count: outcome.conflicts.len(),
            attempted_tiers: outcome.attempted_tiers.clone(),
            elapsed_micros: outcome.elapsed_micros,
        });
        outcome
    }

    /// Resolves every node of a tree in pre-order and summarizes the outcomes.
    pub async fn resolve_tree(&self, root: &TargetNode) -> TreeResolution {
        let mut nodes = Vec::with_capacity(root.node_count());
        root.walk(&mut |node| nodes.push(node));
        let mut tracker = ResolutionTracker::new();
        let mut outcomes = Vec::with_capacity(nodes.len());
        for node in nodes {
            let outcome = self.resolve_node(node).await;
            tracker.record(&outcome);
            outcomes.push(outcome);
        }
        TreeResolution {
            outcomes,
            summary: tracker.summary(),
        }
    }

    /// Applies conflict resolution and builds the final outcome.
    fn finish(
        &self,
        node: &TargetNode,
        tier: ResolutionTier,
        acceptance: TierAcceptance,
        attempted_tiers: Vec<ResolutionTier>,
        started: Instant,
    ) -> ResolutionOutcome {
        let TierAcceptance {
            confidence,
            mut instructions,
            mut warnings,
            component,
        } = acceptance;
        let component = component.as_ref().and_then(|id| self.inventory.component(id));
        let resolved = resolve_conflicts(
            node,
            &mut instructions,
            component,
            &self.presets,
            &self.config.defaults.style_table(),
        );
        warnings.extend(resolved.warnings);
        let conflicts = resolved.conflicts;
        ResolutionOutcome {
            node_id: node.id.clone(),
            success: true,
            tier,
            method: tier.method().to_string(),
            confidence: tier.clamp_confidence(confidence),
            instructions,
            warnings,
            conflicts,
            attempted_tiers,
            elapsed_micros: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        }
    }
}

/// Runs one non-terminal tier.
async fn attempt_tier(
    tier: ResolutionTier,
    ctx: &TierContext<'_>,
) -> Result<Option<TierAcceptance>, TierError> {
    match tier {
        ResolutionTier::ExactComponent => exact::attempt(ctx).await,
        ResolutionTier::StructuralMatch => Ok(structural::attempt(ctx)),
        ResolutionTier::TokenConstruction => token_construction::attempt(ctx).await,
        ResolutionTier::PrimitiveApproximation => Ok(primitive::attempt(ctx)),
        ResolutionTier::SystemDefault => Ok(Some(defaults::attempt(ctx))),
    }
}

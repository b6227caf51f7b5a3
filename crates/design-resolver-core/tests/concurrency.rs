// crates/design-resolver-core/tests/concurrency.rs
// ============================================================================
// Module: Concurrent Resolution Tests
// Description: Shared-engine resolution across tasks and audit emission.
// Purpose: Verify scan-once behavior and one audit event per resolved node.
// ============================================================================

//! Runs one [`ResolutionEngine`] from many tasks on a multi-threaded runtime.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use design_resolver_core::CacheError;
use design_resolver_core::DocumentId;
use design_resolver_core::EngineConfig;
use design_resolver_core::FrequencyCache;
use design_resolver_core::InMemoryFrequencyCache;
use design_resolver_core::Inventory;
use design_resolver_core::PrimitiveScanner;
use design_resolver_core::ResolutionAuditEvent;
use design_resolver_core::ResolutionAuditSink;
use design_resolver_core::ResolutionEngine;
use design_resolver_core::ResolutionTier;
use design_resolver_core::StyleValue;
use design_resolver_core::TargetNode;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Cache wrapper counting stored payloads.
#[derive(Default)]
struct CountingCache {
    inner: InMemoryFrequencyCache,
    puts: AtomicUsize,
}

impl FrequencyCache for CountingCache {
    fn get(&self, document_id: &DocumentId) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(document_id)
    }

    fn put(&self, document_id: &DocumentId, payload: Vec<u8>) -> Result<(), CacheError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(document_id, payload)
    }

    fn invalidate(&self, document_id: &DocumentId) -> Result<(), CacheError> {
        self.inner.invalidate(document_id)
    }
}

/// Audit sink collecting every event.
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ResolutionAuditEvent>>,
}

impl ResolutionAuditSink for RecordingSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn literal_node(id: &str) -> TargetNode {
    let mut node = TargetNode::new(id, "banner");
    node.fill = Some(StyleValue::Literal(common::rgb("#FF0000")));
    node
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolutions_scan_the_document_once() {
    let cache = Arc::new(CountingCache::default());
    let scanner = Arc::new(PrimitiveScanner::new(Arc::clone(&cache) as Arc<dyn FrequencyCache>));
    let engine = Arc::new(
        ResolutionEngine::new(
            Arc::new(Inventory::default()),
            Arc::new(common::red_document()),
            EngineConfig::default(),
        )
        .with_scanner(scanner),
    );

    let handles: Vec<_> = (0 .. 16)
        .map(|index| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.resolve_node(&literal_node(&format!("n{index}"))).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.tier, ResolutionTier::PrimitiveApproximation);
    }
    assert_eq!(cache.puts.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_outcomes_match_sequential_outcomes() {
    let engine = Arc::new(common::engine(Inventory::default(), common::red_document()));
    let node = literal_node("same");

    let sequential = engine.resolve_node(&node).await;
    let (left, right) = tokio::join!(engine.resolve_node(&node), engine.resolve_node(&node));

    for outcome in [left, right] {
        assert_eq!(outcome.tier, sequential.tier);
        assert_eq!(outcome.method, sequential.method);
        assert!(common::approx(outcome.confidence, sequential.confidence));
        assert_eq!(outcome.instructions, sequential.instructions);
    }
}

#[tokio::test]
async fn every_resolved_node_emits_one_audit_event() {
    let sink = Arc::new(RecordingSink::default());
    let engine = common::engine(Inventory::default(), common::empty_document())
        .with_audit_sink(Arc::clone(&sink) as Arc<dyn ResolutionAuditSink>);
    let mut root = TargetNode::new("root", "section");
    root.children = vec![TargetNode::new("a", "text"), TargetNode::new("b", "divider")];

    let resolution = engine.resolve_tree(&root).await;

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), resolution.outcomes.len());
    for (event, outcome) in events.iter().zip(&resolution.outcomes) {
        assert_eq!(event.event, "node_resolved");
        assert_eq!(event.node_id, outcome.node_id);
        assert_eq!(event.tier, outcome.tier);
        assert_eq!(event.attempted_tiers, outcome.attempted_tiers);
        assert_eq!(event.warning_count, outcome.warnings.len());
    }
}

// crates/design-resolver-core/src/runtime/frequency.rs
// ============================================================================
// Module: Design Resolver Primitive Frequency Scanner
// Description: One-pass document scan and frequency-weighted nearest search.
// Purpose: Approximate requested values with values the document already uses.
// Dependencies: crate::{core, interfaces}, arc-swap, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The scanner walks a [`DocumentSnapshot`] once and counts raw colors,
//! spacing values, and corner radii. Maps are cached per document through a
//! [`FrequencyCache`] inside a versioned envelope carrying a canonical digest;
//! any payload that fails to decode or verify is a miss and triggers a fresh
//! scan.
//!
//! The in-process snapshot is published through an atomic pointer swap, so
//! readers never observe a partially built map. Scans are serialized by a
//! guard so a document is scanned at most once until it is invalidated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use arc_swap::ArcSwapOption;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::DEFAULT_HASH_ALGORITHM;
use crate::core::DocumentId;
use crate::core::DocumentSnapshot;
use crate::core::HashDigest;
use crate::core::Rgb;
use crate::core::SceneNode;
use crate::core::perceptual_distance;
use crate::interfaces::CacheError;
use crate::interfaces::FrequencyCache;

// ============================================================================
// SECTION: Frequency Maps
// ============================================================================

/// Envelope format version written alongside cached maps.
pub const FREQUENCY_CACHE_VERSION: u32 = 1;

/// Usage counts of raw document values.
///
/// # Invariants
/// - Spacing and radius keys are whole pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrequencyMaps {
    /// Fill and stroke colors.
    pub colors: BTreeMap<Rgb, u32>,
    /// Padding and item-spacing values.
    pub spacing: BTreeMap<u32, u32>,
    /// Corner radii.
    pub radius: BTreeMap<u32, u32>,
}

impl FrequencyMaps {
    /// Returns true when no values were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.spacing.is_empty() && self.radius.is_empty()
    }
}

/// Rounds a dimension to a whole-pixel key; negative or non-finite values are dropped.
#[must_use]
pub fn pixel_key(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded > f64::from(u32::MAX) {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is finite, non-negative, rounded, and within u32 range."
    )]
    let key = rounded as u32;
    Some(key)
}

/// Scans a document snapshot into frequency maps.
#[must_use]
pub fn scan_document(snapshot: &DocumentSnapshot) -> FrequencyMaps {
    let mut maps = FrequencyMaps::default();
    let mut stack: Vec<&SceneNode> = snapshot.roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        for color in node.fills.iter().chain(node.strokes.iter()) {
            *maps.colors.entry(*color).or_insert(0) += 1;
        }
        for value in node.padding.iter().copied().chain(node.item_spacing) {
            if let Some(key) = pixel_key(value) {
                *maps.spacing.entry(key).or_insert(0) += 1;
            }
        }
        if let Some(key) = node.corner_radius.and_then(pixel_key) {
            *maps.radius.entry(key).or_insert(0) += 1;
        }
        stack.extend(node.children.iter().rev());
    }
    maps
}

// ============================================================================
// SECTION: Nearest Search
// ============================================================================

/// Nearest frequent value for one requested value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestValue<T> {
    /// Chosen document value.
    pub value: T,
    /// Raw distance to the requested value.
    pub distance: f64,
    /// Usage count of the chosen value.
    pub frequency: u32,
    /// True when no other value is used as often or more.
    pub most_frequent: bool,
    /// Share of all observations held by the chosen value.
    pub share: f64,
}

/// Returns `distance / ln(frequency + 2)`.
#[must_use]
pub fn weighted_distance(distance: f64, frequency: u32) -> f64 {
    distance / (f64::from(frequency) + 2.0).ln()
}

/// Ranks candidates by weighted distance.
///
/// Ties fall to the higher count, then to map order.
fn nearest<T: Copy>(
    map: &BTreeMap<T, u32>,
    distance: impl Fn(T) -> f64,
    ceiling: Option<f64>,
) -> Option<NearestValue<T>> {
    let total: u32 = map.values().copied().fold(0_u32, u32::saturating_add);
    let top = map.values().copied().max().unwrap_or(0);
    let top_count = map.values().filter(|count| **count == top).count();
    let mut best: Option<(NearestValue<T>, f64)> = None;
    for (value, count) in map {
        let raw = distance(*value);
        if ceiling.is_some_and(|limit| raw >= limit) {
            continue;
        }
        let weighted = weighted_distance(raw, *count);
        let better = best.as_ref().is_none_or(|(current, current_weighted)| {
            weighted < *current_weighted
                || (weighted == *current_weighted && *count > current.frequency)
        });
        if better {
            let candidate = NearestValue {
                value: *value,
                distance: raw,
                frequency: *count,
                most_frequent: *count == top && top_count == 1,
                share: if total == 0 { 0.0 } else { f64::from(*count) / f64::from(total) },
            };
            best = Some((candidate, weighted));
        }
    }
    best.map(|(candidate, _)| candidate)
}

impl FrequencyMaps {
    /// Returns the document color nearest to `target` below the distance ceiling.
    #[must_use]
    pub fn nearest_color(&self, target: Rgb, ceiling: f64) -> Option<NearestValue<Rgb>> {
        nearest(&self.colors, |color| perceptual_distance(target, color), Some(ceiling))
    }

    /// Returns the spacing value nearest to `target`.
    #[must_use]
    pub fn nearest_spacing(&self, target: f64) -> Option<NearestValue<u32>> {
        nearest(&self.spacing, |value| (f64::from(value) - target).abs(), None)
    }

    /// Returns the corner radius nearest to `target`.
    #[must_use]
    pub fn nearest_radius(&self, target: f64) -> Option<NearestValue<u32>> {
        nearest(&self.radius, |value| (f64::from(value) - target).abs(), None)
    }
}

// ============================================================================
// SECTION: Cache Envelope
// ============================================================================

/// Cached payload with version and integrity digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrequencyEnvelope {
    /// Envelope format version.
    version: u32,
    /// Canonical digest of `maps`.
    digest: HashDigest,
    /// Cached maps.
    maps: FrequencyMaps,
}

/// Reasons a cached payload was rejected.
#[derive(Debug, Error)]
enum EnvelopeRejection {
    /// Payload did not decode.
    #[error("payload did not decode: {0}")]
    Decode(String),
    /// Version tag differs from the current format.
    #[error("unsupported envelope version {0}")]
    Version(u32),
    /// Digest did not match the maps.
    #[error("digest mismatch")]
    Digest,
}

/// Serializes maps into an envelope payload.
fn encode_envelope(maps: &FrequencyMaps) -> Result<Vec<u8>, CacheError> {
    let digest = HashDigest::of_canonical_json(DEFAULT_HASH_ALGORITHM, maps)
        .map_err(|err| CacheError::Backend(err.to_string()))?;
    let envelope = FrequencyEnvelope {
        version: FREQUENCY_CACHE_VERSION,
        digest,
        maps: maps.clone(),
    };
    serde_json::to_vec(&envelope).map_err(|err| CacheError::Backend(err.to_string()))
}

/// Decodes and verifies an envelope payload.
fn decode_envelope(payload: &[u8]) -> Result<FrequencyMaps, EnvelopeRejection> {
    let envelope: FrequencyEnvelope =
        serde_json::from_slice(payload).map_err(|err| EnvelopeRejection::Decode(err.to_string()))?;
    if envelope.version != FREQUENCY_CACHE_VERSION {
        return Err(EnvelopeRejection::Version(envelope.version));
    }
    let intact = envelope
        .digest
        .matches(&envelope.maps)
        .map_err(|err| EnvelopeRejection::Decode(err.to_string()))?;
    if !intact {
        return Err(EnvelopeRejection::Digest);
    }
    Ok(envelope.maps)
}

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Maps published for one document.
#[derive(Debug)]
struct ScannedDocument {
    /// Scanned document.
    document_id: DocumentId,
    /// Frequency maps.
    maps: Arc<FrequencyMaps>,
}

/// Cached, scan-once frequency map provider.
pub struct PrimitiveScanner {
    /// Payload cache shared across sessions.
    cache: Arc<dyn FrequencyCache>,
    /// Published snapshot for the current document.
    current: ArcSwapOption<ScannedDocument>,
    /// Serializes cache loads and scans.
    scan_guard: Mutex<()>,
}

impl PrimitiveScanner {
    /// Creates a scanner over a payload cache.
    #[must_use]
    pub fn new(cache: Arc<dyn FrequencyCache>) -> Self {
        Self {
            cache,
            current: ArcSwapOption::empty(),
            scan_guard: Mutex::new(()),
        }
    }

    /// Returns the frequency maps for a document, scanning at most once.
    pub fn maps_for(&self, snapshot: &DocumentSnapshot) -> Arc<FrequencyMaps> {
        if let Some(maps) = self.published(&snapshot.document_id) {
            return maps;
        }
        let _guard = self.scan_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(maps) = self.published(&snapshot.document_id) {
            return maps;
        }

        let maps = Arc::new(self.load_cached(&snapshot.document_id).unwrap_or_else(|| {
            let maps = scan_document(snapshot);
            tracing::debug!(
                target: "design_resolver::scan",
                document = %snapshot.document_id,
                colors = maps.colors.len(),
                spacing = maps.spacing.len(),
                radius = maps.radius.len(),
                "scanned document primitives"
            );
            self.store_cached(&snapshot.document_id, &maps);
            maps
        }));
        self.current.store(Some(Arc::new(ScannedDocument {
            document_id: snapshot.document_id.clone(),
            maps: Arc::clone(&maps),
        })));
        maps
    }

    /// Drops cached and published maps so the next request re-scans.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the cache backend fails.
    pub fn invalidate(&self, document_id: &DocumentId) -> Result<(), CacheError> {
        let _guard = self.scan_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if self.published(document_id).is_some() {
            self.current.store(None);
        }
        self.cache.invalidate(document_id)
    }

    /// Returns the published maps when they belong to `document_id`.
    fn published(&self, document_id: &DocumentId) -> Option<Arc<FrequencyMaps>> {
        let guard = self.current.load();
        match &*guard {
            Some(scanned) if &scanned.document_id == document_id => Some(Arc::clone(&scanned.maps)),
            _ => None,
        }
    }

    /// Loads maps from the cache; every failure is a miss.
    fn load_cached(&self, document_id: &DocumentId) -> Option<FrequencyMaps> {
        let payload = match self.cache.get(document_id) {
            Ok(payload) => payload?,
            Err(err) => {
                tracing::warn!(
                    target: "design_resolver::scan",
                    document = %document_id,
                    error = %err,
                    "frequency cache read failed; rescanning"
                );
                return None;
            }
        };
        match decode_envelope(&payload) {
            Ok(maps) => Some(maps),
            Err(rejection) => {
                tracing::warn!(
                    target: "design_resolver::scan",
                    document = %document_id,
                    reason = %rejection,
                    "discarding unusable frequency cache entry"
                );
                None
            }
        }
    }

    /// Writes maps to the cache; failures are logged and ignored.
    fn store_cached(&self, document_id: &DocumentId, maps: &FrequencyMaps) {
        let result = encode_envelope(maps).and_then(|payload| self.cache.put(document_id, payload));
        if let Err(err) = result {
            tracing::warn!(
                target: "design_resolver::scan",
                document = %document_id,
                error = %err,
                "failed to write frequency cache"
            );
        }
    }
}

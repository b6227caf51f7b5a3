// crates/design-resolver-core/src/runtime/store.rs
// ============================================================================
// Module: Design Resolver In-Memory Stores
// Description: In-memory frequency cache and mapping store.
// Purpose: Provide deterministic backends without the host's storage API.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! These backends keep everything in process memory behind a mutex. They are
//! the engine defaults and the backends used by tests; hosts plug in their own
//! persistence through the same traits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::ComponentId;
use crate::core::ComponentMapping;
use crate::core::DocumentId;
use crate::interfaces::CacheError;
use crate::interfaces::FrequencyCache;
use crate::interfaces::MappingStore;
use crate::interfaces::MappingStoreError;

// ============================================================================
// SECTION: Frequency Cache
// ============================================================================

/// In-memory frequency cache keyed by document.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFrequencyCache {
    /// Payloads protected by a mutex.
    entries: Arc<Mutex<BTreeMap<DocumentId, Vec<u8>>>>,
}

impl InMemoryFrequencyCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached documents.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the mutex is poisoned.
    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.lock()?.len())
    }

    /// Returns true when nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.lock()?.is_empty())
    }

    /// Locks the entry map.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<DocumentId, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Backend("frequency cache mutex poisoned".to_string()))
    }
}

impl FrequencyCache for InMemoryFrequencyCache {
    fn get(&self, document_id: &DocumentId) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(document_id).cloned())
    }

    fn put(&self, document_id: &DocumentId, payload: Vec<u8>) -> Result<(), CacheError> {
        self.lock()?.insert(document_id.clone(), payload);
        Ok(())
    }

    fn invalidate(&self, document_id: &DocumentId) -> Result<(), CacheError> {
        self.lock()?.remove(document_id);
        Ok(())
    }
}

// ============================================================================
// SECTION: Mapping Store
// ============================================================================

/// In-memory store of learned component mappings.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMappingStore {
    /// Mappings protected by a mutex.
    mappings: Arc<Mutex<BTreeMap<ComponentId, ComponentMapping>>>,
}

impl InMemoryMappingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingStore for InMemoryMappingStore {
    fn load(
        &self,
        component_id: &ComponentId,
    ) -> Result<Option<ComponentMapping>, MappingStoreError> {
        let guard = self
            .mappings
            .lock()
            .map_err(|_| MappingStoreError::Store("mapping store mutex poisoned".to_string()))?;
        Ok(guard.get(component_id).cloned())
    }

    fn save(&self, mapping: &ComponentMapping) -> Result<(), MappingStoreError> {
        self.mappings
            .lock()
            .map_err(|_| MappingStoreError::Store("mapping store mutex poisoned".to_string()))?
            .insert(mapping.component_id.clone(), mapping.clone());
        Ok(())
    }
}

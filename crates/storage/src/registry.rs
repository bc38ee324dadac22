//! Record mapping registry
//!
//! A record type must be mapped before rows of that type can be written,
//! loaded or joined. The registry keeps the mappings in registration order
//! so that item materialization visits record types deterministically.

use std::any::TypeId;

use quarry_core::{RecordScope, RecordType};
use rustc_hash::FxHashMap;

/// Registry of mapped record types
pub struct RecordRegistry {
    /// Record types by Rust type identity
    by_id: FxHashMap<TypeId, RecordType>,
    /// Registration order
    order: Vec<RecordType>,
}

impl RecordRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        RecordRegistry {
            by_id: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Register a record type
    ///
    /// Returns false if the type was already registered.
    pub fn register(&mut self, record_type: RecordType) -> bool {
        if self.by_id.contains_key(&record_type.id()) {
            return false;
        }
        self.by_id.insert(record_type.id(), record_type);
        self.order.push(record_type);
        true
    }

    /// Get a record type by Rust type identity
    pub fn get(&self, id: &TypeId) -> Option<RecordType> {
        self.by_id.get(id).copied()
    }

    /// Check if a record type is registered
    pub fn is_registered(&self, record_type: &RecordType) -> bool {
        self.by_id.contains_key(&record_type.id())
    }

    /// All registered record types, in registration order
    pub fn list(&self) -> Vec<RecordType> {
        self.order.clone()
    }

    /// Registered record types with the given scope
    pub fn with_scope(&self, scope: RecordScope) -> impl Iterator<Item = &RecordType> + '_ {
        self.order.iter().filter(move |rt| rt.scope() == scope)
    }

    /// Get the number of registered record types
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for RecordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordRegistry")
            .field(
                "records",
                &self.order.iter().map(|rt| rt.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

//! Content type registry
//!
//! A content type is a name plus the list of part names composing it.
//! Queries resolve their target types here at build time, and items look up
//! their definition to decide which parts they carry.
//!
//! Uses parking_lot::RwLock so registration never poisons readers.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Definition of one content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeDefinition {
    name: String,
    parts: SmallVec<[String; 4]>,
}

impl ContentTypeDefinition {
    /// Create a definition with no parts
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: SmallVec::new(),
        }
    }

    /// Attach a part by name
    ///
    /// Attaching the same part twice is a no-op.
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        let part = part.into();
        if !self.has_part(&part) {
            self.parts.push(part);
        }
        self
    }

    /// Content type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part names, in attachment order
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Check whether the type carries a part
    pub fn has_part(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p == part)
    }
}

/// Registry of content type definitions
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    types: RwLock<FxHashMap<String, Arc<ContentTypeDefinition>>>,
}

impl ContentTypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same name
    pub fn register(&self, definition: ContentTypeDefinition) -> Arc<ContentTypeDefinition> {
        let definition = Arc::new(definition);
        self.types
            .write()
            .insert(definition.name().to_string(), Arc::clone(&definition));
        definition
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<Arc<ContentTypeDefinition>> {
        self.types.read().get(name).cloned()
    }

    /// Check whether a type is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Names of the types carrying a part, sorted
    pub fn types_with_part(&self, part: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .types
            .read()
            .values()
            .filter(|def| def.has_part(part))
            .map(|def| def.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// All registered type names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

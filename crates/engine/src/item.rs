//! Materialized content items
//!
//! A `ContentItem` is one version of a content item together with every
//! mapped record attached to it, loaded when the item is materialized.
//! Parts are activated lazily and cached on the item; clones share the cache.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use quarry_core::{
    downcast_record, ContentItemId, ContentStorage, ErasedRecord, Record, StorageError,
    StorageResult, VersionRecordId, VersionRow,
};

use crate::part::Part;
use crate::registry::{ContentTypeDefinition, ContentTypeRegistry};

type PartCache = FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// One version of a content item with its records
#[derive(Clone)]
pub struct ContentItem {
    row: VersionRow,
    definition: Arc<ContentTypeDefinition>,
    records: Arc<FxHashMap<TypeId, ErasedRecord>>,
    parts: Arc<Mutex<PartCache>>,
}

impl ContentItem {
    /// Materialize a version row, loading every mapped record
    pub(crate) fn load(
        storage: &dyn ContentStorage,
        types: &ContentTypeRegistry,
        row: VersionRow,
    ) -> StorageResult<Self> {
        let definition = types.get(&row.content_type).ok_or_else(|| {
            StorageError::corruption(format!(
                "{} has unregistered content type '{}'",
                row.item_id, row.content_type
            ))
        })?;

        let mut records = FxHashMap::default();
        for record_type in storage.mapped_records() {
            if let Some(record) = storage.load_record(&record_type, &row)? {
                records.insert(record_type.id(), record);
            }
        }

        Ok(Self {
            row,
            definition,
            records: Arc::new(records),
            parts: Arc::new(Mutex::new(FxHashMap::default())),
        })
    }

    /// Item identity
    #[inline]
    pub fn id(&self) -> ContentItemId {
        self.row.item_id
    }

    /// Version record identity
    #[inline]
    pub fn version_id(&self) -> VersionRecordId {
        self.row.version_id
    }

    /// Version number
    pub fn number(&self) -> u32 {
        self.row.number
    }

    /// Content type name
    pub fn content_type(&self) -> &str {
        &self.row.content_type
    }

    /// Whether this version is the published one
    pub fn is_published(&self) -> bool {
        self.row.published
    }

    /// Whether this version is the latest one
    pub fn is_latest(&self) -> bool {
        self.row.latest
    }

    /// Version row this item was materialized from
    pub fn row(&self) -> &VersionRow {
        &self.row
    }

    /// Content type definition
    pub fn definition(&self) -> &Arc<ContentTypeDefinition> {
        &self.definition
    }

    /// Check whether the item's type carries a part
    pub fn has_part(&self, name: &str) -> bool {
        self.definition.has_part(name)
    }

    /// Record of type `R` attached to this version, if any
    pub fn record<R: Record>(&self) -> Option<Arc<R>> {
        self.records
            .get(&TypeId::of::<R>())
            .and_then(downcast_record::<R>)
    }

    /// Typed part facade, activated on first access
    ///
    /// Returns None if the item's type does not list the part or the part
    /// cannot be activated from the item's records.
    pub fn as_part<P: Part>(&self) -> Option<Arc<P>> {
        if !self.definition.has_part(P::NAME) {
            return None;
        }

        let key = TypeId::of::<P>();
        if let Some(cached) = self.parts.lock().get(&key) {
            return Arc::clone(cached).downcast::<P>().ok();
        }

        // Activation may read other parts, so the cache is not locked here
        let part = Arc::new(P::activate(self)?);
        let cached = Arc::clone(
            self.parts
                .lock()
                .entry(key)
                .or_insert_with(|| Arc::clone(&part) as Arc<dyn Any + Send + Sync>),
        );
        cached.downcast::<P>().ok()
    }
}

impl fmt::Debug for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentItem")
            .field("row", &self.row)
            .field("records", &self.records.len())
            .finish()
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.row)
    }
}

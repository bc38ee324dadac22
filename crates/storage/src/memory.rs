//! MemoryStore: in-memory versioned content storage
//!
//! This module implements the `ContentStorage` trait using:
//! - `BTreeMap<ContentItemId, ItemEntry>` for items and their version chains
//! - `parking_lot::RwLock` for thread-safe access to the item table
//! - `DashMap<TypeId, RecordTable>` shards, one per mapped record type
//! - `AtomicU64` counters for item ids and version record ids
//! - A content type index so scans only touch the requested types
//!
//! # Design Notes
//!
//! - **Version filter in the scan**: rows failing the filter are never
//!   materialized, so unpublished or superseded versions stay inside storage
//! - **Storage order**: scans return rows sorted by version record id
//! - **Lock discipline**: the type index and item table are never held
//!   together by readers, and no `DashMap` guard is held while taking the
//!   item table lock. `new_version` takes the item table, then the
//!   registry, then record tables, and publishes the new version only after
//!   its version-scoped records are in place

use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use quarry_core::{
    ContentItemId, ContentStorage, ErasedRecord, RecordOwner, RecordScope, RecordType,
    StorageError, StorageResult, VersionOptions, VersionRecordId, VersionRow,
};

use crate::chain::{ItemEntry, VersionMeta};
use crate::index::ContentTypeIndex;
use crate::registry::RecordRegistry;
use crate::table::RecordTable;

/// In-memory content store
///
/// Thread-safe through `parking_lot::RwLock`, `DashMap` and atomics.
///
/// # Example
///
/// ```
/// use quarry_core::{ContentStorage, VersionOptions};
/// use quarry_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// let row = store.create_item("Page", true).unwrap();
/// let rows = store
///     .scan_versions(&["Page".to_string()], VersionOptions::Published)
///     .unwrap();
/// assert_eq!(rows, vec![row]);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    /// Items and their version chains
    items: RwLock<BTreeMap<ContentItemId, ItemEntry>>,
    /// Secondary index: content type → item ids
    type_index: RwLock<ContentTypeIndex>,
    /// One table per mapped record type
    tables: DashMap<TypeId, RecordTable>,
    /// Mapped record types
    registry: RwLock<RecordRegistry>,
    /// Last allocated item id
    next_item_id: AtomicU64,
    /// Last allocated version record id
    next_version_id: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            type_index: RwLock::new(ContentTypeIndex::new()),
            tables: DashMap::new(),
            registry: RwLock::new(RecordRegistry::new()),
            next_item_id: AtomicU64::new(0),
            next_version_id: AtomicU64::new(0),
        }
    }

    /// Allocate the next item id (1, 2, 3, ...)
    fn allocate_item_id(&self) -> ContentItemId {
        ContentItemId::new(self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Allocate the next version record id (1, 2, 3, ...)
    fn allocate_version_id(&self) -> VersionRecordId {
        VersionRecordId::new(self.next_version_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Fail unless a record type is mapped
    fn ensure_mapped(&self, record_type: &RecordType) -> StorageResult<()> {
        if self.registry.read().is_registered(record_type) {
            Ok(())
        } else {
            Err(StorageError::UnmappedRecord {
                record: record_type.name(),
            })
        }
    }

    /// Number of content items stored (removed items included)
    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }

    /// Total number of versions across all items
    pub fn version_count(&self) -> usize {
        self.items
            .read()
            .values()
            .map(|entry| entry.chain.version_count())
            .sum()
    }

    /// Number of rows stored for a record type
    pub fn record_count(&self, record_type: &RecordType) -> usize {
        self.tables
            .get(&record_type.id())
            .map(|table| table.len())
            .unwrap_or(0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStorage for MemoryStore {
    fn map_record(&self, record_type: RecordType) {
        if self.registry.write().register(record_type) {
            self.tables.entry(record_type.id()).or_default();
            debug!(target: "quarry::storage", record = record_type.name(), scope = ?record_type.scope(), "Record mapped");
        }
    }

    fn is_mapped(&self, record_type: &RecordType) -> bool {
        self.registry.read().is_registered(record_type)
    }

    fn mapped_records(&self) -> Vec<RecordType> {
        self.registry.read().list()
    }

    fn scan_versions(
        &self,
        content_types: &[String],
        options: VersionOptions,
    ) -> StorageResult<Vec<VersionRow>> {
        // Release the index lock before taking the item table lock
        let ids = self.type_index.read().collect(content_types);

        let items = self.items.read();
        let mut rows: Vec<VersionRow> = ids
            .iter()
            .filter_map(|id| items.get(id).map(|entry| (*id, entry)))
            .flat_map(|(id, entry)| entry.chain.matching(options).map(move |m| entry.row(id, m)))
            .collect();
        drop(items);

        rows.sort_by_key(|row| row.version_id);
        trace!(target: "quarry::storage", types = ?content_types, versions = %options, rows = rows.len(), "Versions scanned");
        Ok(rows)
    }

    fn item_versions(
        &self,
        item: ContentItemId,
        options: VersionOptions,
    ) -> StorageResult<Vec<VersionRow>> {
        let items = self.items.read();
        Ok(match items.get(&item) {
            Some(entry) => entry
                .chain
                .matching(options)
                .map(|m| entry.row(item, m))
                .collect(),
            None => Vec::new(),
        })
    }

    fn load_record(
        &self,
        record_type: &RecordType,
        row: &VersionRow,
    ) -> StorageResult<Option<ErasedRecord>> {
        self.ensure_mapped(record_type)?;
        let owner = record_type.owner_for(row);
        Ok(self
            .tables
            .get(&record_type.id())
            .and_then(|table| table.get(&owner).cloned()))
    }

    fn create_item(&self, content_type: &str, published: bool) -> StorageResult<VersionRow> {
        let id = self.allocate_item_id();
        let meta = VersionMeta::new(self.allocate_version_id(), 1, published);
        let entry = ItemEntry::new(content_type, meta);
        let row = entry.row(id, &meta);

        self.items.write().insert(id, entry);
        self.type_index.write().insert(content_type, id);

        debug!(target: "quarry::storage", item = %id, content_type, published, "Content item created");
        Ok(row)
    }

    fn put_record(
        &self,
        record_type: &RecordType,
        row: &VersionRow,
        record: ErasedRecord,
    ) -> StorageResult<()> {
        self.ensure_mapped(record_type)?;
        if !self.items.read().contains_key(&row.item_id) {
            return Err(StorageError::ItemNotFound(row.item_id));
        }

        let owner = record_type.owner_for(row);
        self.tables
            .entry(record_type.id())
            .or_default()
            .put(owner, record);
        trace!(target: "quarry::storage", record = record_type.name(), item = %row.item_id, version = %row.version_id, "Record written");
        Ok(())
    }

    fn new_version(&self, item: ContentItemId) -> StorageResult<VersionRow> {
        let mut items = self.items.write();
        let entry = items
            .get_mut(&item)
            .ok_or(StorageError::ItemNotFound(item))?;

        // Removed items have no latest version and cannot be edited
        let source = entry
            .chain
            .latest()
            .copied()
            .ok_or(StorageError::ItemNotFound(item))?;

        let meta = VersionMeta::new(self.allocate_version_id(), entry.chain.next_number(), false);

        // Copy version-scoped records while the item table is still locked,
        // so no scan sees the new version without them
        let versioned: Vec<RecordType> = self
            .registry
            .read()
            .with_scope(RecordScope::Version)
            .copied()
            .collect();
        for record_type in versioned {
            if let Some(mut table) = self.tables.get_mut(&record_type.id()) {
                table.copy_forward(
                    RecordOwner::Version(source.id),
                    RecordOwner::Version(meta.id),
                );
            }
        }

        entry.chain.push(meta);
        let row = entry.row(item, &meta);
        drop(items);

        debug!(target: "quarry::storage", item = %item, number = row.number, "Draft version created");
        Ok(row)
    }

    fn publish(&self, item: ContentItemId) -> StorageResult<VersionRow> {
        let mut items = self.items.write();
        let entry = items
            .get_mut(&item)
            .ok_or(StorageError::ItemNotFound(item))?;
        let meta = entry
            .chain
            .publish_latest()
            .ok_or(StorageError::ItemNotFound(item))?;
        let row = entry.row(item, &meta);

        debug!(target: "quarry::storage", item = %item, number = row.number, "Version published");
        Ok(row)
    }

    fn unpublish(&self, item: ContentItemId) -> StorageResult<Option<VersionRow>> {
        let mut items = self.items.write();
        let entry = items
            .get_mut(&item)
            .ok_or(StorageError::ItemNotFound(item))?;
        let row = entry.chain.unpublish().map(|meta| entry.row(item, &meta));

        debug!(target: "quarry::storage", item = %item, was_published = row.is_some(), "Item unpublished");
        Ok(row)
    }

    fn remove(&self, item: ContentItemId) -> StorageResult<()> {
        let mut items = self.items.write();
        let entry = items
            .get_mut(&item)
            .ok_or(StorageError::ItemNotFound(item))?;
        entry.chain.remove_all();

        debug!(target: "quarry::storage", item = %item, "Item removed");
        Ok(())
    }
}

//! Storage provider abstraction
//!
//! This module defines the `ContentStorage` trait, the boundary between the
//! query engine and whatever holds content rows. The engine never reads a
//! schema directly; it asks a provider for version rows under a version
//! filter and for individual records keyed by record type.

use crate::contract::VersionOptions;
use crate::error::StorageResult;
use crate::record::{ErasedRecord, RecordType};
use crate::types::{ContentItemId, VersionRow};

/// Storage abstraction for content items and their records
///
/// Thread safety: All methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Isolation between concurrent
/// readers and writers is the provider's concern.
pub trait ContentStorage: Send + Sync {
    // ------------------------------------------------------------------
    // Record mappings
    // ------------------------------------------------------------------

    /// Register a storage mapping for a record type
    ///
    /// Idempotent: mapping the same type twice is a no-op.
    fn map_record(&self, record_type: RecordType);

    /// Check whether a record type has a storage mapping
    fn is_mapped(&self, record_type: &RecordType) -> bool;

    /// All mapped record types, in mapping order
    fn mapped_records(&self) -> Vec<RecordType>;

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Enumerate version rows of the given content types passing `options`
    ///
    /// Rows are returned in storage order (ascending version record id).
    /// The filter is applied during the scan, so superseded or unpublished
    /// versions never leave the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn scan_versions(
        &self,
        content_types: &[String],
        options: VersionOptions,
    ) -> StorageResult<Vec<VersionRow>>;

    /// Enumerate version rows of one item passing `options`
    ///
    /// Returns an empty vector if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn item_versions(
        &self,
        item: ContentItemId,
        options: VersionOptions,
    ) -> StorageResult<Vec<VersionRow>>;

    /// Load the record of `record_type` attached to a version row
    ///
    /// Item-scoped records are keyed by the row's item id, version-scoped
    /// records by its version record id. Returns `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UnmappedRecord` if the type is not mapped, or
    /// another error if the storage operation fails.
    fn load_record(
        &self,
        record_type: &RecordType,
        row: &VersionRow,
    ) -> StorageResult<Option<ErasedRecord>>;

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Create a content item with a single version numbered 1
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn create_item(&self, content_type: &str, published: bool) -> StorageResult<VersionRow>;

    /// Write (or replace) the record of `record_type` for a version row
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UnmappedRecord` if the type is not mapped, or
    /// `StorageError::ItemNotFound` if the row's item does not exist.
    fn put_record(
        &self,
        record_type: &RecordType,
        row: &VersionRow,
        record: ErasedRecord,
    ) -> StorageResult<()>;

    /// Append a new latest, unpublished version copied from the current latest
    ///
    /// Version-scoped records are copied forward to the new version.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ItemNotFound` if the item does not exist.
    fn new_version(&self, item: ContentItemId) -> StorageResult<VersionRow>;

    /// Publish the latest version, unpublishing any other version
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ItemNotFound` if the item does not exist or
    /// has been removed.
    fn publish(&self, item: ContentItemId) -> StorageResult<VersionRow>;

    /// Clear the published flag; returns the version that was published
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ItemNotFound` if the item does not exist.
    fn unpublish(&self, item: ContentItemId) -> StorageResult<Option<VersionRow>>;

    /// Clear the published and latest flags of every version
    ///
    /// Removed items stay visible to `VersionOptions::AllVersions`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ItemNotFound` if the item does not exist.
    fn remove(&self, item: ContentItemId) -> StorageResult<()>;
}

//! Quarry - typed content queries over versioned content items
//!
//! Quarry stores content items as chains of versions (at most one published,
//! at most one latest) carrying typed records, and lets callers compose
//! queries over them: version filters, inner joins against record types with
//! predicates, one ordering key and a pagination window. Results are
//! materialized as content items or projected into typed part facades.
//!
//! # Quick Start
//!
//! ```
//! use quarry::{
//!     register_core_parts, CommonPartRecord, ContentManager, ContentTypeDefinition,
//!     VersionOptions,
//! };
//!
//! let manager = ContentManager::in_memory();
//! register_core_parts(&manager);
//! manager.register_type(ContentTypeDefinition::new("Item").with_part("CommonPart"));
//!
//! let item = manager.create("Item", VersionOptions::Published)?;
//! manager.put_record(&item, CommonPartRecord::new(chrono::Utc::now()))?;
//!
//! let mut query = manager.query(VersionOptions::Published, "Item")?;
//! let common = query.join::<CommonPartRecord>()?;
//! query.order_by_descending(common, |c| c.created_utc).slice(0, 10);
//! assert_eq!(query.list()?.len(), 1);
//! # Ok::<(), quarry::QuarryError>(())
//! ```
//!
//! # Architecture
//!
//! - `quarry-core`: ids, version filters, records, the storage trait, errors
//! - `quarry-storage`: the in-memory storage provider
//! - `quarry-engine`: content manager, queries, items and parts, config
//! - `quarry-blogs`: blog parts and the recent posts driver

pub use quarry_core::{
    ContentItemId, ContentStorage, QuarryError, QuarryResult, Record, RecordScope, RecordType,
    StorageError, StorageResult, VersionOptions, VersionRecordId, VersionRow,
};
pub use quarry_engine::{
    register_core_parts, BlogsConfig, CommonPart, CommonPartRecord, ContentHandler, ContentItem,
    ContentManager, ContentTypeDefinition, ContentTypeRegistry, JoinHandle, Part, QuarryConfig, Query,
    QueryStream, RoutePart, RoutePartRecord, Take,
};
pub use quarry_storage::MemoryStore;

/// Blogs module
pub mod blogs {
    pub use quarry_blogs::*;
}

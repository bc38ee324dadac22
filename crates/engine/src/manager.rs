//! ContentManager: entry point for content items and queries
//!
//! ## Design
//!
//! ContentManager is a stateless facade over a storage provider and the
//! content type registry. It holds no in-memory state beyond `Arc`
//! references, so clones are cheap and share everything.
//!
//! ## Thread Safety
//!
//! ContentManager is `Send + Sync` and can be shared across threads.
//!
//! ## API
//!
//! - `register_record` / `register_type` - mappings and type definitions
//! - `register_handler` - hooks run for newly created items
//! - `create` / `get` / `all_versions` - item access
//! - `new_draft` / `publish` / `unpublish` / `remove` - version lifecycle
//! - `put_record` - write an item's record
//! - `query` / `query_part` / `query_default` - typed queries

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use quarry_core::{
    erase, ContentItemId, ContentStorage, QuarryError, QuarryResult, Record, RecordType,
    VersionOptions, VersionRow,
};
use quarry_storage::MemoryStore;

use crate::config::QuarryConfig;
use crate::handler::{ContentHandler, ContentHandlers};
use crate::item::ContentItem;
use crate::part::Part;
use crate::query::Query;
use crate::registry::{ContentTypeDefinition, ContentTypeRegistry};

/// Content manager facade
///
/// # Example
///
/// ```
/// use quarry_core::VersionOptions;
/// use quarry_engine::{ContentManager, ContentTypeDefinition};
///
/// let manager = ContentManager::in_memory();
/// manager.register_type(ContentTypeDefinition::new("Page"));
///
/// let page = manager.create("Page", VersionOptions::Draft).unwrap();
/// assert!(!page.is_published());
///
/// let published = manager.publish(page.id()).unwrap();
/// assert!(published.is_published());
/// ```
#[derive(Clone)]
pub struct ContentManager {
    storage: Arc<dyn ContentStorage>,
    types: Arc<ContentTypeRegistry>,
    handlers: Arc<ContentHandlers>,
    config: Arc<QuarryConfig>,
}

impl ContentManager {
    /// Create a manager over a storage provider
    pub fn new(storage: Arc<dyn ContentStorage>, config: QuarryConfig) -> Self {
        Self {
            storage,
            types: Arc::new(ContentTypeRegistry::new()),
            handlers: Arc::new(ContentHandlers::new()),
            config: Arc::new(config),
        }
    }

    /// Create a manager over a fresh `MemoryStore` with default settings
    pub fn in_memory() -> Self {
        Self::in_memory_with(QuarryConfig::default())
    }

    /// Create a manager over a fresh `MemoryStore` with the given settings
    pub fn in_memory_with(config: QuarryConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// Create an in-memory manager configured from a `quarry.toml` file
    ///
    /// The default config file is written first if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::Config` if the file cannot be written, read or
    /// parsed.
    pub fn open(config_path: &Path) -> QuarryResult<Self> {
        QuarryConfig::write_default_if_missing(config_path)?;
        let config = QuarryConfig::from_file(config_path)?;
        info!(target: "quarry::content", path = %config_path.display(), versions = %config.default_versions, "Content manager opened");
        Ok(Self::in_memory_with(config))
    }

    /// Engine configuration
    pub fn config(&self) -> &QuarryConfig {
        &self.config
    }

    /// Storage provider
    pub fn storage(&self) -> &Arc<dyn ContentStorage> {
        &self.storage
    }

    /// Content type registry
    pub fn types(&self) -> &Arc<ContentTypeRegistry> {
        &self.types
    }

    // ========== Registration ==========

    /// Map record type `R` in storage
    ///
    /// Idempotent.
    pub fn register_record<R: Record>(&self) {
        self.storage.map_record(RecordType::of::<R>());
    }

    /// Register a content type, replacing any previous definition
    pub fn register_type(&self, definition: ContentTypeDefinition) -> Arc<ContentTypeDefinition> {
        debug!(target: "quarry::content", content_type = definition.name(), parts = ?definition.parts(), "Content type registered");
        self.types.register(definition)
    }

    /// Register a handler run for every newly created item
    ///
    /// Returns false if a handler with the same name is already registered.
    pub fn register_handler(&self, handler: ContentHandler) -> bool {
        self.handlers.register(handler)
    }

    /// Look up a content type definition
    pub fn content_type(&self, name: &str) -> Option<Arc<ContentTypeDefinition>> {
        self.types.get(name)
    }

    // ========== Items ==========

    /// Create a content item at version 1
    ///
    /// `Published` creates a published first version; `Draft` and
    /// `DraftRequired` create an unpublished one. Registered handlers run
    /// before the item is returned.
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::InvalidType` for an unregistered type and
    /// `QuarryError::InvalidInput` for any other version option.
    pub fn create(&self, content_type: &str, options: VersionOptions) -> QuarryResult<ContentItem> {
        if !self.types.contains(content_type) {
            return Err(QuarryError::invalid_type(content_type));
        }
        let published = match options {
            VersionOptions::Published => true,
            VersionOptions::Draft | VersionOptions::DraftRequired => false,
            other => {
                return Err(QuarryError::invalid_input(format!(
                    "cannot create an item with version option '{}'",
                    other
                )))
            }
        };

        let row = self.storage.create_item(content_type, published)?;
        debug!(target: "quarry::content", item = %row.item_id, content_type, published, "Content item created");
        let item = self.materialize(row)?;
        if self.handlers.is_empty() {
            return Ok(item);
        }

        // Reload so the returned item carries the handlers' records
        self.handlers.created(self, &item)?;
        self.materialize(item.row().clone())
    }

    /// Write record `R` for the item's version
    ///
    /// Item-scoped records are shared by every version of the item;
    /// version-scoped records belong to `item`'s version only.
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::UnmappedRecord` if `R` is not mapped, or
    /// `QuarryError::ItemNotFound` if the item does not exist.
    pub fn put_record<R: Record>(&self, item: &ContentItem, record: R) -> QuarryResult<()> {
        let record_type = RecordType::of::<R>();
        if !self.storage.is_mapped(&record_type) {
            return Err(QuarryError::unmapped_record(R::NAME));
        }
        self.storage
            .put_record(&record_type, item.row(), erase(record))?;
        Ok(())
    }

    /// Get the version of an item selected by `options`
    ///
    /// When several versions match (`AllVersions`), the newest is returned.
    pub fn get(&self, id: ContentItemId, options: VersionOptions) -> QuarryResult<Option<ContentItem>> {
        match self.storage.item_versions(id, options)?.pop() {
            Some(row) => self.materialize(row).map(Some),
            None => Ok(None),
        }
    }

    /// Every version of an item, oldest first
    pub fn all_versions(&self, id: ContentItemId) -> QuarryResult<Vec<ContentItem>> {
        self.storage
            .item_versions(id, VersionOptions::AllVersions)?
            .into_iter()
            .map(|row| self.materialize(row))
            .collect()
    }

    // ========== Lifecycle ==========

    /// Create a new unpublished latest version copied from the latest one
    ///
    /// The published version, if any, stays published.
    pub fn new_draft(&self, id: ContentItemId) -> QuarryResult<ContentItem> {
        let row = self.storage.new_version(id)?;
        self.materialize(row)
    }

    /// Publish the latest version, unpublishing every other version
    pub fn publish(&self, id: ContentItemId) -> QuarryResult<ContentItem> {
        let row = self.storage.publish(id)?;
        self.materialize(row)
    }

    /// Clear the published flag
    ///
    /// Returns false if the item had no published version.
    pub fn unpublish(&self, id: ContentItemId) -> QuarryResult<bool> {
        Ok(self.storage.unpublish(id)?.is_some())
    }

    /// Remove an item: no version stays published or latest
    ///
    /// Removed items are only visible to `AllVersions`.
    pub fn remove(&self, id: ContentItemId) -> QuarryResult<()> {
        self.storage.remove(id)?;
        Ok(())
    }

    // ========== Queries ==========

    /// Query items of one content type
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::InvalidType` if the type is not registered.
    pub fn query(&self, options: VersionOptions, content_type: &str) -> QuarryResult<Query> {
        if !self.types.contains(content_type) {
            return Err(QuarryError::invalid_type(content_type));
        }
        Ok(self.build_query(options, vec![content_type.to_string()]))
    }

    /// Query items of every content type carrying part `P`
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::InvalidType` if no registered type carries `P`.
    pub fn query_part<P: Part>(&self, options: VersionOptions) -> QuarryResult<Query> {
        let content_types = self.types.types_with_part(P::NAME);
        if content_types.is_empty() {
            return Err(QuarryError::invalid_type(P::NAME));
        }
        Ok(self.build_query(options, content_types))
    }

    /// Query one content type with the configured default version filter
    pub fn query_default(&self, content_type: &str) -> QuarryResult<Query> {
        let options = self.config.version_options()?;
        self.query(options, content_type)
    }

    fn build_query(&self, options: VersionOptions, content_types: Vec<String>) -> Query {
        Query::new(
            Arc::clone(&self.storage),
            Arc::clone(&self.types),
            options,
            content_types,
            self.config.slow_query_threshold(),
        )
    }

    fn materialize(&self, row: VersionRow) -> QuarryResult<ContentItem> {
        Ok(ContentItem::load(self.storage.as_ref(), &self.types, row)?)
    }
}

impl std::fmt::Debug for ContentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentManager")
            .field("types", &self.types.names())
            .field("records", &self.storage.mapped_records().len())
            .finish()
    }
}

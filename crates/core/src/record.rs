//! Record types: the persisted rows underlying content parts
//!
//! A record is plain row data (creation timestamp, container reference,
//! slug...). Storage holds records type-erased; the engine recovers the
//! concrete type through `RecordType` and `record_ref`.
//!
//! ## Scope
//!
//! - `RecordScope::Item`: one row per content item, shared by all versions
//! - `RecordScope::Version`: one row per version, copied forward into new drafts

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::types::{ContentItemId, VersionRecordId, VersionRow};

/// Type-erased record as held by storage
pub type ErasedRecord = Arc<dyn Any + Send + Sync>;

/// How a record type is keyed in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordScope {
    /// One row per content item
    Item,
    /// One row per content item version
    Version,
}

/// A persisted record type
///
/// Records are immutable once written; an update replaces the row.
///
/// # Example
///
/// ```
/// use quarry_core::{Record, RecordScope};
///
/// #[derive(Debug, Clone)]
/// struct TagRecord {
///     tags: Vec<String>,
/// }
///
/// impl Record for TagRecord {
///     const NAME: &'static str = "TagRecord";
///     const SCOPE: RecordScope = RecordScope::Item;
/// }
/// ```
pub trait Record: Any + Clone + fmt::Debug + Send + Sync {
    /// Record type name, used in errors and logs
    const NAME: &'static str;
    /// How rows of this type are keyed
    const SCOPE: RecordScope;
}

/// Runtime descriptor of a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    scope: RecordScope,
}

impl RecordType {
    /// Descriptor for a concrete record type
    pub fn of<R: Record>() -> Self {
        RecordType {
            id: TypeId::of::<R>(),
            name: R::NAME,
            scope: R::SCOPE,
        }
    }

    /// Rust type identity
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Record type name
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Storage scope
    #[inline]
    pub fn scope(&self) -> RecordScope {
        self.scope
    }

    /// Storage key of this record type's row for a version row
    pub fn owner_for(&self, row: &VersionRow) -> RecordOwner {
        match self.scope {
            RecordScope::Item => RecordOwner::Item(row.item_id),
            RecordScope::Version => RecordOwner::Version(row.version_id),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Row key inside a record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordOwner {
    /// Item-scoped row
    Item(ContentItemId),
    /// Version-scoped row
    Version(VersionRecordId),
}

/// Erase a record for storage
pub fn erase<R: Record>(record: R) -> ErasedRecord {
    Arc::new(record)
}

/// Borrow the concrete record behind an erased one
#[inline]
pub fn record_ref<R: Record>(erased: &ErasedRecord) -> Option<&R> {
    erased.as_ref().downcast_ref::<R>()
}

/// Recover a shared handle to the concrete record
pub fn downcast_record<R: Record>(erased: &ErasedRecord) -> Option<Arc<R>> {
    Arc::clone(erased).downcast::<R>().ok()
}

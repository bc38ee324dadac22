//! Per-record-type tables
//!
//! Each mapped record type gets its own table, held in a `DashMap` shard
//! keyed by the record's `TypeId`. Writes to one record type never contend
//! with reads of another.

use quarry_core::{ErasedRecord, RecordOwner};
use rustc_hash::FxHashMap;

/// Rows of one record type, keyed by owner (item or version)
#[derive(Debug, Default)]
pub struct RecordTable {
    rows: FxHashMap<RecordOwner, ErasedRecord>,
}

impl RecordTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            rows: FxHashMap::default(),
        }
    }

    /// Get the row of an owner
    #[inline]
    pub fn get(&self, owner: &RecordOwner) -> Option<&ErasedRecord> {
        self.rows.get(owner)
    }

    /// Insert or replace the row of an owner
    pub fn put(&mut self, owner: RecordOwner, record: ErasedRecord) -> Option<ErasedRecord> {
        self.rows.insert(owner, record)
    }

    /// Copy a row to a new owner
    ///
    /// Records are immutable, so the copy shares the stored value.
    /// Returns false if the source has no row.
    pub fn copy_forward(&mut self, from: RecordOwner, to: RecordOwner) -> bool {
        match self.rows.get(&from).cloned() {
            Some(record) => {
                self.rows.insert(to, record);
                true
            }
            None => false,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{ContentItemId, VersionRecordId};
    use std::sync::Arc;

    fn version(n: u64) -> RecordOwner {
        RecordOwner::Version(VersionRecordId::new(n))
    }

    #[test]
    fn test_put_and_get() {
        let mut table = RecordTable::new();
        let owner = RecordOwner::Item(ContentItemId::new(1));
        assert!(table.put(owner, Arc::new(7u32)).is_none());
        let row = table.get(&owner).unwrap();
        assert_eq!(row.downcast_ref::<u32>(), Some(&7));
        assert!(table.put(owner, Arc::new(8u32)).is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_copy_forward() {
        let mut table = RecordTable::new();
        table.put(version(1), Arc::new("slug".to_string()));

        assert!(table.copy_forward(version(1), version(2)));
        assert!(!table.copy_forward(version(3), version(4)));
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(&version(2)).unwrap().downcast_ref::<String>(),
            Some(&"slug".to_string())
        );
    }
}

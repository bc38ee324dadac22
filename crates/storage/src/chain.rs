//! Per-item version chains
//!
//! Every content item owns a chain of version metadata. The chain enforces
//! the versioning invariants:
//! - at most one version is published
//! - at most one version is latest (none once the item is removed)
//! - version numbers grow by one per appended version
//!
//! Versions are stored newest-first, matching the most common read
//! (latest / published lookups walk from the front).

use std::collections::VecDeque;

use quarry_core::{ContentItemId, VersionOptions, VersionRecordId, VersionRow};

/// Flags and identity of one stored version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMeta {
    /// Version record identity (storage order)
    pub id: VersionRecordId,
    /// Per-item version number
    pub number: u32,
    /// Published flag
    pub published: bool,
    /// Latest flag
    pub latest: bool,
}

impl VersionMeta {
    /// Metadata for a brand new version
    pub fn new(id: VersionRecordId, number: u32, published: bool) -> Self {
        Self {
            id,
            number,
            published,
            latest: true,
        }
    }
}

/// Version chain of one content item, newest first
///
/// Uses VecDeque for O(1) push_front when appending versions.
#[derive(Debug, Clone)]
pub struct VersionChain {
    versions: VecDeque<VersionMeta>,
}

impl VersionChain {
    /// Create a chain holding its first version
    pub fn new(first: VersionMeta) -> Self {
        let mut versions = VecDeque::with_capacity(2);
        versions.push_front(first);
        Self { versions }
    }

    /// Append a new latest version
    ///
    /// Clears the latest flag of every older version. If the new version is
    /// published, older versions are unpublished.
    pub fn push(&mut self, meta: VersionMeta) {
        for v in self.versions.iter_mut() {
            v.latest = false;
            if meta.published {
                v.published = false;
            }
        }
        self.versions.push_front(meta);
    }

    /// The version flagged latest, if the item is not removed
    pub fn latest(&self) -> Option<&VersionMeta> {
        self.versions.iter().find(|v| v.latest)
    }

    /// The most recently appended version, whatever its flags
    #[inline]
    pub fn newest(&self) -> Option<&VersionMeta> {
        self.versions.front()
    }

    /// The published version, if any
    pub fn published(&self) -> Option<&VersionMeta> {
        self.versions.iter().find(|v| v.published)
    }

    /// Number to assign to the next appended version
    pub fn next_number(&self) -> u32 {
        self.newest().map(|v| v.number.saturating_add(1)).unwrap_or(1)
    }

    /// Mark the latest version published and every other version unpublished
    ///
    /// Returns the published version, or None if the item has no latest
    /// version (removed).
    pub fn publish_latest(&mut self) -> Option<VersionMeta> {
        let latest_id = self.latest()?.id;
        let mut published = None;
        for v in self.versions.iter_mut() {
            v.published = v.id == latest_id;
            if v.published {
                published = Some(*v);
            }
        }
        published
    }

    /// Clear the published flag, returning the version that held it
    pub fn unpublish(&mut self) -> Option<VersionMeta> {
        let v = self.versions.iter_mut().find(|v| v.published)?;
        v.published = false;
        Some(*v)
    }

    /// Clear published and latest flags on every version
    pub fn remove_all(&mut self) {
        for v in self.versions.iter_mut() {
            v.published = false;
            v.latest = false;
        }
    }

    /// Versions passing a filter, oldest first
    pub fn matching(&self, options: VersionOptions) -> impl Iterator<Item = &VersionMeta> + '_ {
        self.versions
            .iter()
            .rev()
            .filter(move |v| options.admits(v.published, v.latest, v.number))
    }

    /// Number of versions stored
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// A stored content item: its type and version chain
#[derive(Debug, Clone)]
pub struct ItemEntry {
    /// Content type name
    pub content_type: String,
    /// Version chain
    pub chain: VersionChain,
}

impl ItemEntry {
    /// Create an entry with a first version
    pub fn new(content_type: impl Into<String>, first: VersionMeta) -> Self {
        Self {
            content_type: content_type.into(),
            chain: VersionChain::new(first),
        }
    }

    /// Build the public row for one of this entry's versions
    pub fn row(&self, item_id: ContentItemId, meta: &VersionMeta) -> VersionRow {
        VersionRow {
            item_id,
            version_id: meta.id,
            number: meta.number,
            content_type: self.content_type.clone(),
            published: meta.published,
            latest: meta.latest,
        }
    }
}

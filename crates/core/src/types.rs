//! Core types for Quarry
//!
//! This module defines the foundational identity types:
//! - ContentItemId: Stable identity of a content item across all its versions
//! - VersionRecordId: Identity of one stored version of a content item
//! - VersionRow: Raw version metadata enumerated by storage providers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a content item
///
/// Every version of a content item shares the same `ContentItemId`.
/// Identifiers are allocated by the storage provider and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentItemId(u64);

impl ContentItemId {
    /// Create an identifier from its raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

impl From<u64> for ContentItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a single stored version of a content item
///
/// Version record ids are allocated from one global, monotonically
/// increasing counter. Ascending version record id is the storage order
/// used to break ordering ties in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionRecordId(u64);

impl VersionRecordId {
    /// Create an identifier from its raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VersionRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ver:{}", self.0)
    }
}

/// Version metadata for one version of a content item
///
/// This is the row shape storage providers enumerate for queries. It
/// carries no part data; records are loaded separately per record type.
///
/// ## Invariants
///
/// - At most one row per `item_id` has `published == true`
/// - At most one row per `item_id` has `latest == true`
/// - `number` starts at 1 and increases by one per new version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRow {
    /// Content item identity
    pub item_id: ContentItemId,
    /// Identity of this version
    pub version_id: VersionRecordId,
    /// Per-item version number
    pub number: u32,
    /// Content type name of the item
    pub content_type: String,
    /// Whether this version is the published one
    pub published: bool,
    /// Whether this version is the latest one
    pub latest: bool,
}

impl VersionRow {
    /// Whether this row is a draft (latest but not published)
    #[inline]
    pub fn is_draft(&self) -> bool {
        self.latest && !self.published
    }
}

impl fmt::Display for VersionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} ({}, {})",
            self.item_id, self.number, self.content_type, self.version_id
        )
    }
}

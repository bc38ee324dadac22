//! Storage layer for Quarry
//!
//! This crate implements the in-memory content storage provider with:
//! - MemoryStore: BTreeMap item table behind a RwLock
//! - Per-item version chains enforcing the published / latest invariants
//! - DashMap shards holding one table per mapped record type
//! - Secondary index (content type → item ids)
//! - Id allocation with AtomicU64

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod index;
pub mod memory;
pub mod registry;
pub mod table;

pub use chain::{ItemEntry, VersionChain, VersionMeta};
pub use index::ContentTypeIndex;
pub use memory::MemoryStore;
pub use registry::RecordRegistry;
pub use table::RecordTable;

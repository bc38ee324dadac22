//! Core types and traits for Quarry
//!
//! This crate defines the foundational types used throughout the system:
//! - ContentItemId / VersionRecordId: Identity of items and their versions
//! - VersionRow: Version metadata enumerated by storage providers
//! - VersionOptions: Version filter for reads
//! - Record / RecordType: Persisted row types underlying content parts
//! - ContentStorage: Storage provider boundary
//! - Error: `StorageError` and `QuarryError`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use contract::VersionOptions;
pub use error::{QuarryError, QuarryResult, StorageError, StorageResult};
pub use record::{
    downcast_record, erase, record_ref, ErasedRecord, Record, RecordOwner, RecordScope,
    RecordType,
};
pub use traits::ContentStorage;
pub use types::{ContentItemId, VersionRecordId, VersionRow};

//! Error types for Quarry
//!
//! Two layers of errors are defined here:
//! - `StorageError`: failures raised by a storage provider
//! - `QuarryError`: errors surfaced to callers of the content manager and
//!   query engine
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//! "Not found" from a query is never an error; absence is an empty sequence
//! or `None`.

use crate::types::ContentItemId;
use thiserror::Error;

/// Result type alias for storage provider operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for engine operations
pub type QuarryResult<T> = std::result::Result<T, QuarryError>;

/// Errors raised by a storage provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backend could not serve the request (connectivity, timeout, shutdown)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Record type has no storage mapping
    #[error("record type {record} has no storage mapping")]
    UnmappedRecord {
        /// Record type name
        record: &'static str,
    },

    /// Content item does not exist
    #[error("content item not found: {0}")]
    ItemNotFound(ContentItemId),

    /// Stored data does not match its mapping
    #[error("storage corruption: {0}")]
    Corruption(String),
}

impl StorageError {
    /// Create an unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable(reason.into())
    }

    /// Create a corruption error
    pub fn corruption(reason: impl Into<String>) -> Self {
        StorageError::Corruption(reason.into())
    }
}

/// Errors surfaced by the content manager and query engine
#[derive(Debug, Error)]
pub enum QuarryError {
    /// Content type or part type has no registered mapping
    #[error("invalid type: {name} is not a registered content type or part")]
    InvalidType {
        /// Requested type name
        name: String,
    },

    /// Join or write target has no record mapping
    #[error("unmapped record: {record} has no storage mapping")]
    UnmappedRecord {
        /// Record type name
        record: String,
    },

    /// Storage failed while a query was executing
    ///
    /// Not retried; retry policy belongs to the caller.
    #[error("query execution failed: {source}")]
    QueryExecution {
        /// Underlying storage failure
        #[source]
        source: StorageError,
    },

    /// Content item does not exist (write paths only)
    #[error("content item not found: {0}")]
    ItemNotFound(ContentItemId),

    /// Invalid input supplied by the caller
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem
        reason: String,
    },

    /// Configuration could not be read or is invalid
    #[error("configuration error: {reason}")]
    Config {
        /// Description of the problem
        reason: String,
    },

    /// Storage failed outside query execution
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl QuarryError {
    /// Create an invalid type error
    pub fn invalid_type(name: impl Into<String>) -> Self {
        QuarryError::InvalidType { name: name.into() }
    }

    /// Create an unmapped record error
    pub fn unmapped_record(record: impl Into<String>) -> Self {
        QuarryError::UnmappedRecord {
            record: record.into(),
        }
    }

    /// Wrap a storage failure raised during query execution
    pub fn query_execution(source: StorageError) -> Self {
        QuarryError::QueryExecution { source }
    }

    /// Create an invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        QuarryError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        QuarryError::Config {
            reason: reason.into(),
        }
    }

    /// Whether this error was detected before any storage access
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            QuarryError::InvalidType { .. }
                | QuarryError::UnmappedRecord { .. }
                | QuarryError::InvalidInput { .. }
        )
    }
}

impl From<StorageError> for QuarryError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::ItemNotFound(id) => QuarryError::ItemNotFound(id),
            StorageError::UnmappedRecord { record } => QuarryError::unmapped_record(record),
            other => QuarryError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_invalid_type() {
        let err = QuarryError::invalid_type("Widget");
        let msg = err.to_string();
        assert!(msg.contains("invalid type"));
        assert!(msg.contains("Widget"));
    }

    #[test]
    fn test_error_display_unmapped_record() {
        let err = QuarryError::unmapped_record("TagRecord");
        assert!(err.to_string().contains("TagRecord"));
    }

    #[test]
    fn test_query_execution_keeps_source() {
        let err = QuarryError::query_execution(StorageError::unavailable("connection reset"));
        assert!(err.to_string().contains("connection reset"));
        let source = err.source().unwrap();
        assert!(source.to_string().contains("storage unavailable"));
    }

    #[test]
    fn test_from_storage_item_not_found() {
        let err: QuarryError = StorageError::ItemNotFound(ContentItemId::new(3)).into();
        assert!(matches!(err, QuarryError::ItemNotFound(id) if id == ContentItemId::new(3)));
    }

    #[test]
    fn test_from_storage_unmapped() {
        let err: QuarryError = StorageError::UnmappedRecord { record: "Foo" }.into();
        assert!(matches!(err, QuarryError::UnmappedRecord { ref record } if record == "Foo"));
    }

    #[test]
    fn test_from_storage_other() {
        let err: QuarryError = StorageError::corruption("bad row").into();
        assert!(matches!(err, QuarryError::Storage(StorageError::Corruption(_))));
    }

    #[test]
    fn test_build_error_classification() {
        assert!(QuarryError::invalid_type("x").is_build_error());
        assert!(QuarryError::unmapped_record("x").is_build_error());
        assert!(!QuarryError::query_execution(StorageError::unavailable("x")).is_build_error());
        assert!(!QuarryError::config("x").is_build_error());
    }
}

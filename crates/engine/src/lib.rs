//! Content engine for Quarry
//!
//! This crate sits on top of a storage provider and offers:
//! - ContentManager: item creation, version lifecycle, record writes
//! - Content handlers: hooks run for newly created items
//! - Content type registry: types composed of named parts
//! - Query: typed joins, predicates, ordering and pagination
//! - ContentItem / Part: materialized items and lazily activated part facades
//! - Built-in common and route parts
//! - QuarryConfig: settings loaded from `quarry.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handler;
pub mod item;
pub mod manager;
pub mod part;
pub mod parts;
pub mod query;
pub mod registry;

pub use config::{BlogsConfig, QuarryConfig, CONFIG_FILE_NAME};
pub use handler::{ContentHandler, ContentHandlers, CreatedFn};
pub use item::ContentItem;
pub use manager::ContentManager;
pub use part::Part;
pub use parts::{
    register_core_parts, CommonPart, CommonPartRecord, RoutePart, RoutePartRecord,
};
pub use query::{JoinHandle, Query, QueryStream, Take};
pub use registry::{ContentTypeDefinition, ContentTypeRegistry};

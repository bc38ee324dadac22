//! Built-in parts
//!
//! - `CommonPart`: owner, container and timestamps (item-scoped)
//! - `RoutePart`: title, slug and path (version-scoped)

pub mod common;
pub mod route;

pub use common::{CommonPart, CommonPartRecord};
pub use route::{RoutePart, RoutePartRecord};

use crate::manager::ContentManager;

/// Map the records of the built-in parts
pub fn register_core_parts(manager: &ContentManager) {
    manager.register_record::<CommonPartRecord>();
    manager.register_record::<RoutePartRecord>();
}

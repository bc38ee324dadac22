//! Blog lookups

use std::sync::Arc;

use tracing::debug;

use quarry_core::{QuarryResult, VersionOptions};
use quarry_engine::{ContentManager, RoutePartRecord};

use crate::models::BlogPart;

/// Read access to published blogs
///
/// Stateless facade over a `ContentManager`.
#[derive(Debug, Clone)]
pub struct BlogService {
    manager: ContentManager,
}

impl BlogService {
    /// Create a service over a content manager
    pub fn new(manager: ContentManager) -> Self {
        Self { manager }
    }

    /// All published blogs, in storage order
    pub fn get(&self) -> QuarryResult<Vec<Arc<BlogPart>>> {
        self.manager
            .query_part::<BlogPart>(VersionOptions::Published)?
            .select_part::<BlogPart>()
            .collect()
    }

    /// The published blog with a slug, if any
    ///
    /// Finds exactly the blogs `get` lists; the blog record is optional.
    pub fn get_by_slug(&self, slug: &str) -> QuarryResult<Option<Arc<BlogPart>>> {
        let mut query = self.manager.query_part::<BlogPart>(VersionOptions::Published)?;
        let route = query.join::<RoutePartRecord>()?;
        let wanted = slug.to_string();
        query.filter(route, move |r| r.slug == wanted);

        let blog = query
            .first_or_default()?
            .and_then(|item| item.as_part::<BlogPart>());
        debug!(target: "quarry::blogs", slug, found = blog.is_some(), "Blog lookup");
        Ok(blog)
    }
}

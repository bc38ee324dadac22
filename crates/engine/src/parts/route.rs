//! Route part: title, slug and path

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use quarry_core::{Record, RecordScope};

use crate::item::ContentItem;
use crate::part::Part;

/// Version-scoped record; a new draft starts with a copy of it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePartRecord {
    /// Display title
    pub title: String,
    /// URL segment, unique among siblings
    pub slug: String,
    /// Full path
    pub path: String,
}

impl RoutePartRecord {
    /// Record with the path equal to the slug
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            title: title.into(),
            path: slug.clone(),
            slug,
        }
    }

    /// Set the full path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl Record for RoutePartRecord {
    const NAME: &'static str = "RoutePartRecord";
    const SCOPE: RecordScope = RecordScope::Version;
}

/// Facade over `RoutePartRecord`
#[derive(Debug, Clone)]
pub struct RoutePart {
    record: Arc<RoutePartRecord>,
}

impl RoutePart {
    /// Display title
    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// URL segment
    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    /// Full path
    pub fn path(&self) -> &str {
        &self.record.path
    }
}

impl Part for RoutePart {
    const NAME: &'static str = "RoutePart";

    fn activate(item: &ContentItem) -> Option<Self> {
        Some(RoutePart {
            record: item.record::<RoutePartRecord>()?,
        })
    }
}

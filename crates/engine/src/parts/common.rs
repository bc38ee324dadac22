//! Common part: ownership, containment and timestamps

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quarry_core::{ContentItemId, Record, RecordScope};

use crate::item::ContentItem;
use crate::part::Part;

/// Item-scoped record shared by every version of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPartRecord {
    /// Owning user id
    pub owner_id: u64,
    /// Containing item (a blog for a blog post)
    pub container: Option<ContentItemId>,
    /// Creation time
    pub created_utc: DateTime<Utc>,
    /// Time of the last publication
    pub published_utc: Option<DateTime<Utc>>,
    /// Time of the last modification
    pub modified_utc: Option<DateTime<Utc>>,
}

impl CommonPartRecord {
    /// Record for an item created at `created_utc`
    pub fn new(created_utc: DateTime<Utc>) -> Self {
        Self {
            owner_id: 0,
            container: None,
            created_utc,
            published_utc: None,
            modified_utc: None,
        }
    }

    /// Set the containing item
    pub fn with_container(mut self, container: ContentItemId) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the owner
    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }
}

impl Record for CommonPartRecord {
    const NAME: &'static str = "CommonPartRecord";
    const SCOPE: RecordScope = RecordScope::Item;
}

/// Facade over `CommonPartRecord`
#[derive(Debug, Clone)]
pub struct CommonPart {
    record: Arc<CommonPartRecord>,
}

impl CommonPart {
    /// Underlying record
    pub fn record(&self) -> &CommonPartRecord {
        &self.record
    }

    /// Owning user id
    pub fn owner_id(&self) -> u64 {
        self.record.owner_id
    }

    /// Containing item, if any
    pub fn container(&self) -> Option<ContentItemId> {
        self.record.container
    }

    /// Creation time
    pub fn created_utc(&self) -> DateTime<Utc> {
        self.record.created_utc
    }

    /// Time of the last publication
    pub fn published_utc(&self) -> Option<DateTime<Utc>> {
        self.record.published_utc
    }

    /// Time of the last modification
    pub fn modified_utc(&self) -> Option<DateTime<Utc>> {
        self.record.modified_utc
    }
}

impl Part for CommonPart {
    const NAME: &'static str = "CommonPart";

    fn activate(item: &ContentItem) -> Option<Self> {
        Some(CommonPart {
            record: item.record::<CommonPartRecord>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_builders() {
        let created = Utc.with_ymd_and_hms(2011, 3, 1, 12, 0, 0).unwrap();
        let record = CommonPartRecord::new(created)
            .with_container(ContentItemId::new(4))
            .with_owner(2);
        assert_eq!(record.container, Some(ContentItemId::new(4)));
        assert_eq!(record.owner_id, 2);
        assert_eq!(record.created_utc, created);
        assert!(record.published_utc.is_none());
    }

    #[test]
    fn test_record_serde_shape() {
        let created = Utc.with_ymd_and_hms(2011, 3, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(CommonPartRecord::new(created)).unwrap();
        assert_eq!(json["owner_id"], 0);
        assert!(json["container"].is_null());
        assert_eq!(json["created_utc"], "2011-03-01T12:00:00Z");
    }
}

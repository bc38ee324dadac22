//! Shared test utilities for the content suites.

#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use quarry::{
    register_core_parts, CommonPartRecord, ContentItem, ContentItemId, ContentManager,
    ContentTypeDefinition, VersionOptions,
};

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Midnight UTC on a day of January 2011.
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 1, n, 0, 0, 0).unwrap()
}

/// Manager with the core parts mapped and an "Item" type carrying CommonPart.
pub fn item_manager() -> ContentManager {
    init_tracing();
    let manager = ContentManager::in_memory();
    register_core_parts(&manager);
    manager.register_type(
        ContentTypeDefinition::new("Item")
            .with_part("CommonPart")
            .with_part("RoutePart"),
    );
    manager
}

/// Create an "Item" with a common record.
pub fn add_item(
    manager: &ContentManager,
    options: VersionOptions,
    container: Option<ContentItemId>,
    created: DateTime<Utc>,
) -> ContentItem {
    let item = manager.create("Item", options).unwrap();
    let mut record = CommonPartRecord::new(created);
    record.container = container;
    manager.put_record(&item, record).unwrap();
    item
}

/// Item ids in result order.
pub fn ids(items: &[ContentItem]) -> Vec<ContentItemId> {
    items.iter().map(|item| item.id()).collect()
}

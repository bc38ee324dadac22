//! Version filters across the item lifecycle.

use quarry::{CommonPartRecord, VersionOptions};

use crate::common::*;

#[test]
fn list_respects_every_version_filter() {
    let manager = item_manager();
    let published = add_item(&manager, VersionOptions::Published, None, day(1));
    let draft_only = add_item(&manager, VersionOptions::Draft, None, day(2));
    let with_draft = add_item(&manager, VersionOptions::Published, None, day(3));
    manager.new_draft(with_draft.id()).unwrap();

    for options in [
        VersionOptions::Published,
        VersionOptions::Latest,
        VersionOptions::Draft,
        VersionOptions::DraftRequired,
        VersionOptions::AllVersions,
        VersionOptions::Number(1),
        VersionOptions::Number(2),
    ] {
        let items = manager.query(options, "Item").unwrap().list().unwrap();
        assert!(
            items.iter().all(|item| options.matches(item.row())),
            "{}",
            options
        );
    }

    let count = |options| manager.query(options, "Item").unwrap().count().unwrap();
    assert_eq!(count(VersionOptions::Published), 2);
    assert_eq!(count(VersionOptions::Latest), 3);
    assert_eq!(count(VersionOptions::Draft), 2);
    assert_eq!(count(VersionOptions::AllVersions), 4);
    assert_eq!(count(VersionOptions::Number(2)), 1);

    let drafts = manager
        .query(VersionOptions::Draft, "Item")
        .unwrap()
        .list()
        .unwrap();
    assert_eq!(ids(&drafts), vec![draft_only.id(), with_draft.id()]);
    let _ = published;
}

#[test]
fn publishing_new_version_unpublishes_old() {
    let manager = item_manager();
    let item = add_item(&manager, VersionOptions::Published, None, day(1));
    manager.new_draft(item.id()).unwrap();
    manager.publish(item.id()).unwrap();

    let published = manager
        .query(VersionOptions::Published, "Item")
        .unwrap()
        .list()
        .unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].number(), 2);

    let versions = manager.all_versions(item.id()).unwrap();
    assert_eq!(versions.iter().filter(|v| v.is_published()).count(), 1);
}

#[test]
fn removed_items_only_under_all_versions() {
    let manager = item_manager();
    let item = add_item(&manager, VersionOptions::Published, None, day(1));
    manager.remove(item.id()).unwrap();

    for options in [
        VersionOptions::Published,
        VersionOptions::Latest,
        VersionOptions::Draft,
    ] {
        assert_eq!(
            manager.query(options, "Item").unwrap().count().unwrap(),
            0,
            "{}",
            options
        );
    }
    assert_eq!(
        manager
            .query(VersionOptions::AllVersions, "Item")
            .unwrap()
            .count()
            .unwrap(),
        1
    );
}

#[test]
fn item_scoped_records_shared_across_versions() {
    let manager = item_manager();
    let item = add_item(&manager, VersionOptions::Published, None, day(1));
    let draft = manager.new_draft(item.id()).unwrap();
    manager
        .put_record(&draft, CommonPartRecord::new(day(9)))
        .unwrap();

    let published = manager
        .get(item.id(), VersionOptions::Published)
        .unwrap()
        .unwrap();
    assert_eq!(
        published.record::<CommonPartRecord>().unwrap().created_utc,
        day(9)
    );
}

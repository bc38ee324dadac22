//! Query semantics: joins, predicates, ordering, pagination and projection.

use proptest::prelude::*;
use quarry::{
    CommonPart, CommonPartRecord, ContentItemId, QuarryError, Record, RecordScope, RoutePart,
    RoutePartRecord, Take, VersionOptions,
};

use crate::common::*;

#[derive(Debug, Clone)]
struct NeverMapped;

impl Record for NeverMapped {
    const NAME: &'static str = "NeverMapped";
    const SCOPE: RecordScope = RecordScope::Item;
}

#[test]
fn container_scenario_returns_newest_two() {
    let manager = item_manager();
    let x = ContentItemId::new(1000);
    let a = add_item(&manager, VersionOptions::Published, Some(x), day(1));
    let b = add_item(&manager, VersionOptions::Published, Some(x), day(2));
    let c = add_item(&manager, VersionOptions::Published, Some(x), day(3));
    let _ = a;

    let mut query = manager.query(VersionOptions::Published, "Item").unwrap();
    let common = query.join::<CommonPartRecord>().unwrap();
    query
        .filter(common, move |r| r.container == Some(x))
        .order_by_descending(common, |r| r.created_utc)
        .slice(0, 2);

    assert_eq!(ids(&query.list().unwrap()), vec![c.id(), b.id()]);
}

#[test]
fn two_joins_require_both_predicates() {
    let manager = item_manager();
    let x = ContentItemId::new(1000);
    let y = ContentItemId::new(2000);

    let mut expected = Vec::new();
    for (container, slug) in [(x, "keep"), (x, "drop"), (y, "keep"), (y, "drop")] {
        let item = add_item(&manager, VersionOptions::Published, Some(container), day(1));
        manager
            .put_record(&item, RoutePartRecord::new(slug, slug))
            .unwrap();
        if container == x && slug == "keep" {
            expected.push(item.id());
        }
    }

    let mut query = manager.query(VersionOptions::Published, "Item").unwrap();
    let common = query.join::<CommonPartRecord>().unwrap();
    let route = query.join::<RoutePartRecord>().unwrap();
    query
        .filter(common, move |r| r.container == Some(x))
        .filter(route, |r| r.slug == "keep");

    assert_eq!(ids(&query.list().unwrap()), expected);
}

#[test]
fn first_or_default_on_no_match_is_none() {
    let manager = item_manager();
    let query = manager.query(VersionOptions::Published, "Item").unwrap();
    assert!(query.first_or_default().unwrap().is_none());
}

#[test]
fn unmapped_join_fails_immediately() {
    let manager = item_manager();
    let mut query = manager.query(VersionOptions::Published, "Item").unwrap();
    assert!(matches!(
        query.join::<NeverMapped>(),
        Err(QuarryError::UnmappedRecord { .. })
    ));
}

#[test]
fn unknown_type_is_invalid_type() {
    let manager = item_manager();
    assert!(matches!(
        manager.query(VersionOptions::Published, "Nope"),
        Err(QuarryError::InvalidType { .. })
    ));
}

#[test]
fn later_order_replaces_earlier() {
    let manager = item_manager();
    let first = add_item(&manager, VersionOptions::Published, None, day(2));
    let second = add_item(&manager, VersionOptions::Published, None, day(1));

    let mut query = manager.query(VersionOptions::Published, "Item").unwrap();
    let common = query.join::<CommonPartRecord>().unwrap();
    query.order_by_descending(common, |r| r.created_utc);
    query.order_by(common, |r| r.created_utc);

    assert_eq!(ids(&query.list().unwrap()), vec![second.id(), first.id()]);
}

#[test]
fn select_part_projects_facades() {
    let manager = item_manager();
    for n in 1..=3 {
        let item = add_item(&manager, VersionOptions::Published, None, day(n));
        manager
            .put_record(&item, RoutePartRecord::new(format!("T{}", n), format!("s{}", n)))
            .unwrap();
    }

    let mut query = manager.query_part::<RoutePart>(VersionOptions::Published).unwrap();
    let common = query.join::<CommonPartRecord>().unwrap();
    query.order_by_descending(common, |r| r.created_utc).slice(1, Take::All);

    let slugs: Vec<String> = query
        .select_part::<RoutePart>()
        .map(|part| part.map(|p| p.slug().to_string()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(slugs, vec!["s2", "s1"]);
}

#[test]
fn parts_are_cached_per_item() {
    let manager = item_manager();
    add_item(&manager, VersionOptions::Published, None, day(4));

    let query = manager.query(VersionOptions::Published, "Item").unwrap();
    let item = query.first_or_default().unwrap().unwrap();
    let a = item.as_part::<CommonPart>().unwrap();
    let b = item.as_part::<CommonPart>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(a.created_utc(), day(4));
}

proptest! {
    #[test]
    fn prop_pages_never_overlap(
        days in prop::collection::vec(1u32..28, 1..25),
        page_size in 1usize..5
    ) {
        let manager = item_manager();
        for d in &days {
            add_item(&manager, VersionOptions::Published, None, day(*d));
        }

        let mut query = manager.query(VersionOptions::Published, "Item").unwrap();
        let common = query.join::<CommonPartRecord>().unwrap();
        query.order_by_descending(common, |r| r.created_utc);

        let mut previous_last = None;
        let mut total = 0;
        for page in 0.. {
            query.slice(page * page_size, page_size);
            let items = query.list().unwrap();
            if items.is_empty() {
                break;
            }
            let created: Vec<_> = items
                .iter()
                .map(|i| i.record::<CommonPartRecord>().unwrap().created_utc)
                .collect();
            prop_assert!(created.windows(2).all(|w| w[0] >= w[1]));
            if let Some(last) = previous_last {
                prop_assert!(last >= created[0]);
            }
            previous_last = created.last().copied();
            total += items.len();
        }
        prop_assert_eq!(total, days.len());
    }
}

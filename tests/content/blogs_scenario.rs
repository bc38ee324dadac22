//! End-to-end: blogs, posts and the recent posts widget.

use std::fs;

use quarry::blogs::{
    register_blog_types, BlogPartRecord, BlogService, ContentPartDriver, ImportContentContext,
    RecentBlogPostsPart, RecentBlogPostsPartDriver, RecentBlogPostsPartRecord, Shape,
    BLOG_POST_TYPE, BLOG_TYPE, RECENT_BLOG_POSTS_TYPE,
};
use quarry::{CommonPartRecord, ContentManager, RoutePartRecord, VersionOptions};
use tempfile::TempDir;

use crate::common::*;

#[test]
fn recent_posts_widget_end_to_end() {
    init_tracing();
    let manager = ContentManager::in_memory();
    register_blog_types(&manager);

    let blog = manager.create(BLOG_TYPE, VersionOptions::Published).unwrap();
    manager
        .put_record(&blog, RoutePartRecord::new("Journal", "journal"))
        .unwrap();
    manager
        .put_record(
            &blog,
            BlogPartRecord {
                description: "Notes".to_string(),
                post_count: 3,
            },
        )
        .unwrap();

    for (n, slug) in ["one", "two", "three"].iter().enumerate() {
        let post = manager
            .create(BLOG_POST_TYPE, VersionOptions::Published)
            .unwrap();
        manager
            .put_record(&post, RoutePartRecord::new(*slug, *slug))
            .unwrap();
        manager
            .put_record(
                &post,
                CommonPartRecord::new(day(n as u32 + 1)).with_container(blog.id()),
            )
            .unwrap();
    }

    let widget = manager
        .create(RECENT_BLOG_POSTS_TYPE, VersionOptions::Published)
        .unwrap();
    manager
        .put_record(
            &widget,
            RecentBlogPostsPartRecord::from_config(&manager.config().blogs, "journal"),
        )
        .unwrap();
    let widget = manager
        .get(widget.id(), VersionOptions::Published)
        .unwrap()
        .unwrap();

    let service = BlogService::new(manager.clone());
    let journal = service.get_by_slug("journal").unwrap().unwrap();
    assert_eq!(journal.description(), "Notes");

    let driver = RecentBlogPostsPartDriver::new(manager.clone(), service);
    let part = widget.as_part::<RecentBlogPostsPart>().unwrap();
    let shape = driver.display(&widget, &part, "Detail").unwrap().unwrap();

    let slugs: Vec<&str> = shape
        .shape
        .items()
        .iter()
        .filter_map(|entry| match entry {
            Shape::Content { slug, .. } => Some(slug.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(slugs, vec!["three", "two", "one"]);
}

#[test]
fn widget_count_comes_from_quarry_toml() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quarry.toml");
    fs::write(&path, "[blogs]\nrecent_posts_count = 2\n").unwrap();

    let manager = ContentManager::open(&path).unwrap();
    register_blog_types(&manager);
    assert_eq!(manager.config().blogs.recent_posts_count, 2);

    // A routed blog without a BlogPartRecord
    let blog = manager.create(BLOG_TYPE, VersionOptions::Published).unwrap();
    manager
        .put_record(&blog, RoutePartRecord::new("News", "news"))
        .unwrap();
    for n in 1..=4u32 {
        let post = manager
            .create(BLOG_POST_TYPE, VersionOptions::Published)
            .unwrap();
        let slug = format!("post-{}", n);
        manager
            .put_record(&post, RoutePartRecord::new(slug.clone(), slug))
            .unwrap();
        manager
            .put_record(&post, CommonPartRecord::new(day(n)).with_container(blog.id()))
            .unwrap();
    }

    let widget = manager
        .create(RECENT_BLOG_POSTS_TYPE, VersionOptions::Published)
        .unwrap();
    assert_eq!(widget.as_part::<RecentBlogPostsPart>().unwrap().count(), 2);

    let service = BlogService::new(manager.clone());
    let driver = RecentBlogPostsPartDriver::new(manager.clone(), service);
    let part = widget.as_part::<RecentBlogPostsPart>().unwrap();
    let import =
        ImportContentContext::from_json(r#"{"RecentBlogPostsPart":{"BlogSlug":"news"}}"#).unwrap();
    driver.importing(&widget, &part, &import).unwrap();

    let widget = manager
        .get(widget.id(), VersionOptions::Published)
        .unwrap()
        .unwrap();
    let part = widget.as_part::<RecentBlogPostsPart>().unwrap();
    assert_eq!(part.for_blog(), "news");
    assert_eq!(part.count(), 2);

    let shape = driver.display(&widget, &part, "Detail").unwrap().unwrap();
    let slugs: Vec<&str> = shape
        .shape
        .items()
        .iter()
        .filter_map(|entry| match entry {
            Shape::Content { slug, .. } => Some(slug.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(slugs, vec!["post-4", "post-3"]);
}

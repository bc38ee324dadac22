//! Blog records, parts and content types

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quarry_core::{ContentItemId, QuarryResult, Record, RecordScope};
use quarry_engine::{
    register_core_parts, BlogsConfig, CommonPartRecord, ContentHandler, ContentItem,
    ContentManager, ContentTypeDefinition, Part, RoutePartRecord,
};

/// Content type name of blogs
pub const BLOG_TYPE: &str = "Blog";
/// Content type name of blog posts
pub const BLOG_POST_TYPE: &str = "BlogPost";
/// Content type name of the recent posts widget
pub const RECENT_BLOG_POSTS_TYPE: &str = "RecentBlogPosts";

/// Item-scoped blog data
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlogPartRecord {
    /// Blog description
    pub description: String,
    /// Number of published posts
    pub post_count: u32,
}

impl Record for BlogPartRecord {
    const NAME: &'static str = "BlogPartRecord";
    const SCOPE: RecordScope = RecordScope::Item;
}

/// Item-scoped settings of a recent posts widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBlogPostsPartRecord {
    /// Slug of the blog to list posts from
    pub blog_slug: String,
    /// Number of posts to show (0 = all)
    pub count: u32,
}

impl RecentBlogPostsPartRecord {
    /// Settings for a blog
    pub fn new(blog_slug: impl Into<String>, count: u32) -> Self {
        Self {
            blog_slug: blog_slug.into(),
            count,
        }
    }

    /// Settings for a blog with the configured default count
    pub fn from_config(config: &BlogsConfig, blog_slug: impl Into<String>) -> Self {
        Self::new(blog_slug, config.recent_posts_count)
    }
}

impl Default for RecentBlogPostsPartRecord {
    fn default() -> Self {
        Self::from_config(&BlogsConfig::default(), String::new())
    }
}

impl Record for RecentBlogPostsPartRecord {
    const NAME: &'static str = "RecentBlogPostsPartRecord";
    const SCOPE: RecordScope = RecordScope::Item;
}

/// A blog: routed container of posts
#[derive(Debug, Clone)]
pub struct BlogPart {
    id: ContentItemId,
    route: Arc<RoutePartRecord>,
    record: Arc<BlogPartRecord>,
}

impl BlogPart {
    /// Blog item id
    pub fn id(&self) -> ContentItemId {
        self.id
    }

    /// Blog name (route title)
    pub fn name(&self) -> &str {
        &self.route.title
    }

    /// Blog slug
    pub fn slug(&self) -> &str {
        &self.route.slug
    }

    /// Blog description
    pub fn description(&self) -> &str {
        &self.record.description
    }

    /// Number of published posts
    pub fn post_count(&self) -> u32 {
        self.record.post_count
    }
}

impl Part for BlogPart {
    const NAME: &'static str = "BlogPart";

    fn activate(item: &ContentItem) -> Option<Self> {
        Some(BlogPart {
            id: item.id(),
            route: item.record::<RoutePartRecord>()?,
            record: item.record::<BlogPartRecord>().unwrap_or_default(),
        })
    }
}

/// A blog post
#[derive(Debug, Clone)]
pub struct BlogPostPart {
    id: ContentItemId,
    route: Arc<RoutePartRecord>,
    common: Arc<CommonPartRecord>,
}

impl BlogPostPart {
    /// Post item id
    pub fn id(&self) -> ContentItemId {
        self.id
    }

    /// Post title
    pub fn title(&self) -> &str {
        &self.route.title
    }

    /// Post slug
    pub fn slug(&self) -> &str {
        &self.route.slug
    }

    /// Containing blog
    pub fn blog_id(&self) -> Option<ContentItemId> {
        self.common.container
    }

    /// Creation time
    pub fn created_utc(&self) -> DateTime<Utc> {
        self.common.created_utc
    }
}

impl Part for BlogPostPart {
    const NAME: &'static str = "BlogPostPart";

    fn activate(item: &ContentItem) -> Option<Self> {
        Some(BlogPostPart {
            id: item.id(),
            route: item.record::<RoutePartRecord>()?,
            common: item.record::<CommonPartRecord>()?,
        })
    }
}

/// Widget listing the most recent posts of a blog
#[derive(Debug, Clone)]
pub struct RecentBlogPostsPart {
    record: Arc<RecentBlogPostsPartRecord>,
}

impl RecentBlogPostsPart {
    /// Slug of the blog to list posts from
    pub fn for_blog(&self) -> &str {
        &self.record.blog_slug
    }

    /// Number of posts to show (0 = all)
    pub fn count(&self) -> u32 {
        self.record.count
    }

    /// Underlying record
    pub fn record(&self) -> &RecentBlogPostsPartRecord {
        &self.record
    }
}

impl Part for RecentBlogPostsPart {
    const NAME: &'static str = "RecentBlogPostsPart";

    fn activate(item: &ContentItem) -> Option<Self> {
        Some(RecentBlogPostsPart {
            record: item
                .record::<RecentBlogPostsPartRecord>()
                .unwrap_or_default(),
        })
    }
}

/// Seed a new recent posts widget with the configured post count
fn initialize_recent_posts(manager: &ContentManager, item: &ContentItem) -> QuarryResult<()> {
    if item.content_type() != RECENT_BLOG_POSTS_TYPE
        || item.record::<RecentBlogPostsPartRecord>().is_some()
    {
        return Ok(());
    }
    manager.put_record(
        item,
        RecentBlogPostsPartRecord::from_config(&manager.config().blogs, String::new()),
    )
}

/// Map the blog records and register the blog content types
///
/// Also maps the built-in common and route records the blog parts read,
/// and seeds new recent posts widgets from the `[blogs]` settings.
pub fn register_blog_types(manager: &ContentManager) {
    register_core_parts(manager);
    manager.register_record::<BlogPartRecord>();
    manager.register_record::<RecentBlogPostsPartRecord>();
    manager.register_handler(ContentHandler::new(
        "blogs.recent-posts",
        initialize_recent_posts,
    ));

    manager.register_type(
        ContentTypeDefinition::new(BLOG_TYPE)
            .with_part("CommonPart")
            .with_part("RoutePart")
            .with_part(BlogPart::NAME),
    );
    manager.register_type(
        ContentTypeDefinition::new(BLOG_POST_TYPE)
            .with_part("CommonPart")
            .with_part("RoutePart")
            .with_part(BlogPostPart::NAME),
    );
    manager.register_type(
        ContentTypeDefinition::new(RECENT_BLOG_POSTS_TYPE)
            .with_part("CommonPart")
            .with_part(RecentBlogPostsPart::NAME),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quarry_core::VersionOptions;
    use quarry_engine::QuarryConfig;

    #[test]
    fn test_register_blog_types() {
        let manager = ContentManager::in_memory();
        register_blog_types(&manager);

        for name in [BLOG_TYPE, BLOG_POST_TYPE, RECENT_BLOG_POSTS_TYPE] {
            assert!(manager.content_type(name).is_some(), "{}", name);
        }
        assert!(manager
            .content_type(BLOG_POST_TYPE)
            .unwrap()
            .has_part("BlogPostPart"));
    }

    #[test]
    fn test_recent_posts_defaults() {
        let record = RecentBlogPostsPartRecord::default();
        assert_eq!(record.count, 5);
        assert!(record.blog_slug.is_empty());

        let config = BlogsConfig {
            recent_posts_count: 12,
        };
        assert_eq!(
            RecentBlogPostsPartRecord::from_config(&config, "news").count,
            12
        );
    }

    #[test]
    fn test_new_widget_uses_configured_count() {
        let mut config = QuarryConfig::default();
        config.blogs.recent_posts_count = 12;
        let manager = ContentManager::in_memory_with(config);
        register_blog_types(&manager);
        register_blog_types(&manager);

        let widget = manager
            .create(RECENT_BLOG_POSTS_TYPE, VersionOptions::Published)
            .unwrap();
        let part = widget.as_part::<RecentBlogPostsPart>().unwrap();
        assert_eq!(part.count(), 12);
        assert_eq!(part.for_blog(), "");

        let blog = manager.create(BLOG_TYPE, VersionOptions::Published).unwrap();
        assert!(blog.record::<RecentBlogPostsPartRecord>().is_none());
    }

    #[test]
    fn test_blog_post_part_activation() {
        let manager = ContentManager::in_memory();
        register_blog_types(&manager);

        let post = manager
            .create(BLOG_POST_TYPE, VersionOptions::Published)
            .unwrap();
        manager
            .put_record(&post, RoutePartRecord::new("Hello", "hello"))
            .unwrap();
        let created = Utc.with_ymd_and_hms(2011, 1, 2, 3, 4, 5).unwrap();
        manager
            .put_record(
                &post,
                CommonPartRecord::new(created).with_container(ContentItemId::new(1)),
            )
            .unwrap();

        let post = manager
            .get(post.id(), VersionOptions::Published)
            .unwrap()
            .unwrap();
        let part = post.as_part::<BlogPostPart>().unwrap();
        assert_eq!(part.title(), "Hello");
        assert_eq!(part.slug(), "hello");
        assert_eq!(part.blog_id(), Some(ContentItemId::new(1)));
        assert_eq!(part.created_utc(), created);
        assert!(post.as_part::<BlogPart>().is_none());
    }

    #[test]
    fn test_blog_part_without_blog_record() {
        let manager = ContentManager::in_memory();
        register_blog_types(&manager);

        let blog = manager.create(BLOG_TYPE, VersionOptions::Published).unwrap();
        let unrouted = manager
            .get(blog.id(), VersionOptions::Published)
            .unwrap()
            .unwrap();
        assert!(unrouted.as_part::<BlogPart>().is_none());

        manager
            .put_record(&blog, RoutePartRecord::new("News", "news"))
            .unwrap();
        let blog = manager
            .get(blog.id(), VersionOptions::Published)
            .unwrap()
            .unwrap();
        let part = blog.as_part::<BlogPart>().unwrap();
        assert_eq!(part.name(), "News");
        assert_eq!(part.description(), "");
        assert_eq!(part.post_count(), 0);
    }
}

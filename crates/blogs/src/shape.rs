//! Display and editor shapes
//!
//! A shape is a view-model node handed to a rendering layer. Shapes are a
//! closed enum; `name()` gives the shape name templates are bound to.

use chrono::{DateTime, Utc};
use serde::Serialize;

use quarry_core::ContentItemId;

use crate::models::{BlogPart, BlogPostPart};

/// Blog reference carried by shapes and view models
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    /// Blog item id
    pub id: ContentItemId,
    /// Blog name
    pub name: String,
    /// Blog slug
    pub slug: String,
}

impl From<&BlogPart> for BlogSummary {
    fn from(blog: &BlogPart) -> Self {
        Self {
            id: blog.id(),
            name: blog.name().to_string(),
            slug: blog.slug().to_string(),
        }
    }
}

/// Editor view model of a recent posts widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecentBlogPostsViewModel {
    /// Number of posts to show (0 = all)
    pub count: u32,
    /// Slug of the selected blog
    pub slug: String,
    /// Blogs to choose from, ordered by name
    pub blogs: Vec<BlogSummary>,
}

/// View-model tree consumed by a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape")]
pub enum Shape {
    /// One content item rendered for a display type
    Content {
        /// Display type ("Summary", "Detail", ...)
        display_type: String,
        /// Item id
        item: ContentItemId,
        /// Item title
        title: String,
        /// Item slug
        slug: String,
        /// Creation time
        created_utc: DateTime<Utc>,
    },
    /// Ordered list of shapes
    List {
        /// List entries
        items: Vec<Shape>,
    },
    /// List of blog posts
    BlogPostList {
        /// The wrapped list
        content_items: Box<Shape>,
    },
    /// Recent posts of one blog
    RecentBlogPosts {
        /// The wrapped post list
        content_items: Box<Shape>,
        /// The blog the posts belong to
        blog: BlogSummary,
    },
    /// Editor template bound to a view model
    EditorTemplate {
        /// Template name
        template_name: String,
        /// Form field prefix
        prefix: String,
        /// Editor view model
        model: RecentBlogPostsViewModel,
    },
}

impl Shape {
    /// Shape name templates are bound to
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Content { .. } => "Content",
            Shape::List { .. } => "List",
            Shape::BlogPostList { .. } => "Parts_Blogs_BlogPost_List",
            Shape::RecentBlogPosts { .. } => "Parts_Blogs_RecentBlogPosts",
            Shape::EditorTemplate { .. } => "EditorTemplate",
        }
    }

    /// Entries of a list shape, or of the list a wrapper shape holds
    pub fn items(&self) -> &[Shape] {
        match self {
            Shape::List { items } => items,
            Shape::BlogPostList { content_items } | Shape::RecentBlogPosts { content_items, .. } => {
                content_items.items()
            }
            _ => &[],
        }
    }
}

/// Build the display shape of a blog post
pub fn build_display(post: &BlogPostPart, display_type: &str) -> Shape {
    Shape::Content {
        display_type: display_type.to_string(),
        item: post.id(),
        title: post.title().to_string(),
        slug: post.slug().to_string(),
        created_utc: post.created_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn content(n: u64) -> Shape {
        Shape::Content {
            display_type: "Summary".to_string(),
            item: ContentItemId::new(n),
            title: format!("Post {}", n),
            slug: format!("post-{}", n),
            created_utc: Utc.with_ymd_and_hms(2011, 1, n as u32, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_names() {
        let list = Shape::List {
            items: vec![content(1)],
        };
        assert_eq!(list.name(), "List");
        assert_eq!(content(1).name(), "Content");

        let wrapped = Shape::BlogPostList {
            content_items: Box::new(list),
        };
        assert_eq!(wrapped.name(), "Parts_Blogs_BlogPost_List");
        assert_eq!(wrapped.items().len(), 1);
    }

    #[test]
    fn test_items_through_wrappers() {
        let shape = Shape::RecentBlogPosts {
            content_items: Box::new(Shape::BlogPostList {
                content_items: Box::new(Shape::List {
                    items: vec![content(2), content(1)],
                }),
            }),
            blog: BlogSummary {
                id: ContentItemId::new(9),
                name: "News".to_string(),
                slug: "news".to_string(),
            },
        };
        assert_eq!(shape.name(), "Parts_Blogs_RecentBlogPosts");
        assert_eq!(shape.items().len(), 2);
        assert!(content(1).items().is_empty());
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(content(3)).unwrap();
        assert_eq!(json["shape"], "Content");
        assert_eq!(json["display_type"], "Summary");
        assert_eq!(json["item"], 3);
    }
}

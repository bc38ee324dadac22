//! Blogs module for Quarry
//!
//! - Blog, blog post and recent blog posts parts with their records
//! - BlogService: published blog lookups
//! - RecentBlogPostsPartDriver: display, editor and import/export of the
//!   recent posts widget
//! - Typed shapes handed to a rendering layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod models;
pub mod service;
pub mod shape;
pub mod transfer;

pub use driver::{
    Bindable, ContentPartDriver, ContentShape, DriverResult, FormUpdater,
    RecentBlogPostsPartDriver, UpdateModel,
};
pub use models::{
    register_blog_types, BlogPart, BlogPartRecord, BlogPostPart, RecentBlogPostsPart,
    RecentBlogPostsPartRecord, BLOG_POST_TYPE, BLOG_TYPE, RECENT_BLOG_POSTS_TYPE,
};
pub use service::BlogService;
pub use shape::{build_display, BlogSummary, RecentBlogPostsViewModel, Shape};
pub use transfer::{ContentElement, ExportContentContext, ImportContentContext};

//! Part drivers
//!
//! A driver binds a part's persisted fields to a display shape, an editor
//! shape and the import/export format. `RecentBlogPostsPartDriver` shows the
//! newest published posts of one blog.

use std::collections::BTreeMap;

use tracing::debug;

use quarry_core::{QuarryError, QuarryResult, VersionOptions};
use quarry_engine::{CommonPartRecord, ContentItem, ContentManager, Part, Take};

use crate::models::{BlogPostPart, RecentBlogPostsPart, RecentBlogPostsPartRecord, BLOG_POST_TYPE};
use crate::service::BlogService;
use crate::shape::{build_display, BlogSummary, RecentBlogPostsViewModel, Shape};
use crate::transfer::{ExportContentContext, ImportContentContext};

/// A named shape produced by a driver
#[derive(Debug, Clone, PartialEq)]
pub struct ContentShape {
    /// Shape name, used for placement
    pub name: &'static str,
    /// The shape
    pub shape: Shape,
}

impl ContentShape {
    /// Name a shape
    pub fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }
}

/// Driver output; None when the part renders nothing
pub type DriverResult = Option<ContentShape>;

/// A view model that form values can be bound to
pub trait Bindable {
    /// Bind one field
    ///
    /// Returns an error message if the value does not fit the field.
    /// Unknown fields are ignored.
    fn bind(&mut self, field: &str, value: &str) -> Result<(), String>;
}

/// Source of submitted editor values
pub trait UpdateModel {
    /// Bind every submitted value under `prefix` to `model`
    ///
    /// Returns false if any value failed to bind.
    fn try_update_model(&mut self, model: &mut dyn Bindable, prefix: &str) -> bool;

    /// Record a validation error
    fn add_model_error(&mut self, key: &str, message: &str);
}

/// `UpdateModel` over submitted form fields keyed `"{prefix}.{field}"`
#[derive(Debug, Clone, Default)]
pub struct FormUpdater {
    values: BTreeMap<String, String>,
    errors: Vec<(String, String)>,
}

impl FormUpdater {
    /// Create an updater from submitted fields
    pub fn new<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            errors: Vec::new(),
        }
    }

    /// Validation errors as (key, message) pairs
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }
}

impl UpdateModel for FormUpdater {
    fn try_update_model(&mut self, model: &mut dyn Bindable, prefix: &str) -> bool {
        let start = self.errors.len();
        let scope = format!("{}.", prefix);
        let mut failures = Vec::new();
        for (key, value) in &self.values {
            if let Some(field) = key.strip_prefix(&scope) {
                if let Err(message) = model.bind(field, value) {
                    failures.push((key.clone(), message));
                }
            }
        }
        for (key, message) in failures {
            self.add_model_error(&key, &message);
        }
        self.errors.len() == start
    }

    fn add_model_error(&mut self, key: &str, message: &str) {
        self.errors.push((key.to_string(), message.to_string()));
    }
}

impl Bindable for RecentBlogPostsViewModel {
    fn bind(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "Slug" => self.slug = value.to_string(),
            "Count" => {
                self.count = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid number of posts", value))?
            }
            _ => {}
        }
        Ok(())
    }
}

/// Display, editor and import/export of a part
///
/// Display and editor operations take the item the part belongs to so that
/// updates can be written back through the content manager.
pub trait ContentPartDriver<P: Part> {
    /// Form field prefix of the part's editor
    fn prefix(&self) -> &str {
        P::NAME
    }

    /// Build the display shape
    fn display(&self, item: &ContentItem, part: &P, display_type: &str) -> QuarryResult<DriverResult>;

    /// Build the editor shape
    fn editor(&self, item: &ContentItem, part: &P) -> QuarryResult<DriverResult>;

    /// Apply submitted editor values, then build the editor shape
    fn update_editor(
        &self,
        item: &ContentItem,
        part: &P,
        updater: &mut dyn UpdateModel,
    ) -> QuarryResult<DriverResult>;

    /// Read the part's element of an imported item
    fn importing(
        &self,
        item: &ContentItem,
        part: &P,
        context: &ImportContentContext,
    ) -> QuarryResult<()>;

    /// Write the part's element of an exported item
    fn exporting(&self, item: &ContentItem, part: &P, context: &mut ExportContentContext);
}

/// Driver of the recent blog posts widget
#[derive(Debug, Clone)]
pub struct RecentBlogPostsPartDriver {
    manager: ContentManager,
    blogs: BlogService,
}

impl RecentBlogPostsPartDriver {
    /// Shape name of the display
    pub const DISPLAY_SHAPE: &'static str = "Parts_Blogs_RecentBlogPosts";
    /// Shape name of the editor
    pub const EDITOR_SHAPE: &'static str = "Parts_Blogs_RecentBlogPosts_Edit";
    /// Editor template name
    pub const EDITOR_TEMPLATE: &'static str = "Parts.Blogs.RecentBlogPosts";

    /// Create a driver
    pub fn new(manager: ContentManager, blogs: BlogService) -> Self {
        Self { manager, blogs }
    }

    fn write(&self, item: &ContentItem, record: RecentBlogPostsPartRecord) -> QuarryResult<()> {
        debug!(target: "quarry::blogs", item = %item.id(), blog = %record.blog_slug, count = record.count, "Recent posts settings updated");
        self.manager.put_record(item, record)
    }

    fn editor_shape(&self, count: u32, slug: &str) -> QuarryResult<DriverResult> {
        let mut blogs: Vec<BlogSummary> = self
            .blogs
            .get()?
            .iter()
            .map(|blog| BlogSummary::from(blog.as_ref()))
            .collect();
        blogs.sort_by(|a, b| a.name.cmp(&b.name));

        let model = RecentBlogPostsViewModel {
            count,
            slug: slug.to_string(),
            blogs,
        };
        Ok(Some(ContentShape::new(
            Self::EDITOR_SHAPE,
            Shape::EditorTemplate {
                template_name: Self::EDITOR_TEMPLATE.to_string(),
                prefix: self.prefix().to_string(),
                model,
            },
        )))
    }
}

impl ContentPartDriver<RecentBlogPostsPart> for RecentBlogPostsPartDriver {
    fn display(
        &self,
        item: &ContentItem,
        part: &RecentBlogPostsPart,
        display_type: &str,
    ) -> QuarryResult<DriverResult> {
        let blog = match self.blogs.get_by_slug(part.for_blog())? {
            Some(blog) => blog,
            None => {
                debug!(target: "quarry::blogs", item = %item.id(), blog = part.for_blog(), "Unknown blog, nothing to display");
                return Ok(None);
            }
        };

        let take = match part.count() {
            0 => Take::All,
            n => Take::Count(n as usize),
        };
        let blog_id = blog.id();

        let mut query = self.manager.query(VersionOptions::Published, BLOG_POST_TYPE)?;
        let common = query.join::<CommonPartRecord>()?;
        query
            .filter(common, move |c| c.container == Some(blog_id))
            .order_by_descending(common, |c| c.created_utc)
            .slice(0, take);

        let items = query
            .select_part::<BlogPostPart>()
            .map(|post| post.map(|post| build_display(&post, "Summary")))
            .collect::<QuarryResult<Vec<_>>>()?;
        debug!(target: "quarry::blogs", item = %item.id(), blog = %blog_id, display_type, posts = items.len(), "Recent posts built");

        let list = Shape::List { items };
        let post_list = Shape::BlogPostList {
            content_items: Box::new(list),
        };
        Ok(Some(ContentShape::new(
            Self::DISPLAY_SHAPE,
            Shape::RecentBlogPosts {
                content_items: Box::new(post_list),
                blog: BlogSummary::from(blog.as_ref()),
            },
        )))
    }

    fn editor(&self, _item: &ContentItem, part: &RecentBlogPostsPart) -> QuarryResult<DriverResult> {
        self.editor_shape(part.count(), part.for_blog())
    }

    fn update_editor(
        &self,
        item: &ContentItem,
        part: &RecentBlogPostsPart,
        updater: &mut dyn UpdateModel,
    ) -> QuarryResult<DriverResult> {
        let mut model = RecentBlogPostsViewModel::default();
        if updater.try_update_model(&mut model, self.prefix()) {
            self.write(item, RecentBlogPostsPartRecord::new(model.slug.clone(), model.count))?;
            return self.editor_shape(model.count, &model.slug);
        }
        self.editor_shape(part.count(), part.for_blog())
    }

    fn importing(
        &self,
        item: &ContentItem,
        part: &RecentBlogPostsPart,
        context: &ImportContentContext,
    ) -> QuarryResult<()> {
        let mut record = part.record().clone();

        if let Some(slug) = context.attribute(RecentBlogPostsPart::NAME, "BlogSlug") {
            record.blog_slug = slug.to_string();
        }
        if let Some(count) = context.attribute(RecentBlogPostsPart::NAME, "Count") {
            record.count = count.trim().parse().map_err(|_| {
                QuarryError::invalid_input(format!(
                    "Count attribute of {} must be a non-negative integer, got '{}'",
                    RecentBlogPostsPart::NAME,
                    count
                ))
            })?;
        }

        self.write(item, record)
    }

    fn exporting(
        &self,
        _item: &ContentItem,
        part: &RecentBlogPostsPart,
        context: &mut ExportContentContext,
    ) {
        let element = context.element(RecentBlogPostsPart::NAME);
        element.set_attribute_value("BlogSlug", part.for_blog());
        element.set_attribute_value("Count", part.count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_model_binding() {
        let mut model = RecentBlogPostsViewModel::default();
        assert!(model.bind("Slug", "news").is_ok());
        assert!(model.bind("Count", " 7 ").is_ok());
        assert!(model.bind("Unknown", "x").is_ok());
        assert_eq!(model.slug, "news");
        assert_eq!(model.count, 7);
        assert!(model.bind("Count", "-1").is_err());
        assert_eq!(model.count, 7);
    }

    #[test]
    fn test_form_updater_scopes_by_prefix() {
        let mut updater = FormUpdater::new([
            ("RecentBlogPostsPart.Slug", "tech"),
            ("RecentBlogPostsPart.Count", "3"),
            ("OtherPart.Count", "oops"),
        ]);
        let mut model = RecentBlogPostsViewModel::default();
        assert!(updater.try_update_model(&mut model, "RecentBlogPostsPart"));
        assert_eq!(model.slug, "tech");
        assert_eq!(model.count, 3);
        assert!(updater.errors().is_empty());
    }

    #[test]
    fn test_form_updater_records_errors() {
        let mut updater = FormUpdater::new([("RecentBlogPostsPart.Count", "many")]);
        let mut model = RecentBlogPostsViewModel::default();
        assert!(!updater.try_update_model(&mut model, "RecentBlogPostsPart"));
        assert_eq!(updater.errors().len(), 1);
        assert_eq!(updater.errors()[0].0, "RecentBlogPostsPart.Count");
    }
}

//! Typed part facades over content items

use crate::item::ContentItem;

/// A typed view over the records of a content item
///
/// Parts are not persisted: they are activated from the item's records on
/// first access and cached on the item. A part is only attached when the
/// item's content type lists `NAME`.
///
/// # Example
///
/// ```
/// use quarry_core::{Record, RecordScope};
/// use quarry_engine::{ContentItem, Part};
///
/// #[derive(Debug, Clone)]
/// struct TagRecord {
///     tags: Vec<String>,
/// }
///
/// impl Record for TagRecord {
///     const NAME: &'static str = "TagRecord";
///     const SCOPE: RecordScope = RecordScope::Item;
/// }
///
/// struct TagsPart {
///     tags: Vec<String>,
/// }
///
/// impl Part for TagsPart {
///     const NAME: &'static str = "TagsPart";
///
///     fn activate(item: &ContentItem) -> Option<Self> {
///         let record = item.record::<TagRecord>()?;
///         Some(TagsPart { tags: record.tags.clone() })
///     }
/// }
/// ```
pub trait Part: Sized + Send + Sync + 'static {
    /// Part name as listed in content type definitions
    const NAME: &'static str;

    /// Build the part from an item's records
    ///
    /// Returns None when the item lacks a record the part needs.
    fn activate(item: &ContentItem) -> Option<Self>;
}

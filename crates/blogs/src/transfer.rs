//! Import and export contexts
//!
//! An exported content item is a map of elements, one per part, each
//! holding string attributes:
//!
//! ```json
//! { "RecentBlogPostsPart": { "BlogSlug": "news", "Count": "5" } }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use quarry_core::{QuarryError, QuarryResult};

/// Attributes of one part element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentElement {
    attributes: BTreeMap<String, String>,
}

impl ContentElement {
    /// Attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attribute_value(&mut self, name: &str, value: impl fmt::Display) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

/// Elements read during import
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ImportContentContext {
    elements: BTreeMap<String, ContentElement>,
}

impl ImportContentContext {
    /// Parse an exported item
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::InvalidInput` if the document is not a map of
    /// string attribute maps.
    pub fn from_json(json: &str) -> QuarryResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| QuarryError::invalid_input(format!("Malformed import document: {}", e)))
    }

    /// Attribute of a part element, if both exist
    pub fn attribute(&self, part: &str, name: &str) -> Option<&str> {
        self.elements.get(part)?.attribute(name)
    }
}

impl From<ExportContentContext> for ImportContentContext {
    fn from(export: ExportContentContext) -> Self {
        Self {
            elements: export.elements,
        }
    }
}

/// Elements written during export
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ExportContentContext {
    elements: BTreeMap<String, ContentElement>,
}

impl ExportContentContext {
    /// Create an empty export
    pub fn new() -> Self {
        Self::default()
    }

    /// Element of a part, created on first access
    pub fn element(&mut self, part: &str) -> &mut ContentElement {
        self.elements.entry(part.to_string()).or_default()
    }

    /// Element of a part, if written
    pub fn get(&self, part: &str) -> Option<&ContentElement> {
        self.elements.get(part)
    }

    /// Serialize the export
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::InvalidInput` if serialization fails.
    pub fn to_json(&self) -> QuarryResult<String> {
        serde_json::to_string(self)
            .map_err(|e| QuarryError::invalid_input(format!("Export failed: {}", e)))
    }
}

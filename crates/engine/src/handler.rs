//! Content handlers
//!
//! A handler runs after a content item is created, so modules can give new
//! items their initial records (settings seeded from configuration, for
//! example). Handlers are registered per content manager and run in
//! registration order.
//!
//! ```ignore
//! manager.register_handler(ContentHandler::new("recent-posts", initialize_recent_posts));
//! ```

use std::fmt;

use parking_lot::RwLock;
use tracing::debug;

use quarry_core::QuarryResult;

use crate::item::ContentItem;
use crate::manager::ContentManager;

/// Function run for every newly created content item
///
/// Handlers check the item's content type themselves and return `Ok(())`
/// for items they do not care about.
pub type CreatedFn = fn(&ContentManager, &ContentItem) -> QuarryResult<()>;

/// A named creation handler
#[derive(Clone)]
pub struct ContentHandler {
    /// Handler name, used for logging and de-duplication
    pub name: &'static str,
    /// Function to call
    pub created: CreatedFn,
}

impl ContentHandler {
    /// Create a handler
    pub const fn new(name: &'static str, created: CreatedFn) -> Self {
        Self { name, created }
    }
}

impl fmt::Debug for ContentHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentHandler")
            .field("name", &self.name)
            .finish()
    }
}

/// Handlers registered on one content manager
#[derive(Debug, Default)]
pub struct ContentHandlers {
    handlers: RwLock<Vec<ContentHandler>>,
}

impl ContentHandlers {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    ///
    /// Returns false if a handler with the same name is already registered.
    pub fn register(&self, handler: ContentHandler) -> bool {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| h.name == handler.name) {
            return false;
        }
        debug!(target: "quarry::content", name = handler.name, "Content handler registered");
        handlers.push(handler);
        true
    }

    /// Run every handler for a new item
    ///
    /// The registry lock is released before handlers run, so a handler may
    /// write through the manager.
    ///
    /// # Errors
    ///
    /// Returns the first handler error; later handlers are not called.
    pub fn created(&self, manager: &ContentManager, item: &ContentItem) -> QuarryResult<()> {
        let handlers = self.handlers.read().clone();
        for handler in &handlers {
            (handler.created)(manager, item)?;
        }
        Ok(())
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Check whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

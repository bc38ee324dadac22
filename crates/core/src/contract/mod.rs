//! Contract types shared by storage providers and the query engine
//!
//! - `version_options`: which versions of a content item a read considers

pub mod version_options;

pub use version_options::VersionOptions;

//! Engine configuration via `quarry.toml`
//!
//! On first open a default `quarry.toml` is created. To change settings,
//! edit the file and reopen the content manager.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use quarry_core::{QuarryError, QuarryResult, VersionOptions};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "quarry.toml";

/// Settings of the blogs module, persisted under `[blogs]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogsConfig {
    /// Number of posts shown by a new recent-posts part (0 = all)
    #[serde(default = "default_recent_posts_count")]
    pub recent_posts_count: u32,
}

fn default_recent_posts_count() -> u32 {
    5
}

impl Default for BlogsConfig {
    fn default() -> Self {
        Self {
            recent_posts_count: default_recent_posts_count(),
        }
    }
}

/// Engine configuration loaded from `quarry.toml`.
///
/// # Example
///
/// ```toml
/// # Version filter used by query_default: "published", "latest", "draft" or "all"
/// default_versions = "published"
///
/// # Queries slower than this are logged at warn level
/// slow_query_ms = 250
///
/// [blogs]
/// recent_posts_count = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarryConfig {
    /// Default version filter: `"published"`, `"latest"`, `"draft"` or `"all"`.
    #[serde(default = "default_versions_str")]
    pub default_versions: String,
    /// Slow query threshold in milliseconds.
    #[serde(default = "default_slow_query_ms")]
    pub slow_query_ms: u64,
    /// Blogs module settings.
    #[serde(default)]
    pub blogs: BlogsConfig,
}

fn default_versions_str() -> String {
    "published".to_string()
}

fn default_slow_query_ms() -> u64 {
    250
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            default_versions: default_versions_str(),
            slow_query_ms: default_slow_query_ms(),
            blogs: BlogsConfig::default(),
        }
    }
}

impl QuarryConfig {
    /// Parse the default version filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not one of the accepted filters.
    pub fn version_options(&self) -> QuarryResult<VersionOptions> {
        self.default_versions
            .parse::<VersionOptions>()
            .map_err(|e| QuarryError::config(format!("Invalid default_versions in quarry.toml: {}", e)))
    }

    /// Slow query threshold as a duration
    pub fn slow_query_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_query_ms)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Quarry configuration
#
# Version filter used by query_default:
#   "published" (default), "latest", "draft", "draft-required", "all"
#   or "number:N"
default_versions = "published"

# Queries slower than this many milliseconds are logged at warn level
slow_query_ms = 250

[blogs]
# Posts shown by a new recent blog posts part (0 = all)
recent_posts_count = 5
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> QuarryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuarryError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: QuarryConfig = toml::from_str(&content).map_err(|e| {
            QuarryError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.version_options()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> QuarryResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                QuarryError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> QuarryResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| QuarryError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            QuarryError::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

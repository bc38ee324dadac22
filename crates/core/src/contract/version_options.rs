//! Version filters for content reads
//!
//! Every content item keeps a chain of versions. A read never sees the
//! chain directly; it names a `VersionOptions` filter and storage returns
//! the version rows that pass it.
//!
//! ## Filters
//!
//! | Option          | Rows selected                                          |
//! |-----------------|--------------------------------------------------------|
//! | `Published`     | the published version of each item                     |
//! | `Latest`        | the latest version of each item                        |
//! | `Draft`         | the latest version, only when it is not published      |
//! | `DraftRequired` | the latest version                                     |
//! | `AllVersions`   | every version, including versions of removed items     |
//! | `Number(n)`     | version number `n` of each item                        |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::VersionRow;

/// Which version state(s) of content items a read considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VersionOptions {
    /// The published version
    #[default]
    Published,
    /// The latest version, published or not
    Latest,
    /// The latest version when it is an unpublished draft
    Draft,
    /// The latest version; writers create a draft from it when needed
    DraftRequired,
    /// Every stored version
    AllVersions,
    /// A specific version number
    Number(u32),
}

impl VersionOptions {
    /// Check whether a version with the given flags passes this filter
    pub const fn admits(&self, published: bool, latest: bool, number: u32) -> bool {
        match self {
            VersionOptions::Published => published,
            VersionOptions::Latest | VersionOptions::DraftRequired => latest,
            VersionOptions::Draft => latest && !published,
            VersionOptions::AllVersions => true,
            VersionOptions::Number(n) => *n == number,
        }
    }

    /// Check whether a version row passes this filter
    #[inline]
    pub fn matches(&self, row: &VersionRow) -> bool {
        self.admits(row.published, row.latest, row.number)
    }

    /// Whether this filter selects at most one version per item
    pub const fn is_single_version(&self) -> bool {
        !matches!(self, VersionOptions::AllVersions)
    }
}

impl fmt::Display for VersionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOptions::Published => write!(f, "published"),
            VersionOptions::Latest => write!(f, "latest"),
            VersionOptions::Draft => write!(f, "draft"),
            VersionOptions::DraftRequired => write!(f, "draft-required"),
            VersionOptions::AllVersions => write!(f, "all"),
            VersionOptions::Number(n) => write!(f, "number:{}", n),
        }
    }
}

impl FromStr for VersionOptions {
    type Err = String;

    /// Parse the textual form produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(VersionOptions::Published),
            "latest" => Ok(VersionOptions::Latest),
            "draft" => Ok(VersionOptions::Draft),
            "draft-required" => Ok(VersionOptions::DraftRequired),
            "all" => Ok(VersionOptions::AllVersions),
            other => match other.strip_prefix("number:") {
                Some(n) => n
                    .parse::<u32>()
                    .map(VersionOptions::Number)
                    .map_err(|e| format!("invalid version number '{}': {}", n, e)),
                None => Err(format!(
                    "unknown version option '{}'; expected published, latest, draft, draft-required, all or number:N",
                    other
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_published() {
        assert_eq!(VersionOptions::default(), VersionOptions::Published);
    }

    #[test]
    fn test_published_filter() {
        assert!(VersionOptions::Published.admits(true, false, 1));
        assert!(VersionOptions::Published.admits(true, true, 1));
        assert!(!VersionOptions::Published.admits(false, true, 2));
    }

    #[test]
    fn test_draft_excludes_published_latest() {
        assert!(VersionOptions::Draft.admits(false, true, 2));
        assert!(!VersionOptions::Draft.admits(true, true, 1));
        assert!(!VersionOptions::Draft.admits(false, false, 1));
    }

    #[test]
    fn test_latest_and_draft_required() {
        for opts in [VersionOptions::Latest, VersionOptions::DraftRequired] {
            assert!(opts.admits(true, true, 1));
            assert!(opts.admits(false, true, 3));
            assert!(!opts.admits(true, false, 1));
        }
    }

    #[test]
    fn test_all_versions_admits_removed() {
        assert!(VersionOptions::AllVersions.admits(false, false, 4));
        assert!(!VersionOptions::AllVersions.is_single_version());
    }

    #[test]
    fn test_number_filter() {
        assert!(VersionOptions::Number(2).admits(false, false, 2));
        assert!(!VersionOptions::Number(2).admits(true, true, 3));
    }

    #[test]
    fn test_parse_display_agree() {
        for opts in [
            VersionOptions::Published,
            VersionOptions::Latest,
            VersionOptions::Draft,
            VersionOptions::DraftRequired,
            VersionOptions::AllVersions,
            VersionOptions::Number(9),
        ] {
            assert_eq!(opts.to_string().parse::<VersionOptions>(), Ok(opts));
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&VersionOptions::Number(3)).unwrap();
        assert_eq!(json, r#"{"Number":3}"#);
        let json = serde_json::to_string(&VersionOptions::Draft).unwrap();
        assert_eq!(json, r#""Draft""#);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("everything".parse::<VersionOptions>().is_err());
        assert!("number:x".parse::<VersionOptions>().is_err());
    }
}

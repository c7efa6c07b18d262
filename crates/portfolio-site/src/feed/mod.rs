//! Project feed: public repositories of one account, filtered and paged for
//! display.
//!
//! [`source`] fetches records from the hosting API; [`presenter`] turns them
//! into the view the projects section renders.

pub mod presenter;
pub mod source;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use presenter::{DescriptionPolicy, FeedView, ToggleEffect};
pub use source::{FeedSourceError, GithubRepositorySource, RepositorySource};

/// One repository as reported by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Host-assigned identifier.
    pub id: u64,
    /// Repository name.
    pub name: String,
    /// Free-text description; absent or empty for many repositories.
    #[serde(default)]
    pub description: Option<String>,
    /// Browser URL of the repository page.
    pub html_url: String,
    /// Star count.
    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,
    /// Fork count.
    #[serde(rename = "forks_count", default)]
    pub fork_count: u64,
    /// Whether the repository is a fork of another.
    #[serde(rename = "fork", default)]
    pub is_fork: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Server-side ordering requested from the hosting API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest repositories first.
    #[default]
    Created,
    /// Most recently pushed repositories first.
    Updated,
}

impl FeedSort {
    /// Query-string value for the `sort` parameter.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

impl std::str::FromStr for FeedSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            other => Err(format!("unknown feed sort {other:?}; expected created or updated")),
        }
    }
}

//! GitLab API resource types
//!
//! Only the fields the indexer cares about are modeled; unknown fields are
//! ignored when decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project (repository)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabProject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// A group or subgroup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// A user, or a group member when listing a group's users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    /// Only present on group membership listings
    #[serde(default)]
    pub access_level: Option<u32>,
}

/// Optional filters for list operations
///
/// `None` leaves the filter off entirely; `Some(false)` is sent as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Projects: filter on archived state
    pub archived: Option<bool>,
    /// Users: filter on active state
    pub active: Option<bool>,
    /// Free-text search, applied to every listing
    pub search: Option<String>,
}

impl ListOptions {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter projects on archived state
    #[must_use]
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Filter users on active state
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Free-text search
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

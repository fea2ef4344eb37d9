//! GitLab resource client
//!
//! Lists projects, groups and users of a GitLab instance or group, walking
//! GitLab's `x-next-page` pagination through [`crate::pagination`].

mod client;
mod types;

pub use client::{GitLabClient, DEFAULT_PAGE_SIZE, NEXT_PAGE_HEADER};
pub use types::{GitLabGroup, GitLabProject, GitLabUser, ListOptions};

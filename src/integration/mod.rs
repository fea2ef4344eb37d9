//! Source-control integrations
//!
//! Maps target URLs to the integration config (API base URL, token) that
//! should be used to talk to them, and decides whether a target names a
//! group or a whole instance.
//!
//! Lookup is a pure function over an explicit [`ScmIntegrations`] value, so
//! several integrations can be used side by side without shared state.

mod resolver;
mod types;

pub use resolver::{parse_group_path, IntegrationResolver, ScmIntegrations};
pub use types::{GitLabIntegrationConfig, GITLAB_SAAS_HOST};

#[cfg(test)]
mod tests;

//! Integration lookup and target URL parsing

use super::types::GitLabIntegrationConfig;
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

/// Finds the integration config responsible for a URL
pub trait IntegrationResolver: Send + Sync {
    /// Return the integration for `url`, or `None` if nothing matches
    fn resolve(&self, url: &str) -> Option<GitLabIntegrationConfig>;
}

/// Static set of configured integrations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmIntegrations {
    /// GitLab hosts
    #[serde(default)]
    pub gitlab: Vec<GitLabIntegrationConfig>,
}

impl ScmIntegrations {
    /// Create from a list of GitLab integrations
    pub fn new(gitlab: Vec<GitLabIntegrationConfig>) -> Self {
        Self { gitlab }
    }

    /// Add a gitlab.com integration unless one is configured already
    #[must_use]
    pub fn with_saas_default(mut self) -> Self {
        if !self.gitlab.iter().any(GitLabIntegrationConfig::is_saas) {
            self.gitlab.push(GitLabIntegrationConfig::saas());
        }
        self
    }

    /// Find an integration by host (`host` or `host:port`)
    pub fn by_host(&self, host: &str) -> Option<&GitLabIntegrationConfig> {
        self.gitlab.iter().find(|integration| {
            integration.host.eq_ignore_ascii_case(host)
                || Url::parse(&integration.base_url())
                    .ok()
                    .and_then(|base| host_with_port(&base))
                    .is_some_and(|base_host| base_host.eq_ignore_ascii_case(host))
        })
    }

    /// Find an integration for a full URL
    pub fn by_url(&self, url: &str) -> Option<&GitLabIntegrationConfig> {
        let parsed = Url::parse(url).ok()?;
        let host = host_with_port(&parsed)?;
        self.by_host(&host)
    }
}

impl IntegrationResolver for ScmIntegrations {
    fn resolve(&self, url: &str) -> Option<GitLabIntegrationConfig> {
        self.by_url(url).cloned()
    }
}

fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Decide whether `url` names a group on the instance at `base_url`
///
/// Returns `Ok(None)` for the instance root and `Ok(Some(path))` for a group,
/// e.g. `https://gitlab.com/groups/team/sub` gives `team/sub`. Segments are
/// percent-decoded. Targets on a different host, outside the base path, with
/// a bare `/groups` prefix, or pointing below a `/-/` marker (projects,
/// issues, ...) are configuration errors.
pub fn parse_group_path(url: &str, base_url: &str) -> Result<Option<String>> {
    let target = Url::parse(url)?;
    let base = Url::parse(base_url)?;

    if target.scheme() != base.scheme()
        || target.host_str() != base.host_str()
        || target.port_or_known_default() != base.port_or_known_default()
    {
        return Err(Error::config(format!(
            "{url} is not on the GitLab instance at {base_url}"
        )));
    }

    let base_path = base.path().trim_matches('/');
    let mut path = target.path().trim_matches('/');
    if !base_path.is_empty() {
        path = path
            .strip_prefix(base_path)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| {
                Error::config(format!("{url} is outside the GitLab base path {base_url}"))
            })?
            .trim_start_matches('/');
    }

    let mut segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map_err(|_| Error::config(format!("{url} contains an invalid path segment")))
        })
        .collect::<Result<Vec<_>>>()?;

    if segments.first().is_some_and(|s| s == "groups") {
        segments.remove(0);
        if segments.is_empty() {
            return Err(Error::config(format!("{url} names no group after /groups")));
        }
    }

    if segments.is_empty() {
        return Ok(None);
    }
    if segments.iter().any(|s| s == "-") {
        return Err(Error::config(format!("{url} is not a GitLab group URL")));
    }

    Ok(Some(segments.join("/")))
}

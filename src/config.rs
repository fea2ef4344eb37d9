//! Application configuration
//!
//! `AppConfig` is loaded from a YAML (or JSON) file and turned into the
//! explicit values the rest of the crate takes: [`ScmIntegrations`],
//! [`HttpClientConfig`] and pagination settings. Nothing here is global.
//!
//! ```yaml
//! integrations:
//!   gitlab:
//!     - host: gitlab.example.com
//!       token_env: GITLAB_TOKEN
//! http:
//!   timeout_seconds: 30
//!   requests_per_second: 10
//! pagination:
//!   page_size: 100
//!   max_pages: 500
//! ```

use crate::error::{Error, Result};
use crate::gitlab::DEFAULT_PAGE_SIZE;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::integration::ScmIntegrations;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source-control integrations
    #[serde(default)]
    pub integrations: ScmIntegrations,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Configured integrations plus an implicit gitlab.com entry
    pub fn scm_integrations(&self) -> ScmIntegrations {
        self.integrations.clone().with_saas_default()
    }

    fn validate(&self) -> Result<()> {
        for integration in &self.integrations.gitlab {
            if integration.host.trim().is_empty() {
                return Err(Error::missing_field("integrations.gitlab[].host"));
            }
        }
        if self.pagination.page_size == 0 {
            return Err(Error::config("pagination.page_size must be greater than 0"));
        }
        if self.pagination.max_pages == Some(0) {
            return Err(Error::config("pagination.max_pages must be greater than 0"));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Overrides the default `pagewalk/<version>` user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Enables rate limiting when set
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Token bucket size, only used with `requests_per_second`
    #[serde(default)]
    pub burst_size: Option<u32>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            requests_per_second: None,
            burst_size: None,
        }
    }
}

impl HttpConfig {
    /// Build the transport config
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .no_rate_limit();

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(rps) = self.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::new(rps, self.burst_size.unwrap_or(rps)));
        }
        builder.build()
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination settings for resource listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// `per_page` sent with every listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Stop a listing with an error after this many pages; unlimited when unset
    #[serde(default)]
    pub max_pages: Option<u64>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pagination.page_size, 100);
        assert_eq!(config.pagination.max_pages, None);
        assert_eq!(config.http.timeout_seconds, 30);

        // gitlab.com is always resolvable
        let integrations = config.scm_integrations();
        assert_eq!(integrations.gitlab.len(), 1);
        assert!(integrations.gitlab[0].is_saas());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
integrations:
  gitlab:
    - host: gitlab.example.com
      token_env: GITLAB_TOKEN
    - host: gitlab.com
      token: glpat-abc
http:
  timeout_seconds: 5
  user_agent: indexer/2.0
  requests_per_second: 4
pagination:
  page_size: 50
  max_pages: 10
";
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.integrations.gitlab.len(), 2);
        assert_eq!(
            config.integrations.gitlab[0].token_env.as_deref(),
            Some("GITLAB_TOKEN")
        );
        // Explicit gitlab.com entry is not duplicated
        assert_eq!(config.scm_integrations().gitlab.len(), 2);

        let http = config.http.client_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.user_agent, "indexer/2.0");
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(4, 4)));

        assert_eq!(config.pagination.page_size, 50);
        assert_eq!(config.pagination.max_pages, Some(10));
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"integrations": {"gitlab": [{"host": "git.local:8080"}]}}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.integrations.gitlab[0].host, "git.local:8080");
        assert!(config.http.client_config().rate_limit.is_none());
    }

    #[test]
    fn test_validation() {
        let err = AppConfig::from_yaml("integrations:\n  gitlab:\n    - host: ''\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));

        let err = AppConfig::from_yaml("pagination:\n  page_size: 0\n").unwrap_err();
        assert!(err.is_configuration());

        let err = AppConfig::from_yaml("pagination:\n  max_pages: 0\n").unwrap_err();
        assert!(err.is_configuration());

        let err = AppConfig::from_yaml("http: [").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("pagewalk.yaml");
        fs::write(&yaml_path, "pagination:\n  page_size: 25\n").unwrap();
        assert_eq!(AppConfig::load(&yaml_path).unwrap().pagination.page_size, 25);

        let json_path = dir.path().join("pagewalk.json");
        fs::write(&json_path, r#"{"pagination": {"page_size": 30}}"#).unwrap();
        assert_eq!(AppConfig::load(&json_path).unwrap().pagination.page_size, 30);

        let err = AppConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.is_configuration());
    }
}

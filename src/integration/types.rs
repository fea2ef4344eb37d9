//! Integration configuration types

use crate::http::RequestOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Host of the hosted (SaaS) GitLab offering
pub const GITLAB_SAAS_HOST: &str = "gitlab.com";

/// Header GitLab reads personal/project access tokens from
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Connection settings for one GitLab host
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabIntegrationConfig {
    /// Host name, e.g. `gitlab.example.com` (may include a port)
    pub host: String,

    /// REST API base, defaults to `https://{host}/api/v4`
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Web base URL, defaults to `https://{host}`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Access token
    #[serde(default)]
    pub token: Option<String>,

    /// Environment variable to read the token from when `token` is unset
    #[serde(default)]
    pub token_env: Option<String>,

    /// Extra headers sent with every request to this host
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl GitLabIntegrationConfig {
    /// Create a config for a host with default URLs and no token
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_base_url: None,
            base_url: None,
            token: None,
            token_env: None,
            headers: HashMap::new(),
        }
    }

    /// Config for gitlab.com
    pub fn saas() -> Self {
        Self::new(GITLAB_SAAS_HOST)
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the web base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the access token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// REST API base URL without a trailing slash
    pub fn api_base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}/api/v4", self.host),
        }
    }

    /// Web base URL without a trailing slash
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host),
        }
    }

    /// Token from config, falling back to `token_env`
    pub fn token(&self) -> Option<String> {
        self.token.clone().or_else(|| {
            self.token_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
                .filter(|t| !t.is_empty())
        })
    }

    /// Whether this is the hosted gitlab.com offering
    pub fn is_saas(&self) -> bool {
        self.host.eq_ignore_ascii_case(GITLAB_SAAS_HOST)
    }

    /// Request options every call to this host carries
    ///
    /// Configured headers plus the token header, which takes precedence over
    /// a configured header of the same name.
    pub fn request_options(&self) -> RequestOptions {
        let configured = RequestOptions {
            headers: self.headers.clone(),
            timeout: None,
        };
        match self.token() {
            Some(token) => configured.merge(RequestOptions::new().header(TOKEN_HEADER, token)),
            None => configured,
        }
    }
}

impl std::fmt::Debug for GitLabIntegrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabIntegrationConfig")
            .field("host", &self.host)
            .field("api_base_url", &self.api_base_url())
            .field("base_url", &self.base_url())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("token_env", &self.token_env)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

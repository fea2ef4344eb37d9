//! GitLab REST client built on the pager

use super::types::{GitLabGroup, GitLabProject, GitLabUser, ListOptions};
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::integration::{parse_group_path, GitLabIntegrationConfig, IntegrationResolver};
use crate::pagination::{encode_query, paginate, PageRequest, PageResult};
use futures::stream::{BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Items requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Response header carrying the next page number
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Paginated client for one GitLab integration
#[derive(Clone)]
pub struct GitLabClient {
    integration: GitLabIntegrationConfig,
    transport: Arc<dyn HttpTransport>,
    page_size: u32,
    max_pages: Option<u64>,
}

impl GitLabClient {
    /// Create a client for a known integration
    pub fn new(integration: GitLabIntegrationConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            integration,
            transport,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
        }
    }

    /// Create a client for whichever integration owns `target`
    pub fn from_integrations(
        resolver: &dyn IntegrationResolver,
        target: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let integration = resolver.resolve(target).ok_or_else(|| {
            Error::config(format!("No GitLab integration found for {target}"))
        })?;
        Ok(Self::new(integration, transport))
    }

    /// Set the `per_page` value sent with every listing
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fail a listing instead of fetching more than `max_pages` pages
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u64>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Integration this client talks to
    pub fn integration(&self) -> &GitLabIntegrationConfig {
        &self.integration
    }

    /// Group path named by `target`, or `None` for the whole instance
    pub fn resolve_group(&self, target: &str) -> Result<Option<String>> {
        parse_group_path(target, &self.integration.base_url())
    }

    /// List projects of a group (including subgroups) or of the instance
    pub fn list_projects(
        &self,
        target: &str,
        options: &ListOptions,
    ) -> Result<BoxStream<'_, Result<GitLabProject>>> {
        let group = self.resolve_group(target)?;
        debug!(target, group = ?group, "Listing projects");

        let (endpoint, params) = match group {
            Some(group) => (
                self.endpoint_url(&["groups", group.as_str(), "projects"])?,
                self.base_params().with("include_subgroups", true),
            ),
            None => (self.endpoint_url(&["projects"])?, self.base_params()),
        };
        let params = params
            .with_opt("archived", options.archived)
            .with_opt("search", options.search.clone());

        Ok(self.paginate(endpoint, params))
    }

    /// List subgroups of a group, or all groups of the instance
    pub fn list_groups(
        &self,
        target: &str,
        options: &ListOptions,
    ) -> Result<BoxStream<'_, Result<GitLabGroup>>> {
        let group = self.resolve_group(target)?;
        debug!(target, group = ?group, "Listing groups");

        let endpoint = match group {
            Some(group) => self.endpoint_url(&["groups", group.as_str(), "subgroups"])?,
            None => self.endpoint_url(&["groups"])?,
        };
        let params = self
            .base_params()
            .with_opt("search", options.search.clone());

        Ok(self.paginate(endpoint, params))
    }

    /// List members of a group (including inherited), or all users of the instance
    ///
    /// Instance-wide listing is only allowed on self-managed instances and
    /// fails before any request is made on gitlab.com.
    pub fn list_users(
        &self,
        target: &str,
        options: &ListOptions,
    ) -> Result<BoxStream<'_, Result<GitLabUser>>> {
        let group = self.resolve_group(target)?;
        debug!(target, group = ?group, "Listing users");

        let (endpoint, params) = match group {
            Some(group) => (
                self.endpoint_url(&["groups", group.as_str(), "members", "all"])?,
                self.base_params(),
            ),
            None => {
                if self.integration.is_saas() {
                    return Err(Error::unsupported_host(
                        "listing all instance users",
                        &self.integration.host,
                    ));
                }
                (
                    self.endpoint_url(&["users"])?,
                    self.base_params()
                        .with("without_project_bots", true)
                        .with("exclude_internal", true),
                )
            }
        };
        let params = params
            .with_opt("active", options.active)
            .with_opt("search", options.search.clone());

        Ok(self.paginate(endpoint, params))
    }

    /// Fetch a single page of `endpoint`, a full API URL without query
    ///
    /// Any non-2xx status fails the fetch. The next page number comes from
    /// the `x-next-page` response header.
    pub async fn paged_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: PageRequest,
    ) -> Result<PageResult<T>> {
        let url = format!("{endpoint}{}", encode_query(&params));

        let response = self
            .transport
            .send(&url, &self.integration.request_options())
            .await?
            .error_for_status(&url)?;

        let items: Vec<T> = response.json()?;
        let next_cursor = parse_next_page(response.header(NEXT_PAGE_HEADER));

        debug!(
            endpoint,
            page = params.cursor().unwrap_or(1),
            items = items.len(),
            next_page = ?next_cursor,
            "Fetched page"
        );

        Ok(PageResult::new(items, next_cursor))
    }

    /// API URL for `segments` below the API base, each segment escaped whole
    ///
    /// A group path such as `teamA/sub` is one segment and becomes `teamA%2Fsub`.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<String> {
        let base = self.integration.api_base_url();
        let mut url = Url::parse(&base)?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("{base} cannot be used as an API base URL")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    fn base_params(&self) -> PageRequest {
        PageRequest::new().with("per_page", self.page_size)
    }

    fn paginate<T>(&self, endpoint: String, params: PageRequest) -> BoxStream<'_, Result<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = move |params: PageRequest| {
            let endpoint = endpoint.clone();
            async move { self.paged_request::<T>(&endpoint, params).await }
        };

        paginate(request, &params)
            .with_page_limit(self.max_pages)
            .boxed()
    }
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("integration", &self.integration)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

/// Parse the `x-next-page` header; empty, zero or garbage means "last page"
pub(crate) fn parse_next_page(value: Option<&str>) -> Option<u64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<u64>() {
        Ok(0) => None,
        Ok(page) => Some(page),
        Err(_) => {
            warn!(value, "Ignoring unparsable {NEXT_PAGE_HEADER} header");
            None
        }
    }
}

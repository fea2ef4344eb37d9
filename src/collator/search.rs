//! File discovery over object stores

use super::source::ObjectSource;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use regex::Regex;
use tracing::debug;

/// A file found by [`FileSearch::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFile {
    /// URL that [`FileSearch::open_stream`] accepts
    pub url: String,
    /// Last modification time, when the store reports one
    pub last_modified: Option<DateTime<Utc>>,
    /// Size in bytes, when the store reports one
    pub size: Option<u64>,
}

impl SearchFile {
    /// A file known only by URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            last_modified: None,
            size: None,
        }
    }
}

/// Capability to find files by pattern and stream their bytes
#[async_trait]
pub trait FileSearch: Send + Sync {
    /// All files matching a glob-like URL pattern, in no particular order
    async fn search(&self, pattern: &str) -> Result<Vec<SearchFile>>;

    /// Open a file for streaming
    async fn open_stream(&self, url: &str) -> Result<BoxStream<'static, Result<Bytes>>>;
}

/// [`FileSearch`] backed by the object_store crate
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreSearch;

impl ObjectStoreSearch {
    /// Create a new object store search
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSearch for ObjectStoreSearch {
    async fn search(&self, pattern: &str) -> Result<Vec<SearchFile>> {
        let source = ObjectSource::parse(pattern)?;
        let matcher = glob_to_regex(source.key())?;
        let prefix = source.list_prefix()?;

        debug!(pattern, prefix = ?prefix.as_ref().map(ToString::to_string), "Listing objects");

        let objects: Vec<_> = source
            .store()
            .list(prefix.as_ref())
            .try_collect()
            .await?;

        Ok(objects
            .into_iter()
            .filter(|meta| matcher.is_match(meta.location.as_ref()))
            .map(|meta| SearchFile {
                url: source.url_for(&meta.location),
                last_modified: Some(meta.last_modified),
                size: Some(meta.size as u64),
            })
            .collect())
    }

    async fn open_stream(&self, url: &str) -> Result<BoxStream<'static, Result<Bytes>>> {
        let source = ObjectSource::parse(url)?;
        if source.is_pattern() {
            return Err(Error::config(format!(
                "Cannot open a pattern as a single file: {url}"
            )));
        }

        let result = source.store().get(&source.location()?).await?;
        Ok(result.into_stream().map_err(Error::from).boxed())
    }
}

/// Compile a glob over `/`-separated keys into an anchored regex
///
/// `*` and `?` stay within one path segment; `**` spans segments, and
/// `**/` also matches zero directories.
pub fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    let mut chars = glob.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    pattern.push_str("(?:.*/)?");
                } else {
                    pattern.push_str(".*");
                }
            }
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            other => {
                let mut buf = [0u8; 4];
                pattern.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    pattern.push('$');

    Regex::new(&pattern).map_err(|e| Error::config(format!("Invalid search pattern {glob}: {e}")))
}

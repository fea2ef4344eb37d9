//! Latest-file NDJSON collator

use super::ndjson::NdjsonStream;
use super::search::{FileSearch, SearchFile};
use crate::error::{Error, Result};
use futures::stream::{BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

const NDJSON_EXTENSION: &str = ".ndjson";

/// Streams documents from the newest NDJSON file matching a pattern
#[derive(Clone)]
pub struct NdjsonCollator {
    document_type: String,
    search_pattern: String,
    search: Arc<dyn FileSearch>,
}

impl NdjsonCollator {
    /// Create a collator for `document_type` documents
    pub fn new(
        document_type: impl Into<String>,
        search_pattern: impl Into<String>,
        search: Arc<dyn FileSearch>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            search_pattern: search_pattern.into(),
            search,
        }
    }

    /// Type of documents this collator produces
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// The `.ndjson` match with the greatest URL
    pub async fn latest_file(&self) -> Result<SearchFile> {
        let files = self.search.search(&self.search_pattern).await?;

        files
            .into_iter()
            .filter(|file| file.url.ends_with(NDJSON_EXTENSION))
            .max_by(|a, b| a.url.cmp(&b.url))
            .ok_or_else(|| Error::discovery(&self.search_pattern))
    }

    /// Open the latest file and stream its records
    ///
    /// Discovery errors are returned before any stream is opened.
    pub async fn collate<T>(&self) -> Result<BoxStream<'static, Result<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let file = self.latest_file().await?;
        info!(
            document_type = %self.document_type,
            url = %file.url,
            last_modified = ?file.last_modified,
            "Collating documents"
        );

        let bytes = self.search.open_stream(&file.url).await?;
        Ok(NdjsonStream::new(bytes).boxed())
    }
}

impl std::fmt::Debug for NdjsonCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdjsonCollator")
            .field("document_type", &self.document_type)
            .field("search_pattern", &self.search_pattern)
            .finish_non_exhaustive()
    }
}

//! Object store sources (S3, R2, GCS, Azure, local)

use crate::error::{Error, Result};
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An object store plus a key (or key pattern) within it
#[derive(Debug, Clone)]
pub struct ObjectSource {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// URL of the store root, e.g. `s3://bucket` or `file:///data/exports`
    root_url: String,
    /// Key relative to the store root; may contain glob characters
    key: String,
}

impl ObjectSource {
    /// Parse a source URL and create the matching object store
    ///
    /// Supported formats:
    /// - `s3://bucket/key` - AWS S3
    /// - `r2://bucket/key` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/key` - Google Cloud Storage
    /// - `az://container/key` - Azure Blob Storage
    /// - `file:///abs/path` or a plain path - Local filesystem
    ///
    /// For local paths the store is rooted at the deepest directory that
    /// contains no glob characters, and must exist.
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else if url.contains("://") && !url.starts_with("file://") {
            Err(Error::config(format!("Unsupported object store URL: {url}")))
        } else {
            Self::parse_local(url)
        }
    }

    fn parse_s3(url: &str, is_r2: bool) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, key) = split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if is_r2 {
            // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root_url: format!("{scheme}://{bucket}"),
            key,
        })
    }

    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, key) = split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root_url: format!("gs://{bucket}"),
            key,
        })
    }

    fn parse_azure(url: &str) -> Result<Self> {
        let (container, key) = split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root_url: format!("az://{container}"),
            key,
        })
    }

    fn parse_local(url: &str) -> Result<Self> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            std::env::current_dir()?.join(path)
        };
        let path = path.to_string_lossy().replace('\\', "/");

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let split = segments
            .iter()
            .position(|s| has_glob(s))
            .unwrap_or(segments.len().saturating_sub(1));
        let root = format!("/{}", segments[..split].join("/"));
        let key = segments[split..].join("/");

        let store = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| Error::config(format!("Failed to open local directory {root}: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            root_url: format!("file://{}", root.trim_end_matches('/')),
            key,
        })
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Key (or key pattern) relative to the store root
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check if the key contains glob characters
    pub fn is_pattern(&self) -> bool {
        has_glob(&self.key)
    }

    /// Longest directory prefix of the key without glob characters
    pub fn list_prefix(&self) -> Result<Option<ObjectPath>> {
        let segments: Vec<&str> = self.key.split('/').collect();
        let static_len = segments
            .iter()
            .position(|s| has_glob(s))
            .unwrap_or(segments.len().saturating_sub(1));
        if static_len == 0 {
            Ok(None)
        } else {
            parse_object_path(&segments[..static_len].join("/")).map(Some)
        }
    }

    /// The key as an object path
    ///
    /// Keys are taken verbatim, so a location rendered by [`Self::url_for`]
    /// parses back to the same object.
    pub fn location(&self) -> Result<ObjectPath> {
        parse_object_path(&self.key)
    }

    /// Full URL of an object in this store
    pub fn url_for(&self, location: &ObjectPath) -> String {
        format!("{}/{location}", self.root_url)
    }
}

/// Split `scheme://bucket/key` into bucket and key
fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, String)> {
    let without_scheme = url
        .strip_prefix(&format!("{scheme}://"))
        .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

    let (bucket, key) = match without_scheme.find('/') {
        Some(idx) => (&without_scheme[..idx], without_scheme[idx + 1..].to_string()),
        None => (without_scheme, String::new()),
    };

    if bucket.is_empty() {
        return Err(Error::config(format!("Missing bucket in {url}")));
    }
    Ok((bucket, key))
}

fn parse_object_path(key: &str) -> Result<ObjectPath> {
    ObjectPath::parse(key).map_err(|e| Error::config(format!("Invalid object key {key}: {e}")))
}

/// Check if a string contains glob characters
pub(crate) fn has_glob(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

//! Attachment resolution and object storage.
//!
//! Notes reference attachments by path relative to the takeout root. The
//! resolver checks the file exists; the [`AttachmentStore`] collaborator
//! uploads it and hands back a public URL for the delivered note body.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use keeplist_core::defaults::UPLOAD_TIMEOUT_SECS;
use keeplist_core::{Error, Result};

/// Resolve a note's relative attachment path against the takeout root.
pub fn resolve_attachment(base_dir: &Path, relative: &str) -> Result<PathBuf> {
    let candidate = base_dir.join(relative);
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(Error::AttachmentNotFound(candidate))
    }
}

/// Object storage collaborator: takes a local file, returns a public URL.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Upload a local file and return the URL it is now served from.
    async fn upload(&self, path: &Path) -> Result<String>;
}

/// Configuration for the HTTP bucket store.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    /// Base URL accepting `PUT {upload_url}/{key}`.
    pub upload_url: String,
    /// Base URL the bucket serves objects from.
    pub public_url: String,
    /// Upload request timeout in seconds.
    pub timeout_secs: u64,
}

impl BucketConfig {
    /// Read bucket configuration from the environment.
    ///
    /// Returns `None` when `BUCKET_UPLOAD_URL` is unset; the migration
    /// then runs with uploads disabled. `BUCKET_PUBLIC_URL` defaults to
    /// the upload URL.
    pub fn from_env() -> Option<Self> {
        let upload_url = std::env::var("BUCKET_UPLOAD_URL").ok()?;
        let public_url = std::env::var("BUCKET_PUBLIC_URL").unwrap_or_else(|_| upload_url.clone());
        Some(Self {
            upload_url,
            public_url,
            timeout_secs: UPLOAD_TIMEOUT_SECS,
        })
    }
}

/// Attachment store backed by an HTTP bucket gateway (PUT to upload,
/// GET from a public base URL).
pub struct HttpBucketStore {
    client: Client,
    config: BucketConfig,
}

impl HttpBucketStore {
    /// Create a new bucket store.
    pub fn new(config: BucketConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Storage(format!("Failed to create HTTP client: {}", e)))?;

        info!(upload_url = %config.upload_url, "Initializing bucket store");
        Ok(Self { client, config })
    }

    /// Unique object key for an upload: a UUID plus the sanitized filename.
    fn object_key(path: &Path) -> String {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment");
        format!("{}-{}", Uuid::new_v4(), sanitize_object_name(name))
    }
}

/// Keep object names URL-safe: alphanumerics, dot, dash, underscore.
fn sanitize_object_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[async_trait]
impl AttachmentStore for HttpBucketStore {
    async fn upload(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let key = Self::object_key(path);
        let target = format!("{}/{}", self.config.upload_url.trim_end_matches('/'), key);

        debug!(key = %key, content_type, size = bytes.len(), "Uploading attachment");

        let response = self
            .client
            .put(&target)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "upload returned {}",
                response.status()
            )));
        }

        Ok(format!(
            "{}/{}",
            self.config.public_url.trim_end_matches('/'),
            key
        ))
    }
}

//! Mock attachment store for deterministic testing.
//!
//! Uploads nothing; hands back predictable URLs, records every call, and
//! can be told to fail for specific filenames.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use keeplist_core::{Error, Result};

use crate::attachments::AttachmentStore;

/// Mock store returning `{base_url}/{filename}` for every upload.
#[derive(Clone)]
pub struct MockAttachmentStore {
    base_url: String,
    failing_names: HashSet<String>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockAttachmentStore {
    /// Create a new mock store.
    pub fn new() -> Self {
        Self {
            base_url: "https://mock.store".to_string(),
            failing_names: HashSet::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the base URL used in returned links.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make uploads of files with this name fail.
    pub fn with_failure(mut self, file_name: impl Into<String>) -> Self {
        self.failing_names.insert(file_name.into());
        self
    }

    /// Paths uploaded so far, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentStore for MockAttachmentStore {
    async fn upload(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();

        if self.failing_names.contains(&name) {
            return Err(Error::Storage(format!("mock failure for {}", name)));
        }

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        Ok(format!("{}/{}", self.base_url, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_deterministic_url() {
        let store = MockAttachmentStore::new();
        let url = store.upload(Path::new("/t/photo.png")).await.unwrap();
        assert_eq!(url, "https://mock.store/photo.png");
    }

    #[tokio::test]
    async fn test_upload_records_calls() {
        let store = MockAttachmentStore::new();
        store.upload(Path::new("/t/a.png")).await.unwrap();
        store.upload(Path::new("/t/b.png")).await.unwrap();

        let calls = store.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].ends_with("b.png"));
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MockAttachmentStore::new().with_failure("bad.png");
        let result = store.upload(Path::new("/t/bad.png")).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.calls().is_empty());
    }
}

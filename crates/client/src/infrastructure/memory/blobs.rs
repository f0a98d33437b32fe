//! In-memory blob store.

use async_trait::async_trait;
use dashmap::DashMap;

use rolegate_domain::LogoFile;

use crate::infrastructure::ports::{BlobStore, StoreError};

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Blob store keyed by path. Uploading to an existing path overwrites it.
pub struct InMemoryBlobStore {
    base_url: String,
    blobs: DashMap<String, StoredBlob>,
}

impl InMemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            blobs: DashMap::new(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.get(path).map(|blob| blob.bytes.clone())
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.blobs
            .get(path)
            .and_then(|blob| blob.content_type.clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, path: &str, file: &LogoFile) -> Result<String, StoreError> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(StoreError::backend("blob.upload", "empty path"));
        }

        let previous = self.blobs.insert(
            path.to_string(),
            StoredBlob {
                content_type: file.content_type().map(str::to_string),
                bytes: file.bytes().to_vec(),
            },
        );
        if previous.is_some() {
            tracing::debug!(path = %path, "Overwrote existing blob");
        }

        Ok(self.url_for(path))
    }
}

//! In-memory adapters for all three ports.
//!
//! Used by the binary and the end-to-end tests in place of the hosted
//! identity provider, document store and blob store.

mod blobs;
mod credentials;
mod profiles;

use std::sync::Arc;

pub use blobs::InMemoryBlobStore;
pub use credentials::InMemoryCredentialStore;
pub use profiles::InMemoryProfileStore;

use crate::config::ClientConfig;

/// The three in-memory adapters, shared so tests can inspect them.
#[derive(Clone)]
pub struct InMemoryBackend {
    pub credentials: Arc<InMemoryCredentialStore>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub blobs: Arc<InMemoryBlobStore>,
}

impl InMemoryBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialStore::new(config.min_password_len)),
            profiles: Arc::new(InMemoryProfileStore::new()),
            blobs: Arc::new(InMemoryBlobStore::new(config.blob_base_url.clone())),
        }
    }
}

//! External service ports: identity provider, document store, blob store.

use async_trait::async_trait;
use rolegate_domain::{LogoFile, ProfileDocument, Session, UserId};

use super::error::{CredentialError, StoreError};
use super::types::SessionChanges;

/// Email/password identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Sign in an existing account. A successful call is also pushed to
    /// every subscriber.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, CredentialError>;

    /// Create an account and sign it in.
    async fn register(&self, email: &str, password: &str) -> Result<Session, CredentialError>;

    /// End the current session. Signing out with no session is a no-op.
    async fn sign_out(&self);

    /// Push-based session changes. The receiver gets the current state
    /// immediately, then every later transition.
    fn subscribe(&self) -> SessionChanges;
}

/// Per-identity profile documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileDocument>, StoreError>;

    /// Replace the document for `user_id`.
    async fn set(&self, user_id: &UserId, document: &ProfileDocument) -> Result<(), StoreError>;
}

/// Binary uploads addressed by path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `file` under `path`, overwriting whatever was there, and return
    /// a durable retrieval URL.
    async fn upload(&self, path: &str, file: &LogoFile) -> Result<String, StoreError>;
}

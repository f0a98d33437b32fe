//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the client. Everything else is concrete
//! types. Ports exist for:
//! - Authentication (hosted identity provider, or the in-memory backend)
//! - Profile documents (hosted document database)
//! - Logo uploads (hosted blob storage)

mod error;
mod external;
pub mod types;

pub use error::{CredentialError, CredentialErrorKind, StoreError};
pub use external::{BlobStore, CredentialStore, ProfileStore};
pub use types::{SessionChange, SessionChangeSender, SessionChanges};

// =============================================================================
// Test-Only Mock Ports (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockBlobStore, MockCredentialStore, MockProfileStore};

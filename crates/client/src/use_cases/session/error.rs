//! Session workflow error types.

use crate::infrastructure::ports::{CredentialError, StoreError};

/// Errors returned by workflow handlers.
///
/// Every variant is also reduced to a UI slot or a log line by the handler
/// that produced it; the returned value is for callers and tests.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Another request is already in progress")]
    Busy,

    #[error("Choose a role before signing up")]
    RoleNotSelected,

    #[error("No active session")]
    NoSession,

    #[error("The signed-in account has no profile")]
    NoProfile,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Logo upload to '{path}' failed: {source}")]
    Upload {
        path: String,
        #[source]
        source: StoreError,
    },

    #[error("Profile write failed: {0}")]
    ProfileWrite(#[source] StoreError),

    #[error("Profile read failed: {0}")]
    ProfileRead(#[source] StoreError),

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

impl WorkflowError {
    /// Generic text for the `general_error` slot.
    pub fn user_message(&self) -> String {
        match self {
            Self::Upload { .. } => "The logo could not be uploaded.".to_string(),
            Self::ProfileWrite(_) => "Your profile could not be saved.".to_string(),
            Self::ProfileRead(_) => "Your profile could not be loaded.".to_string(),
            Self::Timeout { .. } => "The server took too long to respond.".to_string(),
            other => other.to_string(),
        }
    }
}

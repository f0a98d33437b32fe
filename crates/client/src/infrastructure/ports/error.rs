//! Error types for port operations.

use std::fmt;
use std::str::FromStr;

/// Failure categories reported by the credential store.
///
/// Codes follow the hosted identity provider's naming so adapters can map
/// provider responses with [`CredentialErrorKind::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialErrorKind {
    InvalidEmail,
    UserDisabled,
    UserNotFound,
    WrongPassword,
    EmailAlreadyInUse,
    WeakPassword,
    /// Anything the client has no field mapping for (network, quota, ...)
    Other,
}

impl CredentialErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::UserDisabled => "auth/user-disabled",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::Other => "auth/other",
        }
    }

    /// Parse a provider error code. Unknown codes become `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/user-disabled" => Self::UserDisabled,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            _ => Self::Other,
        }
    }
}

impl FromStr for CredentialErrorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl fmt::Display for CredentialErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Categorized credential store failure with the provider's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({kind})")]
pub struct CredentialError {
    pub kind: CredentialErrorKind,
    pub message: String,
}

impl CredentialError {
    pub fn new(kind: CredentialErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build from a raw provider code and message.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        Self::new(CredentialErrorKind::from_code(code), message)
    }
}

/// Profile and blob store errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("Backend error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// Caller is not allowed to read or write the key.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

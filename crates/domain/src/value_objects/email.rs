//! Validated email address newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for an email address (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

/// A syntactically plausible email address, trimmed and lowercased.
///
/// This is the shape check a credential store performs before looking the
/// account up; it deliberately stops short of full RFC 5322 parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new validated email.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The address is empty or contains whitespace
    /// - There is not exactly one `@` with text on both sides
    /// - The domain part has no interior `.`
    /// - The address exceeds 254 characters
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("Email cannot be empty"));
        }
        if normalized.len() > MAX_EMAIL_LENGTH {
            return Err(DomainError::validation(format!(
                "Email cannot exceed {} characters",
                MAX_EMAIL_LENGTH
            )));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("Email cannot contain whitespace"));
        }

        let mut parts = normalized.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::validation(
                "Email must contain exactly one '@'",
            ));
        };
        if local.is_empty() {
            return Err(DomainError::validation("Email is missing the local part"));
        }
        if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
            return Err(DomainError::validation(format!(
                "Email domain '{}' is not valid",
                domain
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

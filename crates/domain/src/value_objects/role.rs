//! Account role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Role assigned at sign-up. Determines the home view and which profile
/// fields apply. Immutable once written to the profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }

    /// Document key holding the role's display name.
    pub fn name_key(&self) -> &'static str {
        match self {
            Self::Admin => "companyName",
            Self::Student => "studentName",
        }
    }

    /// Document key holding the role's logo URL.
    pub fn logo_key(&self) -> &'static str {
        match self {
            Self::Admin => "companyLogo",
            Self::Student => "studentLogo",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            other => Err(DomainError::parse(format!("Unknown role: {}", other))),
        }
    }
}

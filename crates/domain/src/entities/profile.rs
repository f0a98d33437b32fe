//! Role-tagged account profile.
//!
//! `Profile` is what the client works with; `ProfileDocument` is the stored
//! shape, whose field names depend on the role:
//!
//! | role    | name key      | logo key      |
//! |---------|---------------|---------------|
//! | admin   | `companyName` | `companyLogo` |
//! | student | `studentName` | `studentLogo` |
//!
//! Absent values are omitted from the document, never written as null.

use serde::{Deserialize, Serialize};

use crate::common::StringExt;
use crate::ids::UserId;
use crate::value_objects::Role;

/// Profile keyed 1:1 by the session identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub role: Role,
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

impl Profile {
    pub fn from_document(user_id: UserId, document: ProfileDocument) -> Self {
        let role = document.role();
        let (name, logo_url) = document.into_parts();
        Self {
            user_id,
            role,
            name,
            logo_url,
        }
    }

    pub fn to_document(&self) -> ProfileDocument {
        ProfileDocument::new(self.role, self.name.clone(), self.logo_url.clone())
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// Stored profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileDocument {
    Admin {
        #[serde(
            rename = "companyName",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        company_name: Option<String>,
        #[serde(
            rename = "companyLogo",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        company_logo: Option<String>,
    },
    Student {
        #[serde(
            rename = "studentName",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        student_name: Option<String>,
        #[serde(
            rename = "studentLogo",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        student_logo: Option<String>,
    },
}

impl ProfileDocument {
    /// Build a document for `role`. Blank names are dropped.
    pub fn new(role: Role, name: Option<String>, logo_url: Option<String>) -> Self {
        let name = name.into_non_blank();
        match role {
            Role::Admin => Self::Admin {
                company_name: name,
                company_logo: logo_url,
            },
            Role::Student => Self::Student {
                student_name: name,
                student_logo: logo_url,
            },
        }
    }

    /// A document carrying only the role tag.
    pub fn bare(role: Role) -> Self {
        Self::new(role, None, None)
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin { .. } => Role::Admin,
            Self::Student { .. } => Role::Student,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Admin { company_name, .. } => company_name.as_deref(),
            Self::Student { student_name, .. } => student_name.as_deref(),
        }
    }

    pub fn logo_url(&self) -> Option<&str> {
        match self {
            Self::Admin { company_logo, .. } => company_logo.as_deref(),
            Self::Student { student_logo, .. } => student_logo.as_deref(),
        }
    }

    /// Same document with the logo replaced. Role and name are preserved.
    pub fn with_logo(self, url: impl Into<String>) -> Self {
        let role = self.role();
        let (name, _) = self.into_parts();
        Self::new(role, name, Some(url.into()))
    }

    fn into_parts(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Admin {
                company_name,
                company_logo,
            } => (company_name, company_logo),
            Self::Student {
                student_name,
                student_logo,
            } => (student_name, student_logo),
        }
    }
}

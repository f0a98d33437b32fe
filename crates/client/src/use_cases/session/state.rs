//! Snapshot state published by the session workflow.

use std::fmt;

use rolegate_domain::{LogoFile, Profile, Role, Session};

/// Transient form input, not yet sent to any store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub display_name: String,
    pub logo: Option<LogoFile>,
    /// Sign-in mode when true, sign-up mode otherwise.
    pub has_account: bool,
}

impl FormDraft {
    /// Reset every input field. The sign-in/sign-up mode is kept.
    pub fn clear(&mut self) {
        *self = Self {
            has_account: self.has_account,
            ..Self::default()
        };
    }
}

impl fmt::Debug for FormDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDraft")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .field("logo", &self.logo)
            .field("has_account", &self.has_account)
            .finish()
    }
}

/// Everything the view layer may read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
    /// True until the first session-change callback completes.
    pub loading_initial_session: bool,
    pub draft: FormDraft,
    pub email_error: String,
    pub password_error: String,
    /// Downstream failures (upload, profile read/write, timeouts).
    pub general_error: String,
    pub in_flight: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            profile: None,
            loading_initial_session: true,
            draft: FormDraft::default(),
            email_error: String::new(),
            password_error: String::new(),
            general_error: String::new(),
            in_flight: false,
        }
    }
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    /// Role as displayed: `"admin"`, `"student"` or empty.
    pub fn role_label(&self) -> &'static str {
        self.role().map(|r| r.as_str()).unwrap_or("")
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn clear_errors(&mut self) {
        self.email_error.clear();
        self.password_error.clear();
        self.general_error.clear();
    }
}

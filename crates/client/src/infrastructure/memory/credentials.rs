//! In-memory email/password identity provider.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_channel::mpsc;

use rolegate_domain::{Email, Session, UserId};

use crate::infrastructure::ports::{
    CredentialError, CredentialErrorKind, CredentialStore, SessionChange, SessionChangeSender,
    SessionChanges,
};

const INVALID_EMAIL: &str = "The email address is badly formatted.";
const USER_NOT_FOUND: &str =
    "There is no user record corresponding to this identifier. The user may have been deleted.";
const WRONG_PASSWORD: &str = "The password is invalid or the user does not have a password.";
const USER_DISABLED: &str = "The user account has been disabled by an administrator.";
const EMAIL_IN_USE: &str = "The email address is already in use by another account.";

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
    disabled: bool,
}

#[derive(Default)]
struct Inner {
    current: Option<Session>,
    subscribers: Vec<SessionChangeSender>,
}

/// Credential store backed by a map of accounts.
///
/// Mirrors the hosted provider's observable behavior: error categories and
/// messages, an immediate notification on subscribe, and a notification on
/// every sign-in, sign-up and sign-out.
///
/// For tests and local demos only. Passwords are kept in plaintext and the
/// store never persists anything.
pub struct InMemoryCredentialStore {
    accounts: DashMap<Email, Account>,
    inner: Mutex<Inner>,
    min_password_len: usize,
}

impl InMemoryCredentialStore {
    pub fn new(min_password_len: usize) -> Self {
        Self {
            accounts: DashMap::new(),
            inner: Mutex::new(Inner::default()),
            min_password_len,
        }
    }

    /// Currently signed-in session, if any.
    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Mark an account disabled. Returns false when no such account exists.
    pub fn disable(&self, email: &str) -> bool {
        let Ok(email) = Email::new(email) else {
            return false;
        };
        match self.accounts.get_mut(&email) {
            Some(mut account) => {
                account.disabled = true;
                true
            }
            None => false,
        }
    }

    /// End the current session from outside the client, as when a token is
    /// revoked server-side.
    pub fn revoke(&self) {
        let mut inner = self.lock();
        if inner.current.take().is_some() {
            tracing::info!("Session revoked");
            Self::notify(&mut inner, None);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn notify(inner: &mut Inner, change: SessionChange) {
        inner
            .subscribers
            .retain(|tx| tx.unbounded_send(change.clone()).is_ok());
    }

    fn start_session(&self, user_id: UserId, email: Email) -> Session {
        let session = Session::new(user_id, email, Utc::now());
        let mut inner = self.lock();
        inner.current = Some(session.clone());
        Self::notify(&mut inner, Some(session.clone()));
        session
    }

    fn parse_email(email: &str) -> Result<Email, CredentialError> {
        Email::new(email)
            .map_err(|_| CredentialError::new(CredentialErrorKind::InvalidEmail, INVALID_EMAIL))
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, CredentialError> {
        let email = Self::parse_email(email)?;

        let account = self
            .accounts
            .get(&email)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| CredentialError::new(CredentialErrorKind::UserNotFound, USER_NOT_FOUND))?;

        if account.disabled {
            return Err(CredentialError::new(
                CredentialErrorKind::UserDisabled,
                USER_DISABLED,
            ));
        }
        if account.password != password {
            return Err(CredentialError::new(
                CredentialErrorKind::WrongPassword,
                WRONG_PASSWORD,
            ));
        }

        tracing::debug!(user_id = %account.user_id, "Authenticated");
        Ok(self.start_session(account.user_id, email))
    }

    async fn register(&self, email: &str, password: &str) -> Result<Session, CredentialError> {
        let email = Self::parse_email(email)?;

        if password.chars().count() < self.min_password_len {
            return Err(CredentialError::new(
                CredentialErrorKind::WeakPassword,
                format!(
                    "Password should be at least {} characters",
                    self.min_password_len
                ),
            ));
        }

        let user_id = match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => {
                return Err(CredentialError::new(
                    CredentialErrorKind::EmailAlreadyInUse,
                    EMAIL_IN_USE,
                ))
            }
            Entry::Vacant(slot) => {
                let user_id = UserId::generate();
                slot.insert(Account {
                    user_id: user_id.clone(),
                    password: password.to_string(),
                    disabled: false,
                });
                user_id
            }
        };

        tracing::debug!(user_id = %user_id, "Account registered");
        Ok(self.start_session(user_id, email))
    }

    async fn sign_out(&self) {
        let mut inner = self.lock();
        if inner.current.take().is_some() {
            Self::notify(&mut inner, None);
        }
    }

    fn subscribe(&self) -> SessionChanges {
        let (tx, rx) = mpsc::unbounded();
        let mut inner = self.lock();
        if tx.unbounded_send(inner.current.clone()).is_ok() {
            inner.subscribers.push(tx);
        }
        rx
    }
}

//! Session bootstrap workflow.
//!
//! Owns the client's authentication state and is the only writer to it.
//! The credential store's change subscription is the source of truth for
//! whether a user is signed in: `sign_in` and `sign_up` never mark the
//! session active themselves, they wait for `on_session_change`.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use rolegate_domain::{LogoFile, Profile, Role, UserId};

use crate::config::ClientConfig;
use crate::infrastructure::ports::{
    BlobStore, CredentialError, CredentialErrorKind, CredentialStore, ProfileStore, SessionChange,
};

use super::error::WorkflowError;
use super::state::AuthState;

/// Tunables taken from [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub logo_prefix: String,
    pub request_timeout: Option<Duration>,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for WorkflowSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            logo_prefix: config.logo_prefix.clone(),
            request_timeout: config.request_timeout,
        }
    }
}

/// Which form field a credential error is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    Email,
    Password,
}

/// Field mapping for sign-in failures.
pub fn sign_in_field(kind: CredentialErrorKind) -> Option<ErrorField> {
    match kind {
        CredentialErrorKind::InvalidEmail
        | CredentialErrorKind::UserDisabled
        | CredentialErrorKind::UserNotFound => Some(ErrorField::Email),
        CredentialErrorKind::WrongPassword => Some(ErrorField::Password),
        _ => None,
    }
}

/// Field mapping for registration failures.
pub fn sign_up_field(kind: CredentialErrorKind) -> Option<ErrorField> {
    match kind {
        CredentialErrorKind::EmailAlreadyInUse | CredentialErrorKind::InvalidEmail => {
            Some(ErrorField::Email)
        }
        CredentialErrorKind::WeakPassword => Some(ErrorField::Password),
        _ => None,
    }
}

/// Use case orchestrating sign-up, sign-in, sign-out, logo upload and
/// session restoration.
pub struct SessionWorkflow {
    pub(super) credentials: Arc<dyn CredentialStore>,
    pub(super) profiles: Arc<dyn ProfileStore>,
    pub(super) blobs: Arc<dyn BlobStore>,
    pub(super) settings: WorkflowSettings,
    pub(super) state: watch::Sender<AuthState>,
    in_flight: AtomicBool,
    /// Number of sign-outs observed through the subscription.
    sign_outs: AtomicU64,
}

impl SessionWorkflow {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        profiles: Arc<dyn ProfileStore>,
        blobs: Arc<dyn BlobStore>,
        settings: WorkflowSettings,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            credentials,
            profiles,
            blobs,
            settings,
            state,
            in_flight: AtomicBool::new(false),
            sign_outs: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Current state snapshot.
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribe to the credential store and apply every pushed change.
    ///
    /// Call once at startup. The subscription lives until the returned
    /// handle is shut down or dropped.
    pub fn listen(self: &Arc<Self>) -> WorkflowHandle {
        let mut changes = self.credentials.subscribe();
        let workflow = Arc::clone(self);
        let task = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                workflow.on_session_change(change).await;
            }
            tracing::debug!("Credential store closed the session change stream");
        });
        WorkflowHandle { task: Some(task) }
    }

    /// Apply one session transition.
    pub async fn on_session_change(&self, change: SessionChange) {
        match change {
            Some(session) => {
                let user_id = session.user_id.clone();
                tracing::info!(user_id = %user_id, "Session active");
                self.state.send_modify(|s| {
                    s.draft.clear();
                    if s.profile.as_ref().is_some_and(|p| !p.belongs_to(&user_id)) {
                        s.profile = None;
                    }
                    s.session = Some(session);
                });
                self.restore_profile(&user_id).await;
            }
            None => {
                tracing::info!("Session ended");
                self.sign_outs.fetch_add(1, Ordering::AcqRel);
                self.state.send_modify(|s| {
                    s.session = None;
                    s.profile = None;
                });
            }
        }

        self.state.send_if_modified(|s| {
            let first = s.loading_initial_session;
            s.loading_initial_session = false;
            if first {
                tracing::debug!("Initial session check complete");
            }
            first
        });
    }

    async fn restore_profile(&self, user_id: &UserId) {
        let result = self
            .bounded("profile.get", self.profiles.get(user_id))
            .await
            .and_then(|r| r.map_err(WorkflowError::ProfileRead));

        match result {
            Ok(Some(document)) => {
                let profile = Profile::from_document(user_id.clone(), document);
                tracing::debug!(user_id = %user_id, role = %profile.role, "Profile restored");
                self.state.send_modify(|s| {
                    if s.session.as_ref().is_some_and(|c| &c.user_id == user_id) {
                        s.profile = Some(profile);
                    } else {
                        tracing::debug!(user_id = %user_id, "Discarding profile read for a stale session");
                    }
                });
            }
            Ok(None) => {
                // Sign-up may still be writing it; leave whatever is local.
                tracing::warn!(user_id = %user_id, "Session has no profile document");
            }
            Err(err) => {
                tracing::error!(user_id = %user_id, error = %err, "Failed to load profile");
                let message = err.user_message();
                self.state.send_modify(|s| s.general_error = message);
            }
        }
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Sign in an existing account.
    ///
    /// Success does not touch local state; the session arrives through the
    /// subscription.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), WorkflowError> {
        let _guard = self.begin()?;
        self.state.send_modify(AuthState::clear_errors);

        let result = self
            .bounded("authenticate", self.credentials.authenticate(email, password))
            .await;

        match result {
            Ok(Ok(session)) => {
                tracing::info!(user_id = %session.user_id, "Sign-in accepted");
                Ok(())
            }
            Ok(Err(err)) => {
                self.report_credential_error(&err, sign_in_field(err.kind));
                Err(err.into())
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    /// End the current session. Local state follows through the
    /// subscription.
    pub async fn sign_out(&self) -> Result<(), WorkflowError> {
        tracing::debug!("Signing out");
        let result = self.bounded("sign_out", self.credentials.sign_out()).await;
        if let Err(err) = &result {
            self.report_failure(err);
        }
        result
    }

    // =========================================================================
    // Form draft
    // =========================================================================

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.send_modify(|s| s.draft.email = email);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.state.send_modify(|s| s.draft.password = password);
    }

    pub fn select_role(&self, role: Role) {
        self.state.send_modify(|s| s.draft.role = Some(role));
    }

    pub fn set_display_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|s| s.draft.display_name = name);
    }

    pub fn attach_logo(&self, logo: Option<LogoFile>) {
        self.state.send_modify(|s| s.draft.logo = logo);
    }

    pub fn set_has_account(&self, has_account: bool) {
        self.state.send_modify(|s| s.draft.has_account = has_account);
    }

    /// Switch between the sign-in and sign-up forms.
    pub fn toggle_has_account(&self) {
        self.state
            .send_modify(|s| s.draft.has_account = !s.draft.has_account);
    }

    /// Submit the form in its current mode.
    pub async fn submit(&self) -> Result<(), WorkflowError> {
        let draft = self.state.borrow().draft.clone();
        if draft.has_account {
            return self.sign_in(&draft.email, &draft.password).await;
        }

        let Some(role) = draft.role else {
            let err = WorkflowError::RoleNotSelected;
            self.state.send_modify(|s| {
                s.clear_errors();
                s.general_error = err.user_message();
            });
            return Err(err);
        };

        let request = super::SignUpRequest {
            email: draft.email,
            password: draft.password,
            role,
            name: Some(draft.display_name),
            logo: draft.logo,
        };
        self.sign_up(request).await.map(|_| ())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Take the in-flight guard, rejecting re-entrant submissions.
    pub(super) fn begin(&self) -> Result<InFlight<'_>, WorkflowError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Rejecting submission while another is in flight");
            return Err(WorkflowError::Busy);
        }
        self.state.send_modify(|s| s.in_flight = true);
        Ok(InFlight { workflow: self })
    }

    /// Run `fut` under the configured request timeout, if any.
    pub(super) async fn bounded<F: Future>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<F::Output, WorkflowError> {
        match self.settings.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                WorkflowError::Timeout {
                    operation,
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            }),
            None => Ok(fut.await),
        }
    }

    pub(super) fn report_credential_error(&self, err: &CredentialError, field: Option<ErrorField>) {
        match field {
            Some(ErrorField::Email) => {
                tracing::debug!(code = %err.kind, "Credential error shown on email field");
                let message = err.message.clone();
                self.state.send_modify(|s| s.email_error = message);
            }
            Some(ErrorField::Password) => {
                tracing::debug!(code = %err.kind, "Credential error shown on password field");
                let message = err.message.clone();
                self.state.send_modify(|s| s.password_error = message);
            }
            None => {
                tracing::error!(
                    code = %err.kind,
                    provider_message = %err.message,
                    "Unclassified credential error"
                );
            }
        }
    }

    /// Current sign-out count. Capture it before a write and hand it to
    /// `adopt_profile` so a sign-out during the write is not undone.
    pub(super) fn sign_out_epoch(&self) -> u64 {
        self.sign_outs.load(Ordering::Acquire)
    }

    /// Log a downstream failure and surface it in `general_error`.
    pub(super) fn report_failure(&self, err: &WorkflowError) {
        tracing::error!(error = %err, "Session workflow step failed");
        let message = err.user_message();
        self.state.send_modify(|s| s.general_error = message);
    }
}

/// RAII in-flight marker; clears the flag when the handler returns.
pub(super) struct InFlight<'a> {
    workflow: &'a SessionWorkflow,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.workflow.in_flight.store(false, Ordering::Release);
        self.workflow.state.send_modify(|s| s.in_flight = false);
    }
}

/// Owns the listener task started by [`SessionWorkflow::listen`].
pub struct WorkflowHandle {
    task: Option<JoinHandle<()>>,
}

impl WorkflowHandle {
    /// Stop listening for session changes.
    pub fn shutdown(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for WorkflowHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

//! E2E test helpers for constructing the full client stack.
//!
//! Provides a fully wired [`App`] on the in-memory backend, with the session
//! listener running and a state receiver for waiting on transitions.

use std::time::Duration;

use tokio::sync::watch;

use rolegate_domain::{LogoFile, UserId};

use crate::app::App;
use crate::config::ClientConfig;
use crate::infrastructure::memory::InMemoryBackend;
use crate::use_cases::session::{AuthState, SessionWorkflow, WorkflowHandle};

/// How long a test waits for a state transition before failing.
pub const WAIT: Duration = Duration::from_secs(2);

/// URL the in-memory blob store hands out for `path` under default config.
pub fn blob_url(path: &str) -> String {
    format!("{}/{}", crate::config::DEFAULT_BLOB_BASE_URL, path)
}

pub fn logo(name: &str) -> LogoFile {
    LogoFile::new(name, vec![0x89, 0x50, 0x4e, 0x47])
        .expect("valid logo name")
        .with_content_type("image/png")
}

/// App + backend + live listener.
pub struct TestClient {
    pub app: App,
    pub backend: InMemoryBackend,
    pub state: watch::Receiver<AuthState>,
    listener: Option<WorkflowHandle>,
}

impl TestClient {
    /// Build the stack without starting the listener.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let (app, backend) = App::in_memory(config);
        let state = app.session.watch();
        Self {
            app,
            backend,
            state,
            listener: None,
        }
    }

    /// Build the stack, start the listener and wait for the initial
    /// session check.
    pub async fn started() -> Self {
        let mut client = Self::new();
        client.start();
        client
            .wait_for("initial session check", |s| !s.loading_initial_session)
            .await;
        client
    }

    pub fn start(&mut self) {
        self.listener = Some(self.app.start());
    }

    pub fn workflow(&self) -> &SessionWorkflow {
        &self.app.session
    }

    pub fn snapshot(&self) -> AuthState {
        self.app.session.snapshot()
    }

    /// Wait until `predicate` holds and return that state.
    pub async fn wait_for(
        &mut self,
        what: &str,
        predicate: impl FnMut(&AuthState) -> bool,
    ) -> AuthState {
        let state = tokio::time::timeout(WAIT, self.state.wait_for(predicate))
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for {what}"))
            .expect("workflow state channel closed");
        state.clone()
    }

    /// Wait for a signed-in session and return its identity.
    pub async fn wait_for_session(&mut self) -> UserId {
        let state = self.wait_for("session", |s| s.session.is_some()).await;
        state
            .session
            .map(|s| s.user_id)
            .expect("session present after wait")
    }

    /// Wait for the listener to observe a sign-out.
    pub async fn wait_for_signed_out(&mut self) -> AuthState {
        self.wait_for("sign-out", |s| {
            !s.loading_initial_session && s.session.is_none()
        })
        .await
    }
}

//! Application state and composition.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::infrastructure::memory::InMemoryBackend;
use crate::infrastructure::ports::{BlobStore, CredentialStore, ProfileStore};
use crate::use_cases::session::{SessionWorkflow, WorkflowHandle, WorkflowSettings};
use crate::view::{select_view, View};

/// Port implementations injected into the use cases.
#[derive(Clone)]
pub struct Ports {
    pub credentials: Arc<dyn CredentialStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl From<&InMemoryBackend> for Ports {
    fn from(backend: &InMemoryBackend) -> Self {
        Self {
            credentials: backend.credentials.clone(),
            profiles: backend.profiles.clone(),
            blobs: backend.blobs.clone(),
        }
    }
}

/// Main application state.
pub struct App {
    pub config: ClientConfig,
    pub ports: Ports,
    pub session: Arc<SessionWorkflow>,
}

impl App {
    pub fn new(ports: Ports, config: ClientConfig) -> Self {
        let session = Arc::new(SessionWorkflow::new(
            ports.credentials.clone(),
            ports.profiles.clone(),
            ports.blobs.clone(),
            WorkflowSettings::from(&config),
        ));
        Self {
            config,
            ports,
            session,
        }
    }

    /// App wired to fresh in-memory adapters. The backend is returned so
    /// callers can seed or inspect it.
    pub fn in_memory(config: ClientConfig) -> (Self, InMemoryBackend) {
        let backend = InMemoryBackend::new(&config);
        let app = Self::new(Ports::from(&backend), config);
        (app, backend)
    }

    /// Subscribe the session workflow to the credential store.
    pub fn start(&self) -> WorkflowHandle {
        tracing::debug!("Starting session listener");
        self.session.listen()
    }

    /// The view for the current state.
    pub fn view(&self) -> View {
        select_view(&self.session.snapshot())
    }
}

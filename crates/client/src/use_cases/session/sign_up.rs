//! Account registration and profile bootstrap.
//!
//! A sign-up is three ordered steps: create the account, build and persist
//! its profile document (uploading the logo first when one is supplied),
//! then publish the profile locally. The local role is never set before the
//! document write is acknowledged.

use rolegate_domain::{LogoFile, Profile, ProfileDocument, Role, UserId};

use super::error::WorkflowError;
use super::state::AuthState;
use super::workflow::{sign_up_field, SessionWorkflow};

/// Input to [`SessionWorkflow::sign_up`].
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Company name for admins, student name for students.
    pub name: Option<String>,
    pub logo: Option<LogoFile>,
}

impl SignUpRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
            name: None,
            logo: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_logo(mut self, logo: LogoFile) -> Self {
        self.logo = Some(logo);
        self
    }
}

impl SessionWorkflow {
    /// Create an account and its role-tagged profile.
    ///
    /// If registration succeeds but the upload or the document write fails,
    /// the account is left in place without a profile and the failure is
    /// surfaced in `general_error`.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Profile, WorkflowError> {
        let _guard = self.begin()?;
        self.state.send_modify(AuthState::clear_errors);

        let SignUpRequest {
            email,
            password,
            role,
            name,
            logo,
        } = request;

        let registered = self
            .bounded("register", self.credentials.register(&email, &password))
            .await;
        let session = match registered {
            Ok(Ok(session)) => session,
            Ok(Err(err)) => {
                self.report_credential_error(&err, sign_up_field(err.kind));
                return Err(err.into());
            }
            Err(err) => {
                self.report_failure(&err);
                return Err(err);
            }
        };

        let epoch = self.sign_out_epoch();
        let user_id = session.user_id;
        tracing::info!(user_id = %user_id, role = %role, "Account created");

        match self
            .bootstrap_profile(&user_id, role, name, logo.as_ref())
            .await
        {
            Ok(profile) => {
                self.adopt_profile(profile.clone(), epoch);
                Ok(profile)
            }
            Err(err) => {
                tracing::error!(user_id = %user_id, "Account exists without a profile");
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn bootstrap_profile(
        &self,
        user_id: &UserId,
        role: Role,
        name: Option<String>,
        logo: Option<&LogoFile>,
    ) -> Result<Profile, WorkflowError> {
        let logo_url = match logo {
            Some(file) => Some(self.upload(file).await?),
            None => None,
        };

        let document = ProfileDocument::new(role, name, logo_url);
        self.write_profile(user_id, &document).await?;
        Ok(Profile::from_document(user_id.clone(), document))
    }

    /// Blob path for an uploaded logo: `<prefix>/<file name>`.
    pub fn logo_path(&self, file: &LogoFile) -> String {
        let prefix = self.settings.logo_prefix.trim_matches('/');
        if prefix.is_empty() {
            file.name().to_string()
        } else {
            format!("{}/{}", prefix, file.name())
        }
    }

    pub(super) async fn upload(&self, file: &LogoFile) -> Result<String, WorkflowError> {
        let path = self.logo_path(file);
        tracing::debug!(path = %path, bytes = file.len(), "Uploading logo");
        self.bounded("blob.upload", self.blobs.upload(&path, file))
            .await?
            .map_err(|source| WorkflowError::Upload { path, source })
    }

    pub(super) async fn write_profile(
        &self,
        user_id: &UserId,
        document: &ProfileDocument,
    ) -> Result<(), WorkflowError> {
        self.bounded("profile.set", self.profiles.set(user_id, document))
            .await?
            .map_err(WorkflowError::ProfileWrite)?;
        tracing::debug!(user_id = %user_id, role = %document.role(), "Profile written");
        Ok(())
    }

    /// Publish a freshly written profile.
    ///
    /// Skipped when another identity holds the session, or when the session
    /// is gone because a sign-out was observed after `epoch` was captured.
    pub(super) fn adopt_profile(&self, profile: Profile, epoch: u64) {
        self.state.send_modify(|s| {
            let publish = match &s.session {
                Some(current) => profile.belongs_to(&current.user_id),
                None => self.sign_out_epoch() == epoch,
            };
            if publish {
                s.profile = Some(profile);
            } else {
                tracing::debug!(user_id = %profile.user_id, "Not publishing profile for an ended or replaced session");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use futures_util::FutureExt;
    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::ports::{
        CredentialError, CredentialErrorKind, MockBlobStore, MockCredentialStore,
        MockProfileStore, StoreError,
    };
    use crate::use_cases::session::WorkflowSettings;
    use rolegate_domain::{Email, Session};

    fn session(uid: &str) -> Session {
        Session::new(
            UserId::new(uid).unwrap(),
            Email::new(format!("{uid}@x.com")).unwrap(),
            Utc::now(),
        )
    }

    fn registering(uid: &'static str) -> MockCredentialStore {
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_register()
            .times(1)
            .returning(move |_, _| Ok(session(uid)));
        credentials
    }

    fn workflow(
        credentials: MockCredentialStore,
        profiles: MockProfileStore,
        blobs: MockBlobStore,
    ) -> SessionWorkflow {
        SessionWorkflow::new(
            Arc::new(credentials),
            Arc::new(profiles),
            Arc::new(blobs),
            WorkflowSettings::default(),
        )
    }

    fn logo() -> LogoFile {
        LogoFile::new("acme.png", vec![1, 2, 3]).unwrap()
    }

    #[tokio::test]
    async fn admin_sign_up_uploads_then_writes_company_document() {
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_upload()
            .withf(|path, file| path == "logos/acme.png" && file.bytes() == [1, 2, 3])
            .times(1)
            .returning(|path, _| Ok(format!("memory://{path}")));

        let mut profiles = MockProfileStore::new();
        profiles
            .expect_set()
            .with(
                eq(UserId::new("uid-1").unwrap()),
                eq(ProfileDocument::new(
                    Role::Admin,
                    Some("Acme".into()),
                    Some("memory://logos/acme.png".into()),
                )),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let wf = workflow(registering("uid-1"), profiles, blobs);
        let request = SignUpRequest::new("a@x.com", "pw123456", Role::Admin)
            .with_name("Acme")
            .with_logo(logo());

        let profile = wf.sign_up(request).await.unwrap();

        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.logo_url.as_deref(), Some("memory://logos/acme.png"));
        assert_eq!(wf.snapshot().role(), Some(Role::Admin));
        assert!(!wf.snapshot().in_flight);
    }

    #[tokio::test]
    async fn student_sign_up_without_logo_skips_upload() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_set()
            .withf(|_, doc| *doc == ProfileDocument::new(Role::Student, Some("Ann".into()), None))
            .times(1)
            .returning(|_, _| Ok(()));

        // No upload expectation: calling it would panic.
        let wf = workflow(registering("uid-2"), profiles, MockBlobStore::new());
        let request = SignUpRequest::new("ann@x.com", "pw123456", Role::Student).with_name("Ann");

        let profile = wf.sign_up(request).await.unwrap();

        assert_eq!(profile.role, Role::Student);
        assert_eq!(profile.logo_url, None);
    }

    #[tokio::test]
    async fn role_is_not_published_before_write_is_acknowledged() {
        let observed = Arc::new(Mutex::new(None));
        let wf = Arc::new_cyclic(|weak: &std::sync::Weak<SessionWorkflow>| {
            let weak = weak.clone();
            let observed = Arc::clone(&observed);
            let mut profiles = MockProfileStore::new();
            profiles.expect_set().times(1).returning(move |_, _| {
                if let Some(wf) = weak.upgrade() {
                    *observed.lock().unwrap() = Some(wf.snapshot().role());
                }
                Ok(())
            });
            workflow(registering("uid-3"), profiles, MockBlobStore::new())
        });

        wf.sign_up(SignUpRequest::new("c@x.com", "pw123456", Role::Admin))
            .await
            .unwrap();

        // During the write the role was still unset.
        assert_eq!(*observed.lock().unwrap(), Some(None));
        assert_eq!(wf.snapshot().role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn registration_failure_maps_to_fields_and_skips_bootstrap() {
        for (kind, email_slot) in [
            (CredentialErrorKind::EmailAlreadyInUse, true),
            (CredentialErrorKind::InvalidEmail, true),
            (CredentialErrorKind::WeakPassword, false),
        ] {
            let mut credentials = MockCredentialStore::new();
            credentials
                .expect_register()
                .returning(move |_, _| Err(CredentialError::new(kind, "rejected")));
            let wf = workflow(credentials, MockProfileStore::new(), MockBlobStore::new());

            let result = wf
                .sign_up(SignUpRequest::new("a@x.com", "pw", Role::Student).with_logo(logo()))
                .await;

            assert!(matches!(result, Err(WorkflowError::Credential(_))));
            let state = wf.snapshot();
            if email_slot {
                assert_eq!(state.email_error, "rejected");
                assert!(state.password_error.is_empty());
            } else {
                assert_eq!(state.password_error, "rejected");
                assert!(state.email_error.is_empty());
            }
            assert_eq!(state.role(), None);
        }
    }

    #[tokio::test]
    async fn sign_up_clears_stale_errors_before_registering() {
        let observed = Arc::new(Mutex::new(None));
        let wf = Arc::new_cyclic(|weak: &std::sync::Weak<SessionWorkflow>| {
            let weak = weak.clone();
            let observed = Arc::clone(&observed);
            let mut credentials = MockCredentialStore::new();
            credentials.expect_register().times(1).returning(move |_, _| {
                if let Some(wf) = weak.upgrade() {
                    let state = wf.snapshot();
                    *observed.lock().unwrap() = Some((
                        state.email_error,
                        state.password_error,
                        state.general_error,
                    ));
                }
                Err(CredentialError::new(CredentialErrorKind::Other, "offline"))
            });
            workflow(credentials, MockProfileStore::new(), MockBlobStore::new())
        });
        wf.state.send_modify(|s| {
            s.email_error = "stale email".into();
            s.password_error = "stale password".into();
            s.general_error = "stale general".into();
        });

        let result = wf
            .sign_up(SignUpRequest::new("a@x.com", "pw123456", Role::Admin))
            .await;

        assert!(matches!(result, Err(WorkflowError::Credential(_))));
        assert_eq!(
            *observed.lock().unwrap(),
            Some((String::new(), String::new(), String::new()))
        );
    }

    #[tokio::test]
    async fn sign_out_during_profile_write_leaves_no_role() {
        let wf = Arc::new_cyclic(|weak: &std::sync::Weak<SessionWorkflow>| {
            let weak = weak.clone();
            let mut profiles = MockProfileStore::new();
            profiles.expect_set().times(1).returning(move |_, _| {
                // The listener sees the new session, then a sign-out,
                // before the write is acknowledged.
                if let Some(wf) = weak.upgrade() {
                    wf.state.send_modify(|s| s.session = Some(session("uid-7")));
                    wf.on_session_change(None)
                        .now_or_never()
                        .expect("sign-out handling does not suspend");
                }
                Ok(())
            });
            workflow(registering("uid-7"), profiles, MockBlobStore::new())
        });

        let profile = wf
            .sign_up(SignUpRequest::new("g@x.com", "pw123456", Role::Admin))
            .await
            .unwrap();

        assert_eq!(profile.role, Role::Admin);
        let state = wf.snapshot();
        assert!(state.session.is_none());
        assert_eq!(state.role(), None);
        assert_eq!(state.role_label(), "");
    }

    #[tokio::test]
    async fn profile_is_published_before_session_is_observed() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_set().returning(|_, _| Ok(()));
        let wf = workflow(registering("uid-8"), profiles, MockBlobStore::new());

        wf.sign_up(SignUpRequest::new("h@x.com", "pw123456", Role::Student))
            .await
            .unwrap();

        // No sign-out since registration, so the listener has simply not
        // caught up yet.
        assert_eq!(wf.snapshot().role(), Some(Role::Student));
    }

    #[tokio::test]
    async fn upload_failure_leaves_account_without_profile() {
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_upload()
            .returning(|_, _| Err(StoreError::backend("blob.upload", "quota exceeded")));

        // The document write must not happen after a failed upload.
        let wf = workflow(registering("uid-4"), MockProfileStore::new(), blobs);
        let result = wf
            .sign_up(SignUpRequest::new("d@x.com", "pw123456", Role::Admin).with_logo(logo()))
            .await;

        assert!(matches!(result, Err(WorkflowError::Upload { ref path, .. }) if path == "logos/acme.png"));
        let state = wf.snapshot();
        assert_eq!(state.role(), None);
        assert_eq!(state.general_error, "The logo could not be uploaded.");
        assert!(!state.in_flight);
    }

    #[tokio::test]
    async fn write_failure_is_surfaced() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_set()
            .returning(|_, _| Err(StoreError::PermissionDenied("rules".into())));
        let wf = workflow(registering("uid-5"), profiles, MockBlobStore::new());

        let result = wf
            .sign_up(SignUpRequest::new("e@x.com", "pw123456", Role::Student))
            .await;

        assert!(matches!(result, Err(WorkflowError::ProfileWrite(_))));
        assert_eq!(wf.snapshot().general_error, "Your profile could not be saved.");
        assert_eq!(wf.snapshot().role(), None);
    }

    #[tokio::test]
    async fn profile_for_replaced_session_is_not_published() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_set().returning(|_, _| Ok(()));
        let wf = workflow(registering("uid-6"), profiles, MockBlobStore::new());
        wf.state.send_modify(|s| s.session = Some(session("someone-else")));

        let profile = wf
            .sign_up(SignUpRequest::new("f@x.com", "pw123456", Role::Admin))
            .await
            .unwrap();

        assert_eq!(profile.role, Role::Admin);
        assert_eq!(wf.snapshot().profile, None);
    }

    #[test]
    fn logo_path_joins_prefix_and_name() {
        let wf = workflow(
            MockCredentialStore::new(),
            MockProfileStore::new(),
            MockBlobStore::new(),
        );
        assert_eq!(wf.logo_path(&logo()), "logos/acme.png");
    }
}

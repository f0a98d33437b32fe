//! Logo replacement for an already signed-in account.

use rolegate_domain::{LogoFile, Profile};

use super::error::WorkflowError;
use super::state::AuthState;
use super::workflow::SessionWorkflow;

impl SessionWorkflow {
    /// Upload a new logo and point the current profile at it.
    ///
    /// Role and name are kept; only the role-specific logo key changes.
    pub async fn upload_logo(&self, file: LogoFile) -> Result<Profile, WorkflowError> {
        let _guard = self.begin()?;
        self.state.send_modify(AuthState::clear_errors);
        let epoch = self.sign_out_epoch();

        let current = {
            let state = self.state.borrow();
            match (&state.session, &state.profile) {
                (None, _) => Err(WorkflowError::NoSession),
                (Some(session), Some(profile)) if profile.belongs_to(&session.user_id) => {
                    Ok(profile.clone())
                }
                (Some(_), _) => Err(WorkflowError::NoProfile),
            }
        };
        let current = match current {
            Ok(profile) => profile,
            Err(err) => {
                self.report_failure(&err);
                return Err(err);
            }
        };

        let result = async {
            let url = self.upload(&file).await?;
            let document = current.to_document().with_logo(url);
            self.write_profile(&current.user_id, &document).await?;
            Ok::<_, WorkflowError>(Profile::from_document(current.user_id.clone(), document))
        }
        .await;

        match result {
            Ok(profile) => {
                tracing::info!(user_id = %profile.user_id, "Logo replaced");
                self.adopt_profile(profile.clone(), epoch);
                Ok(profile)
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }
}

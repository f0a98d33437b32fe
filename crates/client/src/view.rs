//! View selection.
//!
//! Maps the session workflow's snapshot to the screen that should be shown.
//! Rendering is left to whatever UI consumes [`View`].

use rolegate_domain::{Profile, Role};

use crate::use_cases::AuthState;

/// Profile data shown on a home view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    /// Company name for admins, student name for students
    pub name: Option<String>,
    /// Retrieval URL of the uploaded logo, if any
    pub logo_url: Option<String>,
}

impl From<&Profile> for ProfileCard {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            logo_url: profile.logo_url.clone(),
        }
    }
}

/// Sign-in / sign-up form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignInView {
    /// Sign-in mode when true, sign-up mode otherwise
    pub has_account: bool,
    pub email_error: String,
    pub password_error: String,
    pub general_error: String,
    /// Disable the submit button while a request is running
    pub submitting: bool,
}

/// The screen to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Waiting for the first session-change callback
    Loading,
    SignIn(SignInView),
    AdminHome(ProfileCard),
    StudentHome(ProfileCard),
    /// Signed in, but no profile document exists for the identity
    ProfileIncomplete,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::SignIn(_) => "sign_in",
            Self::AdminHome(_) => "admin_home",
            Self::StudentHome(_) => "student_home",
            Self::ProfileIncomplete => "profile_incomplete",
        }
    }
}

pub fn select_view(state: &AuthState) -> View {
    if state.loading_initial_session {
        return View::Loading;
    }

    if state.session.is_none() {
        return View::SignIn(SignInView {
            has_account: state.draft.has_account,
            email_error: state.email_error.clone(),
            password_error: state.password_error.clone(),
            general_error: state.general_error.clone(),
            submitting: state.in_flight,
        });
    }

    match &state.profile {
        Some(profile) => match profile.role {
            Role::Admin => View::AdminHome(ProfileCard::from(profile)),
            Role::Student => View::StudentHome(ProfileCard::from(profile)),
        },
        None => View::ProfileIncomplete,
    }
}

//! Session use case: sign-up, sign-in, sign-out, logo upload and session
//! restoration.

mod error;
mod logo;
mod sign_up;
mod state;
mod workflow;

pub use error::WorkflowError;
pub use sign_up::SignUpRequest;
pub use state::{AuthState, FormDraft};
pub use workflow::{
    sign_in_field, sign_up_field, ErrorField, SessionWorkflow, WorkflowHandle, WorkflowSettings,
};

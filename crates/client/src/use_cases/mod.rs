//! Use cases.

pub mod session;

pub use session::{AuthState, SessionWorkflow, SignUpRequest, WorkflowError, WorkflowHandle};

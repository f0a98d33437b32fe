//! Client E2E tests.
//!
//! These drive the session workflow through its public handlers with the
//! listener running, against the in-memory credential, profile and blob
//! stores. No external services are required.
//!
//! ```bash
//! cargo test -p rolegate-client --lib e2e_tests
//! ```

mod e2e_helpers;
mod session_lifecycle_tests;

pub use e2e_helpers::*;

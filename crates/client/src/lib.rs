//! RoleGate client library.
//!
//! Role-based account access: email/password authentication, a role-tagged
//! profile document, logo uploads and view selection by role.
//!
//! ## Structure
//!
//! - `infrastructure/` - Port traits and in-memory adapters
//! - `use_cases/` - The session bootstrap workflow
//! - `view` - Pure view selection over the workflow's snapshot
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;
pub mod view;

/// End-to-end tests against the in-memory backend.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
pub use config::ClientConfig;

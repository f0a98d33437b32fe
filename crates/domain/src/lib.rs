//! RoleGate domain types.
//!
//! Pure value objects and entities for role-based account access. Nothing in
//! this crate performs I/O; the client crate wires these types to the
//! credential, profile and blob stores.

extern crate self as rolegate_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{LogoFile, Profile, ProfileDocument, Session};
pub use error::DomainError;
pub use ids::UserId;
pub use value_objects::{Email, Role};

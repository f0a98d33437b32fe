//! Common utility functions shared by the domain and client crates.
//!
//! Pure functions only - no side effects, no I/O.

pub mod string;

pub use string::{non_blank, StringExt};

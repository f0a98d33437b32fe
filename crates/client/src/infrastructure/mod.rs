//! Infrastructure: port traits and the in-memory adapters.

pub mod memory;
pub mod ports;

//! Value objects: validated, immutable building blocks.

mod email;
mod role;

pub use email::Email;
pub use role::Role;

//! Domain entities.

mod logo;
mod profile;
mod session;

pub use logo::LogoFile;
pub use profile::{Profile, ProfileDocument};
pub use session::Session;

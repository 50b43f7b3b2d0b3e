//! Credential models used to authenticate every request.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;

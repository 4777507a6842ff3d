//! OAuth 1.0 credential models and secret handling.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;

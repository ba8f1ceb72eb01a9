//! Credential handling: redacted secrets and method precedence.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;

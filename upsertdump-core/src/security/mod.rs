//! Credential protection.
//!
//! Passwords are kept in `Zeroizing` containers and redacted from debug
//! output. Nothing in this crate logs or formats a password.

mod credentials;

pub use credentials::Credentials;

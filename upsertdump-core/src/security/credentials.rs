//! Secure credential container with automatic memory zeroing.
//!
//! # Security
//! - The password is stored in a `Zeroizing` container
//! - Memory is cleared when the credentials go out of scope
//! - The password never appears in debug output or logs

use std::fmt;
use zeroize::Zeroizing;

/// Connection password, zeroed on drop.
///
/// # Example
///
/// ```rust
/// use upsertdump_core::security::Credentials;
///
/// let creds = Credentials::new(Some("secret".to_string()));
/// assert!(creds.has_password());
/// assert!(!format!("{:?}", creds).contains("secret"));
/// ```
#[derive(Clone, Default)]
pub struct Credentials {
    password: Zeroizing<Option<String>>,
}

impl Credentials {
    /// Creates credentials; an empty password counts as no password.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: Zeroizing::new(password.filter(|p| !p.is_empty())),
        }
    }

    /// Checks if a password is present without exposing it.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Borrows the password for handing to the driver.
    pub(crate) fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &self.has_password().then_some("****"))
            .finish()
    }
}

//! Dashboard login port.
//!
//! There is exactly one admin credential pair and no token model: a
//! successful check is all the boundary learns.

/// Checks a submitted email/password pair against the configured admin.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Result<(), AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Dashboard credentials are not configured")]
    NotConfigured,
}

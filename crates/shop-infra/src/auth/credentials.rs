//! The single dashboard credential pair.

use shop_core::ports::{AuthError, CredentialVerifier};

/// Compares submitted credentials against the configured admin pair
/// (`DASHBOARD_EMAIL` / `DASHBOARD_PASSWORD`). No session or token is issued.
pub struct EnvCredentialVerifier {
    email: Option<String>,
    password: Option<String>,
}

impl EnvCredentialVerifier {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            email: non_empty(email),
            password: non_empty(password),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }
}

impl CredentialVerifier for EnvCredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let (Some(expected_email), Some(expected_password)) = (&self.email, &self.password) else {
            tracing::warn!("Login attempted but dashboard credentials are not configured");
            return Err(AuthError::NotConfigured);
        };

        // Both comparisons always run.
        let email_ok = constant_time_eq(email.trim().as_bytes(), expected_email.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), expected_password.as_bytes());

        if email_ok & password_ok {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

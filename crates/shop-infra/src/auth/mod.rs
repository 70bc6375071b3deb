//! Authentication implementations.

mod credentials;

pub use credentials::EnvCredentialVerifier;

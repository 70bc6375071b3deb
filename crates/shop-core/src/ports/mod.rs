//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod backup;
mod image;
mod rate_limit;
mod repository;

pub use auth::{AuthError, CredentialVerifier};
pub use backup::BackupStore;
pub use image::ImageStore;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::PostRepository;

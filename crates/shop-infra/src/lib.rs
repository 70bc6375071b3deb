//! # Shop Infrastructure
//!
//! Concrete implementations of the ports defined in `shop-core`.
//! Posts, backups and images all live on the local filesystem.
//!
//! ## Feature Flags
//!
//! - `rate-limit` (default) - login throttling via governor

pub mod auth;
pub mod storage;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::EnvCredentialVerifier;
pub use storage::{FsBackupManager, FsImageStore, JsonFileStore, JsonPostRepository, StorageConfig};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

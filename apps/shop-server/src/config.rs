//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use shop_infra::{RateLimitConfig, StorageConfig};

/// Page size of the admin listing when the dashboard paginates.
pub const POSTS_PER_PAGE: usize = 10;
/// Page size of the public feed.
pub const HOMEPAGE_POSTS_PER_LOAD: usize = 20;
/// Maximum hits returned by the public search.
pub const SEARCH_RESULT_LIMIT: usize = 10;
/// Default upload cap for images (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub dashboard_email: Option<String>,
    pub dashboard_password: Option<String>,
    pub max_image_bytes: usize,
    pub login_rate_limit: RateLimitConfig,
    /// Key login throttling on `Forwarded`/`X-Forwarded-For`. Only safe
    /// behind a proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            dashboard_email: None,
            dashboard_password: None,
            max_image_bytes: MAX_IMAGE_BYTES,
            login_rate_limit: RateLimitConfig::default(),
            trust_proxy_headers: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            dashboard_email: env::var("DASHBOARD_EMAIL").ok(),
            dashboard_password: env::var("DASHBOARD_PASSWORD").ok(),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            login_rate_limit: RateLimitConfig::from_env(),
            trust_proxy_headers: env::var("TRUST_PROXY_HEADERS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.trust_proxy_headers),
        }
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone(), self.public_dir.clone())
    }

    /// Directory served under `/images`.
    pub fn images_root(&self) -> PathBuf {
        self.public_dir.join("images")
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use shop_core::StoreError;
use shop_core::ports::{BackupStore, CredentialVerifier, ImageStore, PostRepository, RateLimiter};
use shop_infra::{
    EnvCredentialVerifier, FsBackupManager, FsImageStore, InMemoryRateLimiter, JsonFileStore,
    JsonPostRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub backups: Arc<dyn BackupStore>,
    pub images: Arc<dyn ImageStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub login_limiter: Arc<dyn RateLimiter>,
    pub max_image_bytes: usize,
    pub trust_proxy_headers: bool,
}

impl AppState {
    /// Build the filesystem-backed state and make sure the posts document exists.
    pub async fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let storage = config.storage();
        let store = Arc::new(JsonFileStore::new(storage.clone()));
        store.initialize().await?;

        let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(&storage));
        let posts = Arc::new(JsonPostRepository::new(store.clone(), images.clone()));
        let backups = Arc::new(FsBackupManager::new(store.clone()));

        let credentials = EnvCredentialVerifier::new(
            config.dashboard_email.clone(),
            config.dashboard_password.clone(),
        );
        if !credentials.is_configured() {
            tracing::warn!(
                "DASHBOARD_EMAIL / DASHBOARD_PASSWORD not set. Dashboard login is disabled."
            );
        }

        tracing::info!(
            posts_file = %store.posts_file().display(),
            "Application state initialized"
        );

        Ok(Self {
            posts,
            backups,
            images,
            credentials: Arc::new(credentials),
            login_limiter: Arc::new(InMemoryRateLimiter::new(config.login_rate_limit.clone())),
            max_image_bytes: config.max_image_bytes,
            trust_proxy_headers: config.trust_proxy_headers,
        })
    }
}

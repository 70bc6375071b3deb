//! Image storage port.

use async_trait::async_trait;

use crate::error::StoreError;

/// Stores uploaded post images under a publicly served directory.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a freshly generated unique name and return the
    /// root-relative URL path it is served from.
    async fn save_image(
        &self,
        bytes: &[u8],
        original_filename: &str,
        content_type: Option<&str>,
    ) -> Result<String, StoreError>;

    /// Remove the file named by the last segment of `path`.
    /// Returns `false` when nothing was removed; never fails.
    async fn delete_image(&self, path: &str) -> bool;
}

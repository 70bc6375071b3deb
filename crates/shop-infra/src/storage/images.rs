//! Uploaded post images.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use shop_core::StoreError;
use shop_core::ports::ImageStore;

use super::{IMAGES_URL_PREFIX, StorageConfig};

/// Writes images into the public images directory under generated names.
pub struct FsImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl FsImageStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.images_dir(),
            url_prefix: IMAGES_URL_PREFIX.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// `<millis>-<random><.ext>`
fn generate_filename(original_filename: &str, content_type: Option<&str>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let extension = extension_from_name(original_filename)
        .or_else(|| content_type.and_then(extension_from_mime))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        &random[..8],
        extension
    )
}

fn extension_from_name(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
}

fn extension_from_mime(mime: &str) -> Option<String> {
    let ext = match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => return None,
    };
    Some(ext.to_string())
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save_image(
        &self,
        bytes: &[u8],
        original_filename: &str,
        content_type: Option<&str>,
    ) -> Result<String, StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = generate_filename(original_filename, content_type);
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Stored image");
        Ok(format!("{}/{}", self.url_prefix, filename))
    }

    async fn delete_image(&self, path: &str) -> bool {
        let Some(filename) = path
            .rsplit('/')
            .next()
            .filter(|f| !f.is_empty() && *f != "." && *f != ".." && !f.contains('\\'))
        else {
            return false;
        };

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => {
                tracing::debug!(filename = %filename, "Deleted image");
                true
            }
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "Could not delete image");
                false
            }
        }
    }
}

//! The posts document on disk.

use std::path::{Path, PathBuf};

use shop_core::StoreError;
use shop_core::domain::{Post, PostsData};

use super::StorageConfig;

/// Owns the single posts JSON file and the directories around it.
///
/// Every read goes to disk and every write replaces the whole file. There is
/// no locking: two requests that read-modify-write concurrently race, and the
/// last writer wins. This is accepted for a single-admin dashboard.
pub struct JsonFileStore {
    config: StorageConfig,
}

impl JsonFileStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn posts_file(&self) -> PathBuf {
        self.config.posts_file()
    }

    /// Create the data, backups and images directories. Failures are logged;
    /// the operation that needs the directory reports its own error later.
    pub async fn ensure_directories(&self) {
        for dir in [
            self.config.data_dir.clone(),
            self.config.backups_dir(),
            self.config.images_dir(),
        ] {
            if let Err(e) = tokio::fs::create_dir_all(&dir).await {
                tracing::error!(path = %dir.display(), error = %e, "Failed to create directory");
            }
        }
    }

    /// Make sure the posts document exists, writing an empty one if absent.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.ensure_directories().await;

        let path = self.posts_file();
        if !tokio::fs::try_exists(&path).await? {
            tracing::info!(path = %path.display(), "Creating empty posts document");
            let empty = serde_json::to_vec_pretty(&PostsData::empty())?;
            write_atomic(&path, &empty).await?;
        }
        Ok(())
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<PostsData, StoreError> {
        let bytes = self.read_raw().await?;
        let data: PostsData = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(error = %e, "Posts document failed to parse");
            StoreError::from(e)
        })?;

        tracing::debug!(posts = data.posts.len(), "Loaded posts document");
        Ok(data)
    }

    pub async fn load_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.load().await?.posts)
    }

    /// Serialize `posts` and replace the document in full.
    pub async fn save(&self, posts: Vec<Post>) -> Result<(), StoreError> {
        let count = posts.len();
        let bytes = serde_json::to_vec_pretty(&PostsData::new(posts))?;
        self.replace_raw(&bytes).await?;

        tracing::debug!(posts = count, "Saved posts document");
        Ok(())
    }

    /// The document exactly as stored.
    pub async fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        self.initialize().await?;
        Ok(tokio::fs::read(self.posts_file()).await?)
    }

    /// Replace the document with `bytes` verbatim.
    pub async fn replace_raw(&self, bytes: &[u8]) -> Result<(), StoreError> {
        self.ensure_directories().await;
        write_atomic(&self.posts_file(), bytes).await
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidName(path.display().to_string()))?;
    let tmp_path =
        path.with_file_name(format!("{file_name}.{}.tmp", uuid::Uuid::new_v4().simple()));

    tokio::fs::write(&tmp_path, bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

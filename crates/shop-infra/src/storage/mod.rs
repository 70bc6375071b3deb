//! Filesystem storage: the posts document, its backups and uploaded images.
//!
//! Layout under the configured roots:
//!
//! ```text
//! <data_dir>/posts.json
//! <data_dir>/backups/*.json
//! <public_dir>/images/posts/*
//! ```

mod backups;
mod file_store;
mod images;
mod post_repo;

use std::path::PathBuf;

pub use backups::FsBackupManager;
pub use file_store::JsonFileStore;
pub use images::FsImageStore;
pub use post_repo::JsonPostRepository;

/// URL path under which stored images are served.
pub const IMAGES_URL_PREFIX: &str = "/images/posts";

/// Where the dashboard keeps its files.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    pub fn posts_file(&self) -> PathBuf {
        self.data_dir.join("posts.json")
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.data_dir.join("backups")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join("images").join("posts")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("data", "public")
    }
}

//! Backup manager over the backups directory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use shop_core::StoreError;
use shop_core::domain::{Backup, backup_timestamp, validate_backup_name};
use shop_core::ports::BackupStore;

use super::JsonFileStore;

/// Suffixes tried before giving up on a free backup name.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Keeps timestamped copies of the posts document as files.
pub struct FsBackupManager {
    store: Arc<JsonFileStore>,
    dir: PathBuf,
}

impl FsBackupManager {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        let dir = store.config().backups_dir();
        Self { store, dir }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_backup_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Write `bytes` to a new `<prefix>-<stamp>.json`, falling back to
    /// `<prefix>-<stamp>-<n>.json` while the name is taken. Never overwrites.
    async fn write_new(
        &self,
        prefix: &str,
        stamp: &str,
        bytes: &[u8],
    ) -> Result<String, StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = match attempt {
                0 => format!("{prefix}-{stamp}.json"),
                n => format!("{prefix}-{stamp}-{n}.json"),
            };

            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(bytes).await?;
                    file.flush().await?;
                    return Ok(name);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::Io(format!("no free backup name for {prefix}-{stamp}")))
    }
}

#[async_trait]
impl BackupStore for FsBackupManager {
    async fn create_backup(&self) -> Result<String, StoreError> {
        let snapshot = self.store.read_raw().await?;
        let stamp = backup_timestamp(Utc::now());
        let name = self.write_new("backup", &stamp, &snapshot).await?;

        tracing::info!(backup = %name, size = snapshot.len(), "Created backup");
        Ok(name)
    }

    async fn list_backups(&self) -> Result<Vec<Backup>, StoreError> {
        self.store.ensure_directories().await;

        let mut backups = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            backups.push(Backup {
                name: entry.file_name().to_string_lossy().into_owned(),
                date: DateTime::<Utc>::from(metadata.modified()?),
                size: metadata.len(),
            });
        }

        backups.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.name.cmp(&a.name)));
        Ok(backups)
    }

    async fn restore_backup(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.path_for(name)?;

        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(backup = %name, "Backup to restore does not exist");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        self.store.replace_raw(&content).await?;
        tracing::info!(backup = %name, "Restored backup");
        Ok(true)
    }

    async fn delete_backup(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.path_for(name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(backup = %name, "Deleted backup");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_backup_file(
        &self,
        content: &str,
        name: Option<&str>,
    ) -> Result<String, StoreError> {
        let name = match name {
            Some(name) => {
                let path = self.path_for(name)?;
                tokio::fs::create_dir_all(&self.dir).await?;
                tokio::fs::write(&path, content).await?;
                name.to_string()
            }
            None => {
                let stamp = backup_timestamp(Utc::now());
                self.write_new("imported", &stamp, content.as_bytes()).await?
            }
        };

        tracing::info!(backup = %name, size = content.len(), "Saved uploaded backup");
        Ok(name)
    }

    async fn read_backup(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(name)?;

        let real_path = tokio::fs::canonicalize(&path).await?;
        let real_dir = tokio::fs::canonicalize(&self.dir).await?;
        if !real_path.starts_with(&real_dir) {
            tracing::warn!(backup = %name, "Backup path resolves outside the backups directory");
            return Err(StoreError::OutsideBackupDir);
        }

        Ok(tokio::fs::read(&real_path).await?)
    }
}

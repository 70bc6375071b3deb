//! Backup port - snapshots of the posts document.

use async_trait::async_trait;

use crate::domain::Backup;
use crate::error::StoreError;

/// Backup manager trait.
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Copy the live posts document verbatim into a new timestamped backup.
    async fn create_backup(&self) -> Result<String, StoreError>;

    /// All backups, most recently modified first.
    async fn list_backups(&self) -> Result<Vec<Backup>, StoreError>;

    /// Overwrite the live document with an existing backup.
    /// `Ok(false)` if no such backup exists.
    async fn restore_backup(&self, name: &str) -> Result<bool, StoreError>;

    /// `Ok(false)` if no such backup exists.
    async fn delete_backup(&self, name: &str) -> Result<bool, StoreError>;

    /// Store externally supplied content as a new backup file. Without a name
    /// it is called `imported-<timestamp>.json`.
    async fn save_backup_file(&self, content: &str, name: Option<&str>)
    -> Result<String, StoreError>;

    /// Raw bytes of a backup, only if it resolves inside the backups directory.
    async fn read_backup(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Save uploaded content as a backup, then make it live.
    async fn import_upload(&self, content: &str) -> Result<String, StoreError> {
        let name = self.save_backup_file(content, None).await?;
        if self.restore_backup(&name).await? {
            Ok(name)
        } else {
            Err(StoreError::NotFound)
        }
    }
}

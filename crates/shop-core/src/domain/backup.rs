use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Metadata of a backup file on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub name: String,
    /// Last modification time of the file.
    pub date: DateTime<Utc>,
    /// File size in bytes.
    pub size: u64,
}

/// Turn an instant into the file-name friendly stamp used for backup names,
/// e.g. `2024-04-05T19-34-38-901Z`.
pub fn backup_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Reject names that could address anything outside the backups directory.
pub fn validate_backup_name(name: &str) -> Result<(), StoreError> {
    let unsafe_name = name.trim().is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if unsafe_name {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id: id.into(),
        }
    }

    pub fn backup_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            id: name.into(),
        }
    }
}

/// Storage-level errors.
///
/// Every disk-touching operation reports failures through this type, so a
/// caller can always tell an empty collection from one that failed to load.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Stored document is unreadable: {0}")]
    Corrupt(String),

    #[error("Entry not found")]
    NotFound,

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Path escapes the backups directory")]
    OutsideBackupDir,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

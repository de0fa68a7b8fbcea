//! Storage module for persisting audit reports
//!
//! This module handles all database operations for the scanner, including:
//! - SQLite database initialization and schema management
//! - Report lifecycle and progress tracking
//! - Per-unit page results written as the scan proceeds
//! - The final aggregate written once on completion

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{ScanStore, StorageError, StorageResult};

use crate::state::ReportStatus;
use crate::AuditError;

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(AuditError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, AuditError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(StorageError::from)?;
        }
    }
    Ok(SqliteStorage::new(path)?)
}

/// Represents a report row in the database
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub report_id: String,
    pub website_url: String,
    pub page_budget: usize,
    pub status: ReportStatus,
    pub progress: u8,
    pub config_hash: String,
    pub error_message: Option<String>,
    pub created_at: String,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_storage_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("nested").join("audit.db");

        let storage = open_storage(&path).unwrap();
        assert!(path.exists());
        assert_eq!(storage.count_scanned_pages().unwrap(), 0);

        // Reopening an existing database keeps it usable
        drop(storage);
        assert!(open_storage(&path).is_ok());
    }

    #[test]
    fn test_open_storage_reports_unwritable_parent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let result = open_storage(&blocker.join("audit.db"));
        assert!(matches!(
            result,
            Err(AuditError::Storage(StorageError::Io(_)))
        ));
    }
}

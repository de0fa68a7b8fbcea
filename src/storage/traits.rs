//! Storage traits and error types
//!
//! This module defines the persistence interface the scan pipeline writes
//! through and its associated error type.

use crate::model::{PageScanResult, ScanRequest, ScanResult};
use crate::state::ReportStatus;
use crate::storage::ReportRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Report already exists: {0}")]
    DuplicateReport(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: ReportStatus, to: ReportStatus },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence collaborator for audit reports
///
/// The pipeline writes one row per completed page/device unit as it goes and
/// the full aggregate exactly once at the end.
pub trait ScanStore {
    // ===== Report Management =====

    /// Creates a pending report for a scan request
    ///
    /// # Arguments
    ///
    /// * `request` - The validated scan request
    /// * `config_hash` - Hash of the configuration the scan runs under
    fn create_report(&mut self, request: &ScanRequest, config_hash: &str) -> StorageResult<()>;

    /// Gets a report by id
    fn get_report(&self, report_id: &str) -> StorageResult<Option<ReportRecord>>;

    /// Lists all reports, newest first
    fn list_reports(&self) -> StorageResult<Vec<ReportRecord>>;

    /// Moves a report to a new status
    ///
    /// Fails with `InvalidTransition` if the move is not a legal lifecycle step.
    fn update_status(&mut self, report_id: &str, status: ReportStatus) -> StorageResult<()>;

    /// Marks a report failed with a reason
    fn fail_report(&mut self, report_id: &str, reason: &str) -> StorageResult<()>;

    /// Records scan progress; the stored value never decreases
    fn update_progress(&mut self, report_id: &str, percent: u8) -> StorageResult<()>;

    /// Returns a finished report to `Pending` with zero progress and no page rows
    fn reset_for_rescan(&mut self, report_id: &str) -> StorageResult<()>;

    // ===== Page Results =====

    /// Persists one completed page/device unit
    fn save_page_result(&mut self, report_id: &str, page: &PageScanResult) -> StorageResult<()>;

    /// Loads the page/device units of a report in insertion order
    fn get_page_results(&self, report_id: &str) -> StorageResult<Vec<PageScanResult>>;

    /// Deletes every page/device unit of a report, returning how many were removed
    fn delete_page_results(&mut self, report_id: &str) -> StorageResult<usize>;

    // ===== Final Result =====

    /// Persists the final aggregate and marks the report completed
    fn save_final_result(&mut self, result: &ScanResult) -> StorageResult<()>;

    /// Loads the final aggregate of a completed report
    fn load_final_result(&self, report_id: &str) -> StorageResult<Option<ScanResult>>;

    // ===== Statistics =====

    /// Counts reports in a given status
    fn count_reports_by_status(&self, status: ReportStatus) -> StorageResult<u64>;

    /// Counts stored page/device rows across all reports
    fn count_scanned_pages(&self) -> StorageResult<u64>;
}

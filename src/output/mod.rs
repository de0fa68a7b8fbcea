//! Output module for exporting reports and store statistics
//!
//! This module handles:
//! - Rendering a persisted scan result as a markdown report
//! - Writing that report into the configured report directory
//! - Summarizing what the store holds

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{load_statistics, print_statistics, StoreStatistics};

use crate::model::WcagCatalog;
use crate::storage::{ScanStore, StorageError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Report {0} has no completed result")]
    NotCompleted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Exports a completed report as `<report_dir>/<report_id>.md`
///
/// # Arguments
///
/// * `storage` - The store holding the report
/// * `report_id` - The report to export
/// * `catalog` - Criteria table used to name criteria in the compliance section
/// * `report_dir` - Directory the markdown file is written into
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Unknown report, report not completed, or write failure
pub fn export_report(
    storage: &dyn ScanStore,
    report_id: &str,
    catalog: &WcagCatalog,
    report_dir: &Path,
) -> OutputResult<PathBuf> {
    let result = match storage.load_final_result(report_id) {
        Ok(Some(result)) => result,
        Ok(None) => return Err(OutputError::NotCompleted(report_id.to_string())),
        Err(StorageError::ReportNotFound(id)) => return Err(OutputError::ReportNotFound(id)),
        Err(e) => return Err(e.into()),
    };

    std::fs::create_dir_all(report_dir)?;
    let file_stem: String = report_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let path = report_dir.join(format!("{}.md", file_stem));
    write_markdown_report(&result, catalog, &path)?;

    Ok(path)
}

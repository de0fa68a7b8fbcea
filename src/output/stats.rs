//! Statistics generation from the report store
//!
//! This module provides functionality for extracting and displaying
//! report statistics from the storage layer.

use crate::state::ReportStatus;
use crate::storage::{ScanStore, StorageResult};

/// Store statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatistics {
    /// Total number of reports
    pub total_reports: u64,

    /// Count of reports per status, in lifecycle order
    pub reports_by_status: Vec<(ReportStatus, u64)>,

    /// Number of stored page/device results across all reports
    pub scanned_pages: u64,
}

impl StoreStatistics {
    pub fn count(&self, status: ReportStatus) -> u64 {
        self.reports_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn ScanStore) -> StorageResult<StoreStatistics> {
    let mut reports_by_status = Vec::new();
    for status in ReportStatus::all_states() {
        reports_by_status.push((status, storage.count_reports_by_status(status)?));
    }

    Ok(StoreStatistics {
        total_reports: reports_by_status.iter().map(|(_, count)| count).sum(),
        reports_by_status,
        scanned_pages: storage.count_scanned_pages()?,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  Total reports: {}", stats.total_reports);
    println!("  Page/device results stored: {}", stats.scanned_pages);
    println!();

    println!("Reports by Status:");
    for (status, count) in &stats.reports_by_status {
        let percentage = if stats.total_reports > 0 {
            (*count as f64 / stats.total_reports as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    let finished = stats.count(ReportStatus::Completed) + stats.count(ReportStatus::Failed);
    if finished > 0 {
        let success_rate = stats.count(ReportStatus::Completed) as f64 / finished as f64 * 100.0;
        println!(
            "Completion Rate: {:.1}% ({} / {} finished reports completed)",
            success_rate,
            stats.count(ReportStatus::Completed),
            finished
        );
    }
}

//! Scan orchestrator
//!
//! Drives one report through discovery, the page x device scan, and
//! aggregation:
//!
//! 1. Discover the page list from the seed; the list is fixed before any unit runs
//! 2. Scan every (page, device) unit, `workers` at a time, in task-list order
//! 3. Persist each completed unit; drop failed units with a warning
//! 4. Score, build the compliance matrix, and persist the final result once
//!
//! Only a storage failure marks the report failed. Unit failures and discovery
//! failures degrade the result instead.

use crate::config::Config;
use crate::crawler::discover_pages;
use crate::model::{Device, ScanRequest, ScanResult, WcagCatalog};
use crate::scanner::page::PageScanner;
use crate::scanner::progress::ProgressTracker;
use crate::scanner::scoring::{calculate_compliance, calculate_score};
use crate::state::ReportStatus;
use crate::storage::{ScanStore, SqliteStorage, StorageError, StorageResult};
use crate::AuditError;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Share of the progress bar reached once discovery finishes
const DISCOVERY_PROGRESS: u8 = 10;

/// Share of the progress bar reached once every unit has run
const SCAN_PROGRESS: u8 = 90;

/// Main scan coordinator structure
pub struct Orchestrator {
    config: Arc<Config>,
    config_hash: String,
    scanner: PageScanner,
    storage: Arc<Mutex<SqliteStorage>>,
    catalog: WcagCatalog,
    devices: Vec<Device>,
    progress: ProgressTracker,
}

impl Orchestrator {
    /// Creates a new orchestrator over an opened store
    ///
    /// # Arguments
    ///
    /// * `config` - The audit configuration
    /// * `config_hash` - Hash recorded on every report this orchestrator creates
    /// * `storage` - The persistence backend
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run scans
    /// * `Err(AuditError)` - Unknown device name or HTTP client failure
    pub fn new(
        config: Config,
        config_hash: impl Into<String>,
        storage: SqliteStorage,
    ) -> Result<Self, AuditError> {
        let devices = config.devices()?;
        let scanner = PageScanner::from_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            config_hash: config_hash.into(),
            scanner,
            storage: Arc::new(Mutex::new(storage)),
            catalog: WcagCatalog::standard(),
            devices,
            progress: ProgressTracker::new(),
        })
    }

    /// A handle to the progress of the current scan
    pub fn progress(&self) -> ProgressTracker {
        self.progress.clone()
    }

    /// A handle to the underlying store
    pub fn storage(&self) -> Arc<Mutex<SqliteStorage>> {
        Arc::clone(&self.storage)
    }

    fn with_storage<T>(
        &self,
        f: impl FnOnce(&mut SqliteStorage) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut storage = self.storage.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&mut storage)
    }

    /// Creates the report for a request and runs the full pipeline
    ///
    /// # Returns
    ///
    /// * `Ok(ScanResult)` - The persisted final result
    /// * `Err(AuditError)` - The report could not be created, or storage failed
    ///   mid-scan and the report was marked failed
    pub async fn run_scan(&self, request: &ScanRequest) -> Result<ScanResult, AuditError> {
        self.with_storage(|s| s.create_report(request, &self.config_hash))?;
        self.execute(request).await
    }

    /// Restarts a finished report from scratch
    ///
    /// Prior page rows are discarded and the report returns to `pending`
    /// before the pipeline runs again with the stored URL and page budget.
    pub async fn rescan(&self, report_id: &str) -> Result<ScanResult, AuditError> {
        let report = self
            .with_storage(|s| s.get_report(report_id))?
            .ok_or_else(|| AuditError::ReportNotFound(report_id.to_string()))?;

        let request = ScanRequest::new(&report.report_id, &report.website_url, report.page_budget)?;
        self.with_storage(|s| s.reset_for_rescan(report_id))?;
        info!("Rescanning report {}", report_id);

        self.execute(&request).await
    }

    async fn execute(&self, request: &ScanRequest) -> Result<ScanResult, AuditError> {
        match self.scan(request).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("Scan {} failed: {}", request.report_id, e);
                let reason = e.to_string();
                if let Err(mark) =
                    self.with_storage(|s| s.fail_report(&request.report_id, &reason))
                {
                    warn!("Could not mark report {} failed: {}", request.report_id, mark);
                }
                Err(e)
            }
        }
    }

    async fn scan(&self, request: &ScanRequest) -> Result<ScanResult, AuditError> {
        let report_id = request.report_id.as_str();
        let start_time = Instant::now();
        self.progress.reset();

        self.with_storage(|s| s.update_status(report_id, ReportStatus::Scanning))?;
        info!(
            "Starting scan {} of {} (budget {} page(s))",
            report_id, request.url, request.page_budget
        );

        let mut result = ScanResult::new(report_id, &request.url);

        let pages = discover_pages(self.scanner.client(), &request.url, request.page_budget).await;
        self.report_progress(report_id, DISCOVERY_PROGRESS);

        let units: Vec<(String, Device)> = pages
            .iter()
            .flat_map(|page| self.devices.iter().map(move |device| (page.clone(), *device)))
            .collect();
        let total_units = units.len();
        let workers = self.config.scanner.workers.max(1);
        debug!("Scanning {} unit(s) with {} worker(s)", total_units, workers);

        let mut completed_units = stream::iter(units)
            .map(move |(page_url, device)| async move {
                let outcome = self.scanner.scan_page(report_id, &page_url, device).await;
                (page_url, device, outcome)
            })
            .buffered(workers);

        let mut finished = 0;
        while let Some((page_url, device, outcome)) = completed_units.next().await {
            finished += 1;
            match outcome {
                Ok(page) => {
                    self.with_storage(|s| s.save_page_result(report_id, &page))?;
                    result.push_page(page);
                }
                Err(e) => warn!("Dropping unit {} [{}]: {}", page_url, device, e),
            }

            let span = usize::from(SCAN_PROGRESS - DISCOVERY_PROGRESS);
            let percent = usize::from(DISCOVERY_PROGRESS) + finished * span / total_units.max(1);
            self.report_progress(report_id, percent as u8);
        }

        // Every discovered page counts, whether or not any of its units succeeded
        result.summary.total_pages += pages.len();

        self.with_storage(|s| s.update_status(report_id, ReportStatus::Processing))?;
        result.summary.score = calculate_score(&result.pages);
        result.wcag_compliance = calculate_compliance(&result.pages, &self.catalog);
        result.completed_at = Some(Utc::now());

        self.with_storage(|s| s.save_final_result(&result))?;
        self.progress.advance(100);

        if !result.summary.collected_data() {
            warn!("Scan {} completed without collecting any data", report_id);
        }
        info!(
            "Scan {} completed: {} page(s), {} of {} unit(s), score {:.1} in {:?}",
            report_id,
            result.summary.total_pages,
            result.summary.units_scanned,
            total_units,
            result.summary.score,
            start_time.elapsed()
        );

        Ok(result)
    }

    /// Advances the shared tracker and mirrors it into the store
    fn report_progress(&self, report_id: &str, percent: u8) {
        let current = self.progress.advance(percent);
        if let Err(e) = self.with_storage(|s| s.update_progress(report_id, current)) {
            warn!("Failed to record progress for {}: {}", report_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    fn orchestrator() -> Orchestrator {
        let storage = SqliteStorage::new_in_memory().unwrap();
        Orchestrator::new(test_config(":memory:"), "hash", storage).unwrap()
    }

    #[test]
    fn test_new_resolves_devices() {
        let orchestrator = orchestrator();
        assert_eq!(orchestrator.devices, Device::ALL.to_vec());
        assert_eq!(orchestrator.progress().get(), 0);
    }

    #[test]
    fn test_unknown_device_fails_construction() {
        let mut config = test_config(":memory:");
        config.scanner.devices = vec!["desktop".to_string(), "fridge".to_string()];
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(Orchestrator::new(config, "hash", storage).is_err());
    }

    #[tokio::test]
    async fn test_rescan_unknown_report() {
        let orchestrator = orchestrator();
        let result = orchestrator.rescan("rpt-missing").await;
        assert!(matches!(result, Err(AuditError::ReportNotFound(id)) if id == "rpt-missing"));
    }

    #[tokio::test]
    async fn test_unreachable_seed_completes_without_data() {
        let orchestrator = orchestrator();
        // Port 9 on loopback refuses connections
        let request = ScanRequest::new("rpt-offline", "http://127.0.0.1:9/", 3).unwrap();

        let result = orchestrator.run_scan(&request).await.unwrap();
        assert!(result.is_complete());
        assert!(result.pages.is_empty());
        assert_eq!(result.summary.total_pages, 1);
        assert_eq!(result.summary.units_scanned, 0);
        assert_eq!(result.summary.score, 10.0);
        assert_eq!(orchestrator.progress().get(), 100);

        let storage = orchestrator.storage();
        let storage = storage.lock().unwrap();
        let report = storage.get_report("rpt-offline").unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
    }

    #[tokio::test]
    async fn test_duplicate_report_is_rejected_without_failing_original() {
        let orchestrator = orchestrator();
        let request = ScanRequest::new("rpt-dup", "http://127.0.0.1:9/", 1).unwrap();
        orchestrator.run_scan(&request).await.unwrap();

        let again = orchestrator.run_scan(&request).await;
        assert!(matches!(
            again,
            Err(AuditError::Storage(StorageError::DuplicateReport(_)))
        ));

        let storage = orchestrator.storage();
        let status = storage.lock().unwrap().get_report("rpt-dup").unwrap().unwrap().status;
        assert_eq!(status, ReportStatus::Completed);
    }
}

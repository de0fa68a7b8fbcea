//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ScanStore trait.

use crate::model::{PageScanResult, ScanRequest, ScanResult};
use crate::state::ReportStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ScanStore, StorageError, StorageResult};
use crate::storage::ReportRecord;
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const REPORT_COLUMNS: &str = "report_id, website_url, pages_count, scan_status, progress, \
     config_hash, error_message, created_at, started_at, completed_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
            PRAGMA mmap_size = 268435456;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn current_status(&self, report_id: &str) -> StorageResult<ReportStatus> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT scan_status FROM reports WHERE report_id = ?1",
                params![report_id],
                |row| row.get(0),
            )
            .optional()?;

        let status = status.ok_or_else(|| StorageError::ReportNotFound(report_id.to_string()))?;
        parse_status(&status)
    }

    /// Fails unless the report exists and may move to `next`
    fn check_transition(&self, report_id: &str, next: ReportStatus) -> StorageResult<()> {
        let from = self.current_status(report_id)?;
        if from.can_transition_to(next) {
            Ok(())
        } else {
            Err(StorageError::InvalidTransition { from, to: next })
        }
    }
}

/// A stored status this build does not know is corruption, never a default
fn parse_status(value: &str) -> StorageResult<ReportStatus> {
    ReportStatus::from_db_string(value)
        .ok_or_else(|| StorageError::Database(format!("unknown report status '{}'", value)))
}

fn report_from_row(row: &Row<'_>) -> rusqlite::Result<ReportRecord> {
    let status = parse_status(&row.get::<_, String>(3)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(ReportRecord {
        report_id: row.get(0)?,
        website_url: row.get(1)?,
        page_budget: row.get::<_, i64>(2)? as usize,
        status,
        progress: row.get(4)?,
        config_hash: row.get(5)?,
        error_message: row.get(6)?,
        created_at: row.get(7)?,
        started_at: row.get(8)?,
        completed_at: row.get(9)?,
    })
}

impl ScanStore for SqliteStorage {
    // ===== Report Management =====

    fn create_report(&mut self, request: &ScanRequest, config_hash: &str) -> StorageResult<()> {
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT report_id FROM reports WHERE report_id = ?1",
                params![request.report_id],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StorageError::DuplicateReport(request.report_id.clone()));
        }

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO reports (report_id, website_url, pages_count, scan_status, progress, config_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)",
            params![
                request.report_id,
                request.url,
                request.page_budget as i64,
                ReportStatus::Pending.to_db_string(),
                config_hash,
                now
            ],
        )?;
        Ok(())
    }

    fn get_report(&self, report_id: &str) -> StorageResult<Option<ReportRecord>> {
        let sql = format!("SELECT {} FROM reports WHERE report_id = ?1", REPORT_COLUMNS);
        let report = self
            .conn
            .query_row(&sql, params![report_id], report_from_row)
            .optional()?;
        Ok(report)
    }

    fn list_reports(&self) -> StorageResult<Vec<ReportRecord>> {
        let sql = format!(
            "SELECT {} FROM reports ORDER BY created_at DESC, report_id DESC",
            REPORT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let reports = stmt
            .query_map([], report_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    fn update_status(&mut self, report_id: &str, status: ReportStatus) -> StorageResult<()> {
        self.check_transition(report_id, status)?;

        if status == ReportStatus::Scanning {
            let now = Utc::now().to_rfc3339();
            self.conn.execute(
                "UPDATE reports SET scan_status = ?1, started_at = ?2 WHERE report_id = ?3",
                params![status.to_db_string(), now, report_id],
            )?;
        } else {
            self.conn.execute(
                "UPDATE reports SET scan_status = ?1 WHERE report_id = ?2",
                params![status.to_db_string(), report_id],
            )?;
        }
        Ok(())
    }

    fn fail_report(&mut self, report_id: &str, reason: &str) -> StorageResult<()> {
        self.check_transition(report_id, ReportStatus::Failed)?;

        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE reports SET scan_status = ?1, error_message = ?2, completed_at = ?3 WHERE report_id = ?4",
            params![ReportStatus::Failed.to_db_string(), reason, now, report_id],
        )?;
        Ok(())
    }

    fn update_progress(&mut self, report_id: &str, percent: u8) -> StorageResult<()> {
        let updated = self.conn.execute(
            "UPDATE reports SET progress = MAX(progress, ?1) WHERE report_id = ?2",
            params![percent.min(100), report_id],
        )?;
        if updated == 0 {
            return Err(StorageError::ReportNotFound(report_id.to_string()));
        }
        Ok(())
    }

    fn reset_for_rescan(&mut self, report_id: &str) -> StorageResult<()> {
        self.check_transition(report_id, ReportStatus::Pending)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM scanned_pages WHERE report_id = ?1",
            params![report_id],
        )?;
        tx.execute(
            "UPDATE reports
             SET scan_status = ?1, progress = 0, report_data = NULL, error_message = NULL,
                 started_at = NULL, completed_at = NULL
             WHERE report_id = ?2",
            params![ReportStatus::Pending.to_db_string(), report_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ===== Page Results =====

    fn save_page_result(&mut self, report_id: &str, page: &PageScanResult) -> StorageResult<()> {
        let scan_data =
            serde_json::to_string(page).map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.conn.execute(
            "INSERT INTO scanned_pages
             (report_id, page_url, page_title, device_type, screenshot_path, issues_count,
              errors_count, warnings_count, notices_count, passed_count, scan_data, scanned_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                report_id,
                page.page_url,
                page.page_title,
                page.device.as_str(),
                page.screenshot,
                page.issues_count as i64,
                page.errors_count as i64,
                page.warnings_count as i64,
                page.notices_count as i64,
                page.passed_count as i64,
                scan_data,
                page.scanned_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn get_page_results(&self, report_id: &str) -> StorageResult<Vec<PageScanResult>> {
        let mut stmt = self
            .conn
            .prepare("SELECT scan_data FROM scanned_pages WHERE report_id = ?1 ORDER BY id")?;

        let rows = stmt
            .query_map(params![report_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter()
            .map(|data| {
                serde_json::from_str(data).map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .collect()
    }

    fn delete_page_results(&mut self, report_id: &str) -> StorageResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM scanned_pages WHERE report_id = ?1",
            params![report_id],
        )?;
        Ok(deleted)
    }

    // ===== Final Result =====

    fn save_final_result(&mut self, result: &ScanResult) -> StorageResult<()> {
        self.check_transition(&result.report_id, ReportStatus::Completed)?;

        let report_data = serde_json::to_string(result)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let completed_at = result
            .completed_at
            .unwrap_or_else(Utc::now)
            .to_rfc3339();

        self.conn.execute(
            "UPDATE reports
             SET scan_status = ?1, progress = 100, report_data = ?2, completed_at = ?3
             WHERE report_id = ?4",
            params![
                ReportStatus::Completed.to_db_string(),
                report_data,
                completed_at,
                result.report_id
            ],
        )?;
        Ok(())
    }

    fn load_final_result(&self, report_id: &str) -> StorageResult<Option<ScanResult>> {
        let data: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT report_data FROM reports WHERE report_id = ?1",
                params![report_id],
                |row| row.get(0),
            )
            .optional()?;

        match data {
            None => Err(StorageError::ReportNotFound(report_id.to_string())),
            Some(None) => Ok(None),
            Some(Some(json)) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
        }
    }

    // ===== Statistics =====

    fn count_reports_by_status(&self, status: ReportStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM reports WHERE scan_status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_scanned_pages(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM scanned_pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

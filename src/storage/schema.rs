//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the audit database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per audit report
CREATE TABLE IF NOT EXISTS reports (
    report_id TEXT PRIMARY KEY,
    website_url TEXT NOT NULL,
    pages_count INTEGER NOT NULL,
    scan_status TEXT NOT NULL,
    progress INTEGER NOT NULL DEFAULT 0,
    config_hash TEXT NOT NULL,
    report_data TEXT,
    error_message TEXT,
    created_at TEXT NOT NULL,
    started_at TEXT,
    completed_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(scan_status);

-- One row per completed page/device unit
CREATE TABLE IF NOT EXISTS scanned_pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id TEXT NOT NULL REFERENCES reports(report_id) ON DELETE CASCADE,
    page_url TEXT NOT NULL,
    page_title TEXT NOT NULL,
    device_type TEXT NOT NULL,
    screenshot_path TEXT,
    issues_count INTEGER NOT NULL DEFAULT 0,
    errors_count INTEGER NOT NULL DEFAULT 0,
    warnings_count INTEGER NOT NULL DEFAULT 0,
    notices_count INTEGER NOT NULL DEFAULT 0,
    passed_count INTEGER NOT NULL DEFAULT 0,
    scan_data TEXT NOT NULL,
    scanned_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scanned_pages_report ON scanned_pages(report_id);
"#;

/// Creates the report and page tables if they do not exist yet
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}

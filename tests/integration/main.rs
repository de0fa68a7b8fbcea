//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to serve fixture sites and exercise discovery,
//! page scanning, persistence, rescans and export end to end.

mod discovery_tests;
mod scan_tests;

use a11y_audit::config::{load_config, Config};
use std::path::Path;

/// Writes a configuration into `dir` and loads it through the normal loader
///
/// The database, report directory and screenshot directory all live in `dir`.
pub fn write_test_config(dir: &Path, workers: usize, placeholder_screenshots: bool) -> Config {
    let screenshots = if placeholder_screenshots {
        format!(
            "[screenshots]\nmode = \"placeholder\"\ndirectory = '{}'\n",
            dir.join("shots").display()
        )
    } else {
        String::new()
    };

    let toml = format!(
        r#"
[scanner]
default-page-budget = 5
request-timeout-secs = 5
workers = {workers}
devices = ["desktop", "tablet", "mobile"]
preview-issue-limit = 5

[user-agent]
name = "TestAuditor"
version = "1.0"
contact-url = "https://example.com/about"

[output]
database-path = '{db}'
report-dir = '{reports}'

{screenshots}"#,
        workers = workers,
        db = dir.join("audit.db").display(),
        reports = dir.join("reports").display(),
        screenshots = screenshots,
    );

    let path = dir.join("audit.toml");
    std::fs::write(&path, toml).expect("Failed to write test config");
    load_config(&path).expect("Test config should be valid")
}

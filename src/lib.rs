//! a11y-audit: a website accessibility auditing engine
//!
//! This crate discovers a bounded set of same-host pages from a seed URL,
//! evaluates each page against a battery of WCAG 2.1 heuristics across three
//! device viewports, and aggregates the findings into a 0-10 score and a
//! per-level compliance matrix.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Errors surfaced by scans, rescans and previews
///
/// Per-unit fetch failures never reach callers of a full scan; they are
/// logged and the unit is dropped. `ScanFailed` is only returned directly by
/// a preview or by scanning a single page.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Report persistence failed; a running scan is marked failed
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    /// The seed URL of a request was rejected
    #[error("Invalid scan URL: {0}")]
    Url(#[from] UrlError),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Scan produced no result for {url}: {reason}")]
    ScanFailed { url: String, reason: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),
}

/// Reasons a seed URL cannot start a scan
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result of an audit operation
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result of loading or validating configuration
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result of validating a seed URL
pub type UrlResult<T> = std::result::Result<T, UrlError>;

pub use config::Config;
pub use model::{
    ComplianceMatrix, Device, Issue, PageScanResult, PassedCheck, ScanRequest, ScanResult,
    ScanSummary, Severity, WcagCatalog,
};
pub use rules::RuleSet;
pub use scanner::{Orchestrator, PageScanner};
pub use state::ReportStatus;

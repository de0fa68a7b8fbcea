use serde::Deserialize;

/// Main configuration structure for the audit engine
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scanner: ScannerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub screenshots: ScreenshotConfig,
}

/// Scan behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Page budget used when a scan request does not specify one
    #[serde(rename = "default-page-budget", default = "default_page_budget")]
    pub default_page_budget: usize,

    /// Timeout applied to every outbound page fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Number of page/device units scanned concurrently; 1 scans sequentially
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Device profiles every discovered page is scanned under
    #[serde(default = "default_devices")]
    pub devices: Vec<String>,

    /// Number of issues returned by a preview scan
    #[serde(rename = "preview-issue-limit", default = "default_preview_limit")]
    pub preview_issue_limit: usize,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scanner
    pub name: String,

    /// Version of the scanner
    pub version: String,

    /// URL with information about the scanner
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Directory markdown reports are exported into
    #[serde(rename = "report-dir")]
    pub report_dir: String,
}

/// Screenshot collaborator selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotMode {
    /// No screenshot references are recorded
    #[default]
    None,
    /// A locally generated placeholder image per unit
    Placeholder,
}

/// Screenshot configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScreenshotConfig {
    #[serde(default)]
    pub mode: ScreenshotMode,

    /// Directory placeholder images are written into
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_page_budget() -> usize {
    5
}

fn default_request_timeout() -> u64 {
    30
}

fn default_workers() -> usize {
    1
}

fn default_devices() -> Vec<String> {
    vec![
        "desktop".to_string(),
        "tablet".to_string(),
        "mobile".to_string(),
    ]
}

fn default_preview_limit() -> usize {
    5
}

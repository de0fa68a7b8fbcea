//! Page scanner: fetch, parse, and evaluate one page under one device

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_html};
use crate::model::{CheckOutcome, Device, Issue, PageScanResult};
use crate::rules::{PageDocument, RuleSet};
use crate::scanner::scoring::score_from_counts;
use crate::scanner::screenshot::{screenshots_from_config, ScreenshotProvider};
use crate::AuditError;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Truncated single-page result returned to untrusted callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewResult {
    pub url: String,
    pub page_title: String,
    pub score: f64,
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    /// The first issues in rule order, at most the preview limit
    pub issues: Vec<Issue>,
    /// Issues withheld from `issues`
    pub hidden_count: usize,
}

impl PreviewResult {
    /// Summarizes a unit result, keeping only the first `limit` issues
    pub fn from_page(page: &PageScanResult, limit: usize) -> Self {
        let issues: Vec<Issue> = page.issues.iter().take(limit).cloned().collect();
        Self {
            url: page.page_url.clone(),
            page_title: page.page_title.clone(),
            score: score_from_counts(page.passed_count, page.issues_count),
            total_issues: page.issues_count,
            errors: page.errors_count,
            warnings: page.warnings_count,
            hidden_count: page.issues_count - issues.len(),
            issues,
        }
    }
}

/// Parses markup and runs every rule over it
///
/// Returns the page title (empty when absent) and the combined findings.
/// The parsed tree never outlives this call.
pub fn evaluate_markup(rules: &RuleSet, markup: &str) -> (String, CheckOutcome) {
    let doc = PageDocument::parse(markup);
    if doc.parse_error_count() > 0 {
        debug!("Recovered from {} markup error(s)", doc.parse_error_count());
    }
    let title = doc.title().unwrap_or_default();
    (title, rules.run(&doc))
}

/// Scans individual page/device units
pub struct PageScanner {
    client: Client,
    rules: RuleSet,
    screenshots: Arc<dyn ScreenshotProvider>,
}

impl PageScanner {
    pub fn new(client: Client, rules: RuleSet, screenshots: Arc<dyn ScreenshotProvider>) -> Self {
        Self {
            client,
            rules,
            screenshots,
        }
    }

    /// Builds a scanner with the standard rules and the configured client and screenshots
    pub fn from_config(config: &Config) -> Result<Self, AuditError> {
        let client = build_http_client(config)?;
        Ok(Self::new(
            client,
            RuleSet::standard(),
            screenshots_from_config(&config.screenshots),
        ))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Scans one page under one device
    ///
    /// A failed fetch fails the whole unit with `ScanFailed`; no partial
    /// result is produced. A missing screenshot never fails the unit.
    ///
    /// # Arguments
    ///
    /// * `report_id` - Report the unit belongs to
    /// * `page_url` - Absolute URL of the page
    /// * `device` - Device profile the unit is scanned under
    pub async fn scan_page(
        &self,
        report_id: &str,
        page_url: &str,
        device: Device,
    ) -> Result<PageScanResult, AuditError> {
        let markup = fetch_html(&self.client, page_url)
            .await
            .into_body()
            .map_err(|reason| AuditError::ScanFailed {
                url: page_url.to_string(),
                reason,
            })?;

        let (title, outcome) = evaluate_markup(&self.rules, &markup);
        let screenshot = self.capture_screenshot(report_id, page_url, device).await;

        let page = PageScanResult::new(
            page_url,
            title,
            device,
            outcome.issues,
            outcome.passed,
            screenshot,
        );
        debug!(
            "Scanned {} [{}]: {} issue(s), {} passed",
            page_url, device, page.issues_count, page.passed_count
        );
        Ok(page)
    }

    /// Runs the screenshot collaborator on the blocking pool
    ///
    /// Collaborators may do file or network I/O; running them inline would
    /// stall every other unit in flight on the same runtime thread.
    async fn capture_screenshot(
        &self,
        report_id: &str,
        page_url: &str,
        device: Device,
    ) -> Option<String> {
        let screenshots = Arc::clone(&self.screenshots);
        let (report, url) = (report_id.to_string(), page_url.to_string());
        tokio::task::spawn_blocking(move || screenshots.capture(&report, &url, device))
            .await
            .unwrap_or_else(|e| {
                warn!("Screenshot capture for {} [{}] failed: {}", page_url, device, e);
                None
            })
    }

    /// Scans one page at the desktop viewport and truncates the issue list
    ///
    /// Nothing is persisted and no screenshot is taken.
    pub async fn preview(&self, page_url: &str, limit: usize) -> Result<PreviewResult, AuditError> {
        let markup = fetch_html(&self.client, page_url)
            .await
            .into_body()
            .map_err(|reason| AuditError::ScanFailed {
                url: page_url.to_string(),
                reason,
            })?;

        let (title, outcome) = evaluate_markup(&self.rules, &markup);
        let page = PageScanResult::new(
            page_url,
            title,
            Device::Desktop,
            outcome.issues,
            outcome.passed,
            None,
        );
        Ok(PreviewResult::from_page(&page, limit))
    }
}

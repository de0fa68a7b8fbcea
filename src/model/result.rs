//! Scan requests and the result structures a scan produces

use crate::config::validate_page_budget;
use crate::model::device::{Device, Viewport};
use crate::model::finding::{Issue, PassedCheck, Severity};
use crate::{AuditError, UrlError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// A request to audit one website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub report_id: String,
    pub url: String,
    pub page_budget: usize,
}

impl ScanRequest {
    /// Creates a request, rejecting non-HTTP(S) URLs and out-of-range budgets
    pub fn new(
        report_id: impl Into<String>,
        url: &str,
        page_budget: usize,
    ) -> Result<Self, AuditError> {
        let parsed = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(parsed.scheme().to_string()).into());
        }
        if parsed.host_str().is_none() {
            return Err(UrlError::MissingHost.into());
        }
        validate_page_budget(page_budget)?;

        Ok(Self {
            report_id: report_id.into(),
            url: url.to_string(),
            page_budget,
        })
    }
}

/// Generates a report identifier from the current time
pub fn generate_report_id() -> String {
    format!("rpt-{}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}

/// Findings for one (page, device) unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageScanResult {
    pub page_url: String,
    pub page_title: String,
    pub device: Device,
    pub viewport: Viewport,
    pub screenshot: Option<String>,
    pub issues: Vec<Issue>,
    pub passed: Vec<PassedCheck>,
    pub issues_count: usize,
    pub errors_count: usize,
    pub warnings_count: usize,
    pub notices_count: usize,
    pub passed_count: usize,
    pub scanned_at: DateTime<Utc>,
}

impl PageScanResult {
    /// Builds a unit result, deriving every count from the findings
    pub fn new(
        page_url: impl Into<String>,
        page_title: impl Into<String>,
        device: Device,
        issues: Vec<Issue>,
        passed: Vec<PassedCheck>,
        screenshot: Option<String>,
    ) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let errors_count = count(Severity::Error);
        let warnings_count = count(Severity::Warning);
        let notices_count = count(Severity::Notice);

        Self {
            page_url: page_url.into(),
            page_title: page_title.into(),
            device,
            viewport: device.viewport(),
            screenshot,
            issues_count: issues.len(),
            errors_count,
            warnings_count,
            notices_count,
            passed_count: passed.len(),
            issues,
            passed,
            scanned_at: Utc::now(),
        }
    }
}

/// Final status of one criterion in the compliance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Passed,
    Failed,
}

/// Compliance tally for one conformance level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCompliance {
    /// Number of distinct criteria marked passed
    pub passed: usize,
    /// Number of failing issue occurrences
    pub failed: usize,
    pub criteria: BTreeMap<String, CriterionStatus>,
}

impl LevelCompliance {
    pub fn status(&self, criterion: &str) -> Option<CriterionStatus> {
        self.criteria.get(criterion).copied()
    }

    /// Number of distinct criteria with at least one failure
    pub fn criteria_failed(&self) -> usize {
        self.criteria
            .values()
            .filter(|s| **s == CriterionStatus::Failed)
            .count()
    }
}

/// Pass/fail matrix per conformance level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceMatrix {
    pub level_a: LevelCompliance,
    pub level_aa: LevelCompliance,
}

impl ComplianceMatrix {
    /// Looks a criterion up in whichever level records it
    pub fn status(&self, criterion: &str) -> Option<CriterionStatus> {
        self.level_a
            .status(criterion)
            .or_else(|| self.level_aa.status(criterion))
    }
}

/// Totals across a whole scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Discovered pages attempted, not page/device units
    pub total_pages: usize,
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub notices: usize,
    pub passed: usize,
    pub score: f64,
    /// Page/device units that produced a result; zero means no data was collected
    pub units_scanned: usize,
}

impl ScanSummary {
    /// Adds one completed unit's counts to the running totals
    pub fn record(&mut self, page: &PageScanResult) {
        self.total_issues += page.issues_count;
        self.errors += page.errors_count;
        self.warnings += page.warnings_count;
        self.notices += page.notices_count;
        self.passed += page.passed_count;
        self.units_scanned += 1;
    }

    pub fn collected_data(&self) -> bool {
        self.units_scanned > 0
    }
}

/// The full aggregate of a scan, persisted once on completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub report_id: String,
    pub url: String,
    pub pages: Vec<PageScanResult>,
    pub summary: ScanSummary,
    pub wcag_compliance: ComplianceMatrix,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanResult {
    pub fn new(report_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            url: url.into(),
            pages: Vec::new(),
            summary: ScanSummary::default(),
            wcag_compliance: ComplianceMatrix::default(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Appends a fully formed unit and folds its counts into the summary
    pub fn push_page(&mut self, page: PageScanResult) {
        self.summary.record(&page);
        self.pages.push(page);
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

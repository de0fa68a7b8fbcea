//! Rule findings: issues and passed checks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a detected issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule violation detected on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Stable key identifying the kind of violation (e.g. `image_missing_alt`)
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Truncated markup snippet, for diagnostics only
    pub element: String,
    pub severity: Severity,
    /// WCAG criterion id of the rule that produced this issue
    pub wcag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
            element: String::new(),
            severity,
            wcag: String::new(),
            recommendation: None,
        }
    }

    pub fn error(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    pub fn warning(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn notice(kind: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Notice, kind, message)
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// A rule evaluation that found no defect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassedCheck {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub element: String,
    pub wcag: String,
}

impl PassedCheck {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
            element: String::new(),
            wcag: String::new(),
        }
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }
}

/// Output of a single rule check over one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub passed: Vec<PassedCheck>,
}

impl CheckOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn pass(&mut self, passed: PassedCheck) {
        self.passed.push(passed);
    }

    /// Stamps every finding with the governing criterion id
    pub fn tagged(mut self, criterion: &str) -> Self {
        for issue in &mut self.issues {
            issue.wcag = criterion.to_string();
        }
        for passed in &mut self.passed {
            passed.wcag = criterion.to_string();
        }
        self
    }

    /// Appends another outcome's findings after this one's
    pub fn extend(&mut self, other: CheckOutcome) {
        self.issues.extend(other.issues);
        self.passed.extend(other.passed);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.passed.is_empty()
    }
}

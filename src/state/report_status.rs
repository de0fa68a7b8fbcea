//! Report lifecycle states
//!
//! A report moves `Pending -> Scanning -> Processing -> Completed`, or to
//! `Failed` from any active state. A rescan returns a finished report to
//! `Pending`.

use std::fmt;

/// Represents the current state of an audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    // ===== Active States =====
    /// Report created, scan not started
    Pending,

    /// Discovery and page/device scanning in progress
    Scanning,

    /// All units scanned; score and compliance being aggregated
    Processing,

    // ===== Terminal States =====
    /// Final result persisted
    Completed,

    /// The scan could not produce any result
    Failed,
}

impl ReportStatus {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if a scan is running or queued for this report
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Checks whether moving from this state to `next` is legal
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Pending, Scanning)
                | (Scanning, Processing)
                | (Processing, Completed)
                | (Pending | Scanning | Processing, Failed)
                | (Completed | Failed, Pending)
        )
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scanning => "scanning",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "scanning" => Some(Self::Scanning),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Scanning,
            Self::Processing,
            Self::Completed,
            Self::Failed,
        ]
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

//! Data model for accessibility scans
//!
//! - `finding`: severities, issues, passed checks and per-check outcomes
//! - `device`: the fixed desktop/tablet/mobile profiles
//! - `result`: scan requests, per-unit results, summary, compliance matrix and the aggregate
//! - `wcag`: the WCAG criteria reference table

mod device;
mod finding;
mod result;
mod wcag;

pub use device::{Device, DeviceProfile, Viewport};
pub use finding::{CheckOutcome, Issue, PassedCheck, Severity};
pub use result::{
    generate_report_id, ComplianceMatrix, CriterionStatus, LevelCompliance, PageScanResult,
    ScanRequest, ScanResult, ScanSummary,
};
pub use wcag::{Criterion, Level, WcagCatalog};

//! State module for tracking report progress
//!
//! # Components
//!
//! - `ReportStatus`: lifecycle of an audit report (pending, scanning, processing, completed, failed)

mod report_status;

// Re-export main types
pub use report_status::ReportStatus;

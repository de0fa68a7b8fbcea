//! Scanner module: per-unit scanning and whole-report orchestration
//!
//! This module contains:
//! - The page scanner and single-page preview mode
//! - The scan orchestrator with its bounded worker pool
//! - Score and compliance aggregation
//! - Screenshot collaborators and the shared progress signal

mod orchestrator;
mod page;
mod progress;
mod scoring;
mod screenshot;

pub use orchestrator::Orchestrator;
pub use page::{evaluate_markup, PageScanner, PreviewResult};
pub use progress::ProgressTracker;
pub use scoring::{calculate_compliance, calculate_score, score_from_counts, EMPTY_SCORE};
pub use screenshot::{
    screenshots_from_config, NoScreenshots, PlaceholderScreenshots, ScreenshotProvider,
};

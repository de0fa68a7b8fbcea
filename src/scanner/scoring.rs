//! Score and compliance aggregation over completed units

use crate::model::{
    ComplianceMatrix, CriterionStatus, Level, LevelCompliance, PageScanResult, WcagCatalog,
};

/// Score reported when no check produced any finding
pub const EMPTY_SCORE: f64 = 10.0;

/// Computes the 0-10 score from raw pass and issue counts
///
/// The score is `passed / (passed + issues) * 10`, rounded to one decimal.
/// A zero denominator yields [`EMPTY_SCORE`].
///
/// # Examples
///
/// ```
/// use a11y_audit::scanner::score_from_counts;
///
/// assert_eq!(score_from_counts(0, 0), 10.0);
/// assert_eq!(score_from_counts(3, 3), 5.0);
/// assert_eq!(score_from_counts(2, 1), 6.7);
/// ```
pub fn score_from_counts(passed: usize, issues: usize) -> f64 {
    let total = passed + issues;
    if total == 0 {
        return EMPTY_SCORE;
    }
    let raw = passed as f64 / total as f64 * 10.0;
    (raw * 10.0).round() / 10.0
}

/// Computes the score across every unit of a scan
pub fn calculate_score(pages: &[PageScanResult]) -> f64 {
    let passed = pages.iter().map(|p| p.passed_count).sum();
    let issues = pages.iter().map(|p| p.issues_count).sum();
    score_from_counts(passed, issues)
}

fn level_mut(matrix: &mut ComplianceMatrix, level: Level) -> &mut LevelCompliance {
    match level {
        Level::A => &mut matrix.level_a,
        Level::AA => &mut matrix.level_aa,
    }
}

/// Builds the per-level compliance matrix
///
/// All issues are applied before any pass, so a criterion that fails on any
/// unit is failed no matter which unit was scanned first. Criterion ids absent
/// from the catalog are ignored, and criteria with no finding at all stay out
/// of the matrix.
pub fn calculate_compliance(pages: &[PageScanResult], catalog: &WcagCatalog) -> ComplianceMatrix {
    let mut matrix = ComplianceMatrix::default();

    for issue in pages.iter().flat_map(|p| &p.issues) {
        let Some(level) = catalog.level_of(&issue.wcag) else {
            continue;
        };
        let compliance = level_mut(&mut matrix, level);
        compliance
            .criteria
            .insert(issue.wcag.clone(), CriterionStatus::Failed);
        compliance.failed += 1;
    }

    for passed in pages.iter().flat_map(|p| &p.passed) {
        let Some(level) = catalog.level_of(&passed.wcag) else {
            continue;
        };
        let compliance = level_mut(&mut matrix, level);
        if !compliance.criteria.contains_key(&passed.wcag) {
            compliance
                .criteria
                .insert(passed.wcag.clone(), CriterionStatus::Passed);
            compliance.passed += 1;
        }
    }

    matrix
}

//! Markdown report generation
//!
//! This module renders a completed scan result as a human-readable markdown
//! report: summary, WCAG compliance per level, and per-unit issues.

use crate::model::{CriterionStatus, LevelCompliance, ScanResult, WcagCatalog};
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for a scan result
///
/// # Arguments
///
/// * `result` - The completed scan result
/// * `catalog` - Criteria table used to name criteria
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(
    result: &ScanResult,
    catalog: &WcagCatalog,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(result, catalog);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Markdown table cells cannot contain pipes or line breaks
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn push_level(md: &mut String, title: &str, level: &LevelCompliance, catalog: &WcagCatalog) {
    md.push_str(&format!("### {}\n\n", title));
    md.push_str(&format!(
        "- **Criteria Passed**: {}\n- **Failures**: {} across {} criteria\n\n",
        level.passed,
        level.failed,
        level.criteria_failed()
    ));

    if level.criteria.is_empty() {
        md.push_str("No criteria at this level were tested.\n\n");
        return;
    }

    md.push_str("| Criterion | Name | Status |\n");
    md.push_str("|-----------|------|--------|\n");
    for (id, status) in &level.criteria {
        let name = catalog.get(id).map(|c| c.name).unwrap_or("");
        let status = match status {
            CriterionStatus::Passed => "Passed",
            CriterionStatus::Failed => "Failed",
        };
        md.push_str(&format!("| {} | {} | {} |\n", id, name, status));
    }
    md.push('\n');
}

/// Formats a scan result as markdown
///
/// # Arguments
///
/// * `result` - The scan result
/// * `catalog` - Criteria table used to name criteria
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(result: &ScanResult, catalog: &WcagCatalog) -> String {
    let mut md = String::new();
    let summary = &result.summary;

    md.push_str(&format!("# Accessibility Report: {}\n\n", result.url));

    // Report metadata
    md.push_str("## Report Information\n\n");
    md.push_str(&format!("- **Report ID**: {}\n", result.report_id));
    md.push_str(&format!("- **Started**: {}\n", result.started_at.to_rfc3339()));
    if let Some(completed) = result.completed_at {
        md.push_str(&format!("- **Completed**: {}\n", completed.to_rfc3339()));
        let duration = (completed - result.started_at).num_seconds();
        md.push_str(&format!("- **Duration**: {} seconds\n", duration));
    }
    md.push('\n');

    // Overall summary
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Score**: {:.1} / 10\n", summary.score));
    md.push_str(&format!("- **Pages Scanned**: {}\n", summary.total_pages));
    md.push_str(&format!("- **Page/Device Results**: {}\n", summary.units_scanned));
    md.push_str(&format!("- **Total Issues**: {}\n", summary.total_issues));
    md.push_str(&format!("- **Errors**: {}\n", summary.errors));
    md.push_str(&format!("- **Warnings**: {}\n", summary.warnings));
    md.push_str(&format!("- **Notices**: {}\n", summary.notices));
    md.push_str(&format!("- **Passed Checks**: {}\n\n", summary.passed));

    if !summary.collected_data() {
        md.push_str(
            "> No page could be scanned, so the score does not describe the site.\n\n",
        );
    }

    // Compliance matrix
    md.push_str("## WCAG 2.1 Compliance\n\n");
    push_level(&mut md, "Level A", &result.wcag_compliance.level_a, catalog);
    push_level(&mut md, "Level AA", &result.wcag_compliance.level_aa, catalog);

    // Per-unit findings
    if !result.pages.is_empty() {
        md.push_str("## Pages\n\n");
    }
    for page in &result.pages {
        let heading = if page.page_title.is_empty() {
            page.page_url.as_str()
        } else {
            page.page_title.as_str()
        };
        md.push_str(&format!("### {} ({})\n\n", heading, page.device));
        md.push_str(&format!("- **URL**: {}\n", page.page_url));
        md.push_str(&format!(
            "- **Viewport**: {}x{}\n",
            page.viewport.width, page.viewport.height
        ));
        if let Some(screenshot) = &page.screenshot {
            md.push_str(&format!("- **Screenshot**: {}\n", screenshot));
        }
        md.push_str(&format!(
            "- **Issues**: {} ({} errors, {} warnings, {} notices)\n",
            page.issues_count, page.errors_count, page.warnings_count, page.notices_count
        ));
        md.push_str(&format!("- **Passed Checks**: {}\n\n", page.passed_count));

        if page.issues.is_empty() {
            continue;
        }

        md.push_str("| Severity | WCAG | Type | Message | Element |\n");
        md.push_str("|----------|------|------|---------|---------|\n");
        for issue in &page.issues {
            md.push_str(&format!(
                "| {} | {} | {} | {} | `{}` |\n",
                issue.severity,
                issue.wcag,
                issue.kind,
                cell(&issue.message),
                cell(&issue.element).replace('`', "'")
            ));
        }
        md.push('\n');
    }

    md
}

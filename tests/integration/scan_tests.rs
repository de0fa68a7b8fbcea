//! Full scan pipeline against a mock site: units, persistence, rescan, export

use crate::write_test_config;
use a11y_audit::model::{CriterionStatus, Device, ScanRequest, Severity, WcagCatalog};
use a11y_audit::output::export_report;
use a11y_audit::scanner::{Orchestrator, PageScanner};
use a11y_audit::state::ReportStatus;
use a11y_audit::storage::{open_storage, ScanStore};
use a11y_audit::AuditError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// No title, no lang, one image without alt, one h1
const BARE_HOME: &str = r#"<html><body><h1>Hello</h1><img src="photo.jpg">
    <a href="/about">About our company</a><a href="/broken">Broken page</a></body></html>"#;

const ABOUT: &str = r##"<!DOCTYPE html><html lang="en"><head><title>About Example Company</title></head>
    <body><a href="#main">Skip to content</a><main id="main"><h1>About us</h1>
    <img src="team.jpg" alt="Our team at the 2024 offsite"></main></body></html>"##;

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(BARE_HOME))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(ABOUT))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

fn orchestrator(dir: &Path, workers: usize, screenshots: bool) -> Orchestrator {
    let config = write_test_config(dir, workers, screenshots);
    let storage = open_storage(&dir.join("audit.db")).expect("Failed to open storage");
    Orchestrator::new(config, "test-hash", storage).expect("Failed to build orchestrator")
}

#[tokio::test]
async fn test_bare_page_scan_end_to_end() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, false);

    let seed = format!("{}/", server.uri());
    let request = ScanRequest::new("rpt-bare", &seed, 1).unwrap();
    let result = orchestrator.run_scan(&request).await.unwrap();

    assert_eq!(result.summary.total_pages, 1);
    assert_eq!(result.pages.len(), 3);
    let devices: Vec<Device> = result.pages.iter().map(|p| p.device).collect();
    assert_eq!(devices, vec![Device::Desktop, Device::Tablet, Device::Mobile]);

    for page in &result.pages {
        assert_eq!(page.page_title, "");
        assert_eq!(page.errors_count, 3);
        let errors: Vec<&str> = page
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.kind.as_str())
            .collect();
        assert_eq!(errors, vec!["image_missing_alt", "lang_missing", "title_missing"]);
        assert!(!page.issues.iter().any(|i| i.kind.starts_with("heading")));
    }

    assert!(result.summary.score < 10.0);
    assert_eq!(result.summary.errors, 9);
    assert_eq!(
        result.wcag_compliance.status("1.1.1"),
        Some(CriterionStatus::Failed)
    );
}

#[tokio::test]
async fn test_failed_units_are_dropped_and_pages_still_counted() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, false);

    let seed = format!("{}/", server.uri());
    let request = ScanRequest::new("rpt-mixed", &seed, 3).unwrap();
    let result = orchestrator.run_scan(&request).await.unwrap();

    let urls: Vec<&str> = result.pages.iter().map(|p| p.page_url.as_str()).collect();
    let about = format!("{}/about", server.uri());
    assert_eq!(
        urls,
        vec![
            seed.as_str(),
            seed.as_str(),
            seed.as_str(),
            about.as_str(),
            about.as_str(),
            about.as_str()
        ]
    );
    assert_eq!(result.summary.total_pages, 3);
    assert_eq!(result.summary.units_scanned, 6);

    let storage = orchestrator.storage();
    let storage = storage.lock().unwrap();
    assert_eq!(storage.get_page_results("rpt-mixed").unwrap().len(), 6);

    let report = storage.get_report("rpt-mixed").unwrap().unwrap();
    assert_eq!(report.status, ReportStatus::Completed);
    assert_eq!(report.progress, 100);
    assert_eq!(report.config_hash, "test-hash");
    assert!(report.completed_at.is_some());

    let stored = storage.load_final_result("rpt-mixed").unwrap().unwrap();
    assert_eq!(stored, result);
}

#[tokio::test]
async fn test_worker_pool_keeps_task_order() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let sequential = orchestrator(dir.path(), 1, false);

    let seed = format!("{}/", server.uri());
    let one = sequential
        .run_scan(&ScanRequest::new("rpt-seq", &seed, 3).unwrap())
        .await
        .unwrap();
    drop(sequential);

    let dir = TempDir::new().unwrap();
    let pooled = orchestrator(dir.path(), 4, false);
    let four = pooled
        .run_scan(&ScanRequest::new("rpt-pool", &seed, 3).unwrap())
        .await
        .unwrap();

    let order = |r: &a11y_audit::ScanResult| {
        r.pages
            .iter()
            .map(|p| (p.page_url.clone(), p.device))
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&one), order(&four));
    assert_eq!(one.summary.score, four.summary.score);
    assert_eq!(one.wcag_compliance, four.wcag_compliance);
}

#[tokio::test]
async fn test_discovery_failure_scans_seed_only() {
    let server = MockServer::start().await;
    // Only the discovery fetch fails
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(BARE_HOME))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, false);
    let seed = format!("{}/", server.uri());
    let result = orchestrator
        .run_scan(&ScanRequest::new("rpt-degraded", &seed, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(result.summary.total_pages, 1);
    assert_eq!(result.pages.len(), 3);
    assert!(result.pages.iter().all(|p| p.page_url == seed));
}

#[tokio::test]
async fn test_unreachable_site_completes_with_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 2, false);
    let seed = format!("{}/", server.uri());
    let result = orchestrator
        .run_scan(&ScanRequest::new("rpt-404", &seed, 5).unwrap())
        .await
        .unwrap();

    assert!(result.pages.is_empty());
    assert_eq!(result.summary.total_pages, 1);
    assert_eq!(result.summary.score, 10.0);
    assert!(!result.summary.collected_data());
    assert!(result.wcag_compliance.level_a.criteria.is_empty());

    let storage = orchestrator.storage();
    let status = storage
        .lock()
        .unwrap()
        .get_report("rpt-404")
        .unwrap()
        .unwrap()
        .status;
    assert_eq!(status, ReportStatus::Completed);
}

#[tokio::test]
async fn test_placeholder_screenshots_are_recorded() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, true);

    let seed = format!("{}/", server.uri());
    let result = orchestrator
        .run_scan(&ScanRequest::new("rpt-shots", &seed, 1).unwrap())
        .await
        .unwrap();

    assert_eq!(result.pages.len(), 3);
    for page in &result.pages {
        let screenshot = page.screenshot.as_ref().expect("placeholder recorded");
        assert!(screenshot.ends_with(&format!("_{}.svg", page.device)));
        assert!(Path::new(screenshot).exists());
    }
}

#[tokio::test]
async fn test_rescan_replaces_page_rows() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, false);

    let seed = format!("{}/", server.uri());
    let first = orchestrator
        .run_scan(&ScanRequest::new("rpt-again", &seed, 2).unwrap())
        .await
        .unwrap();
    let second = orchestrator.rescan("rpt-again").await.unwrap();

    assert_eq!(first.pages.len(), second.pages.len());
    assert_eq!(first.summary.score, second.summary.score);
    assert!(second.started_at >= first.started_at);

    let storage = orchestrator.storage();
    let storage = storage.lock().unwrap();
    assert_eq!(
        storage.get_page_results("rpt-again").unwrap().len(),
        second.pages.len()
    );
    assert_eq!(
        storage.get_report("rpt-again").unwrap().unwrap().status,
        ReportStatus::Completed
    );
}

#[tokio::test]
async fn test_preview_is_desktop_only_and_truncated() {
    let server = MockServer::start().await;
    let images: String = (0..8)
        .map(|i| format!(r#"<img src="photo{}.jpg">"#, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/gallery"))
        .respond_with(html(&format!("<html><body>{}</body></html>", images)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_test_config(dir.path(), 1, true);
    let scanner = PageScanner::from_config(&config).unwrap();
    let preview = scanner
        .preview(
            &format!("{}/gallery", server.uri()),
            config.scanner.preview_issue_limit,
        )
        .await
        .unwrap();

    assert_eq!(preview.issues.len(), 5);
    assert!(preview.issues.iter().all(|i| i.kind == "image_missing_alt"));
    assert_eq!(preview.hidden_count, preview.total_issues - 5);
    assert!(preview.errors >= 10);

    // No placeholder is written even when screenshots are configured
    let shots = config.screenshots.directory.clone().unwrap();
    assert!(!Path::new(&shots).exists());
}

#[tokio::test]
async fn test_preview_of_missing_page_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_test_config(dir.path(), 1, false);
    let scanner = PageScanner::from_config(&config).unwrap();
    let result = scanner.preview(&format!("{}/gone", server.uri()), 5).await;

    assert!(matches!(result, Err(AuditError::ScanFailed { reason, .. }) if reason == "HTTP 404"));
}

#[tokio::test]
async fn test_export_writes_markdown_report() {
    let server = mock_site().await;
    let dir = TempDir::new().unwrap();
    let orchestrator = orchestrator(dir.path(), 1, false);

    let seed = format!("{}/", server.uri());
    orchestrator
        .run_scan(&ScanRequest::new("rpt-export", &seed, 2).unwrap())
        .await
        .unwrap();

    let storage = orchestrator.storage();
    let storage = storage.lock().unwrap();
    let report_dir = dir.path().join("reports");
    let path = export_report(&*storage, "rpt-export", &WcagCatalog::standard(), &report_dir)
        .unwrap();

    assert_eq!(path, report_dir.join("rpt-export.md"));
    let markdown = std::fs::read_to_string(&path).unwrap();
    assert!(markdown.contains(&format!("# Accessibility Report: {}", seed)));
    assert!(markdown.contains("| 1.1.1 | Non-text Content | Failed |"));
    assert!(markdown.contains("### About Example Company (desktop)"));

    assert!(export_report(&*storage, "rpt-missing", &WcagCatalog::standard(), &report_dir).is_err());
}

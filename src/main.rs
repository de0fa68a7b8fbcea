//! a11y-audit main entry point
//!
//! This is the command-line interface for the a11y-audit accessibility scanner.

use a11y_audit::config::{load_config_with_hash, Config};
use a11y_audit::model::{generate_report_id, ScanRequest, ScanResult, WcagCatalog};
use a11y_audit::output::{export_report, load_statistics, print_statistics};
use a11y_audit::scanner::{Orchestrator, PageScanner, PreviewResult};
use a11y_audit::storage::open_storage;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// a11y-audit: a website accessibility scanner
///
/// a11y-audit discovers same-host pages from a seed URL, checks each page
/// against WCAG 2.1 heuristics under desktop, tablet and mobile profiles,
/// and stores a scored report with a per-level compliance matrix.
#[derive(Parser, Debug)]
#[command(name = "a11y-audit")]
#[command(version = "1.0.0")]
#[command(about = "A website accessibility scanner", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["url", "preview", "rescan", "export", "stats", "dry_run"])
))]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a full scan starting from this URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Maximum number of pages to scan (defaults to the configured budget)
    #[arg(long, value_name = "N", requires = "url")]
    pages: Option<usize>,

    /// Report id for the new scan (defaults to a timestamp-derived id)
    #[arg(long, value_name = "ID", requires = "url")]
    report_id: Option<String>,

    /// Scan a single page at the desktop viewport without storing anything
    #[arg(long, value_name = "URL")]
    preview: Option<String>,

    /// Rescan an existing report from scratch
    #[arg(long, value_name = "ID")]
    rescan: Option<String>,

    /// Export a completed report as markdown and exit
    #[arg(long, value_name = "ID")]
    export: Option<String>,

    /// Show statistics from the database and exit
    #[arg(long)]
    stats: bool,

    /// Validate config and show what a scan would use without scanning
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else if let Some(report_id) = &cli.export {
        handle_export(&config, report_id)
    } else if let Some(url) = &cli.preview {
        handle_preview(&config, url).await
    } else if let Some(report_id) = &cli.rescan {
        handle_rescan(config, &config_hash, report_id).await
    } else if let Some(url) = &cli.url {
        let budget = cli.pages.unwrap_or(config.scanner.default_page_budget);
        let report_id = cli.report_id.clone().unwrap_or_else(generate_report_id);
        let request = ScanRequest::new(report_id, url, budget)?;
        handle_scan(config, &config_hash, request).await
    } else {
        anyhow::bail!("no mode selected; pass --url, --preview, --rescan, --export, --stats or --dry-run")
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("a11y_audit=info,warn"),
            1 => EnvFilter::new("a11y_audit=debug,info"),
            2 => EnvFilter::new("a11y_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what a scan would use
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("=== a11y-audit Dry Run ===\n");

    println!("Scanner Configuration:");
    println!("  Default page budget: {}", config.scanner.default_page_budget);
    println!("  Request timeout: {}s", config.scanner.request_timeout_secs);
    println!("  Workers: {}", config.scanner.workers);
    println!("  Preview issue limit: {}", config.scanner.preview_issue_limit);

    println!("\nDevices:");
    for device in config.devices()? {
        let profile = device.profile();
        println!(
            "  - {} ({}x{}, scale {})",
            device, profile.viewport.width, profile.viewport.height, profile.device_scale_factor
        );
    }

    println!("\nUser Agent:");
    println!("  {}", config.user_agent_string());

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Reports: {}", config.output.report_dir);
    match &config.screenshots.directory {
        Some(dir) => println!("  Screenshots: {:?} -> {}", config.screenshots.mode, dir),
        None => println!("  Screenshots: {:?}", config.screenshots.mode),
    }

    println!("\nWCAG criteria tracked: {}", WcagCatalog::standard().len());
    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export mode: writes a markdown report
fn handle_export(config: &Config, report_id: &str) -> Result<()> {
    println!("=== Exporting Report {} ===\n", report_id);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let path = export_report(
        &storage,
        report_id,
        &WcagCatalog::standard(),
        Path::new(&config.output.report_dir),
    )?;

    println!("✓ Report exported to: {}", path.display());

    Ok(())
}

/// Handles the --preview mode: one page, desktop only, nothing stored
async fn handle_preview(config: &Config, url: &str) -> Result<()> {
    // Validates the URL the same way a full scan would
    ScanRequest::new("preview", url, 1)?;

    let scanner = PageScanner::from_config(config)?;
    let preview = scanner
        .preview(url, config.scanner.preview_issue_limit)
        .await?;
    print_preview(&preview);

    Ok(())
}

/// Handles a full scan
async fn handle_scan(config: Config, config_hash: &str, request: ScanRequest) -> Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let orchestrator = Orchestrator::new(config, config_hash, storage)?;

    tracing::info!("Scanning {} as report {}", request.url, request.report_id);
    let result = orchestrator.run_scan(&request).await?;
    print_result(&result);

    Ok(())
}

/// Handles the --rescan mode
async fn handle_rescan(config: Config, config_hash: &str, report_id: &str) -> Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let orchestrator = Orchestrator::new(config, config_hash, storage)?;

    let result = orchestrator.rescan(report_id).await?;
    print_result(&result);

    Ok(())
}

fn print_result(result: &ScanResult) {
    let summary = &result.summary;

    println!("\n=== Report {} ===\n", result.report_id);
    println!("URL: {}", result.url);
    println!("Score: {:.1} / 10", summary.score);
    println!(
        "Pages: {} ({} page/device results)",
        summary.total_pages, summary.units_scanned
    );
    println!(
        "Issues: {} ({} errors, {} warnings, {} notices)",
        summary.total_issues, summary.errors, summary.warnings, summary.notices
    );
    println!("Passed checks: {}", summary.passed);
    println!(
        "Level A: {} passed, {} failing criteria",
        result.wcag_compliance.level_a.passed,
        result.wcag_compliance.level_a.criteria_failed()
    );
    println!(
        "Level AA: {} passed, {} failing criteria",
        result.wcag_compliance.level_aa.passed,
        result.wcag_compliance.level_aa.criteria_failed()
    );

    if !summary.collected_data() {
        println!("\n⚠ No page could be scanned; the score does not describe the site");
    }
}

fn print_preview(preview: &PreviewResult) {
    println!("\n=== Preview: {} ===\n", preview.url);
    if !preview.page_title.is_empty() {
        println!("Title: {}", preview.page_title);
    }
    println!("Score: {:.1} / 10", preview.score);
    println!(
        "Issues: {} ({} errors, {} warnings)",
        preview.total_issues, preview.errors, preview.warnings
    );

    for issue in &preview.issues {
        println!("  [{}] {} ({})", issue.severity, issue.message, issue.wcag);
    }
    if preview.hidden_count > 0 {
        println!("  ... and {} more", preview.hidden_count);
    }
}

//! Screenshot collaborators
//!
//! A collaborator turns a (page, device) unit into an artifact reference.
//! Capturing never fails the unit: a collaborator that cannot produce an
//! artifact returns `None` and the unit is recorded without one.

use crate::config::{ScreenshotConfig, ScreenshotMode};
use crate::model::Device;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces a screenshot reference for one page/device unit
///
/// The page scanner calls `capture` from the blocking thread pool, so
/// implementations may do synchronous I/O.
pub trait ScreenshotProvider: Send + Sync {
    /// Captures `page_url` under `device`, returning a reference to the artifact
    fn capture(&self, report_id: &str, page_url: &str, device: Device) -> Option<String>;
}

/// Records no screenshot for any unit
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScreenshots;

impl ScreenshotProvider for NoScreenshots {
    fn capture(&self, _report_id: &str, _page_url: &str, _device: Device) -> Option<String> {
        None
    }
}

/// Writes an SVG placeholder sized to the device viewport
#[derive(Debug, Clone)]
pub struct PlaceholderScreenshots {
    directory: PathBuf,
}

impl PlaceholderScreenshots {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// File name for a unit: report id, a short URL digest, and the device
    fn file_name(report_id: &str, page_url: &str, device: Device) -> String {
        let digest = hex::encode(Sha256::digest(page_url.as_bytes()));
        let report: String = report_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{}_{}_{}.svg", report, &digest[..16], device.as_str())
    }

    fn render(page_url: &str, device: Device) -> String {
        let viewport = device.viewport();
        let label = page_url
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
                "<rect width=\"100%\" height=\"100%\" fill=\"#f0f0f0\"/>",
                "<text x=\"50%\" y=\"45%\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"24\" fill=\"#666\">",
                "Screenshot unavailable ({device} {w}x{h})</text>",
                "<text x=\"50%\" y=\"55%\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\" fill=\"#999\">{label}</text>",
                "</svg>"
            ),
            w = viewport.width,
            h = viewport.height,
            device = device.as_str(),
            label = label,
        )
    }
}

impl ScreenshotProvider for PlaceholderScreenshots {
    fn capture(&self, report_id: &str, page_url: &str, device: Device) -> Option<String> {
        if let Err(e) = std::fs::create_dir_all(&self.directory) {
            warn!(
                "Cannot create screenshot directory {}: {}",
                self.directory.display(),
                e
            );
            return None;
        }

        let path = self
            .directory
            .join(Self::file_name(report_id, page_url, device));
        match std::fs::write(&path, Self::render(page_url, device)) {
            Ok(()) => {
                debug!("Wrote placeholder screenshot {}", path.display());
                Some(path.to_string_lossy().into_owned())
            }
            Err(e) => {
                warn!("Failed to write placeholder {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Selects the screenshot collaborator named by the configuration
pub fn screenshots_from_config(config: &ScreenshotConfig) -> Arc<dyn ScreenshotProvider> {
    match (config.mode, &config.directory) {
        (ScreenshotMode::Placeholder, Some(directory)) => {
            Arc::new(PlaceholderScreenshots::new(directory))
        }
        _ => Arc::new(NoScreenshots),
    }
}

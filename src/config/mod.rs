//! Configuration module for the audit engine
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use a11y_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Scanning with {} workers", config.scanner.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, ScannerConfig, ScreenshotConfig, ScreenshotMode, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, hash_config, load_config, load_config_with_hash, parse_config};
pub use validation::{validate_page_budget, MAX_PAGE_BUDGET};

use crate::model::Device;
use crate::ConfigError;

impl Config {
    /// Resolves the configured device names into device profiles, in configured order
    pub fn devices(&self) -> Result<Vec<Device>, ConfigError> {
        self.scanner
            .devices
            .iter()
            .map(|name| {
                Device::from_name(name).ok_or_else(|| ConfigError::UnknownDevice(name.clone()))
            })
            .collect()
    }

    /// Formats the User-Agent header sent with every fetch
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.user_agent.name, self.user_agent.version, self.user_agent.contact_url
        )
    }
}

#[cfg(test)]
pub(crate) fn test_config(database_path: &str) -> Config {
    Config {
        scanner: ScannerConfig {
            default_page_budget: 5,
            request_timeout_secs: 5,
            workers: 1,
            devices: vec![
                "desktop".to_string(),
                "tablet".to_string(),
                "mobile".to_string(),
            ],
            preview_issue_limit: 5,
        },
        user_agent: UserAgentConfig {
            name: "TestAuditor".to_string(),
            version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
        },
        output: OutputConfig {
            database_path: database_path.to_string(),
            report_dir: "./reports".to_string(),
        },
        screenshots: ScreenshotConfig::default(),
    }
}

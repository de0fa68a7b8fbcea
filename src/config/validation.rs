use crate::config::types::{
    Config, OutputConfig, ScannerConfig, ScreenshotConfig, ScreenshotMode, UserAgentConfig,
};
use crate::model::Device;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Largest page budget a single scan may request
pub const MAX_PAGE_BUDGET: usize = 100;

/// Largest worker pool the scanner will run
pub const MAX_WORKERS: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scanner_config(&config.scanner)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_screenshot_config(&config.screenshots)?;
    Ok(())
}

/// Validates scanner configuration
fn validate_scanner_config(config: &ScannerConfig) -> Result<(), ConfigError> {
    if config.default_page_budget < 1 || config.default_page_budget > MAX_PAGE_BUDGET {
        return Err(ConfigError::Validation(format!(
            "default_page_budget must be between 1 and {}, got {}",
            MAX_PAGE_BUDGET, config.default_page_budget
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.devices.is_empty() {
        return Err(ConfigError::Validation(
            "at least one device must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for name in &config.devices {
        if Device::from_name(name).is_none() {
            return Err(ConfigError::UnknownDevice(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "device '{}' is listed more than once",
                name
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "user agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent version cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.report_dir.is_empty() {
        return Err(ConfigError::Validation(
            "report_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates screenshot configuration
fn validate_screenshot_config(config: &ScreenshotConfig) -> Result<(), ConfigError> {
    if config.mode == ScreenshotMode::Placeholder
        && config.directory.as_deref().map_or(true, str::is_empty)
    {
        return Err(ConfigError::Validation(
            "screenshots.directory is required when mode is \"placeholder\"".to_string(),
        ));
    }

    Ok(())
}

/// Validates a page budget supplied at scan time
pub fn validate_page_budget(budget: usize) -> Result<(), ConfigError> {
    if budget < 1 || budget > MAX_PAGE_BUDGET {
        return Err(ConfigError::Validation(format!(
            "page budget must be between 1 and {}, got {}",
            MAX_PAGE_BUDGET, budget
        )));
    }
    Ok(())
}

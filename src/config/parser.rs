use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates configuration text
///
/// # Examples
///
/// ```
/// use a11y_audit::config::parse_config;
///
/// let config = parse_config(r#"
///     [scanner]
///     workers = 2
///
///     [user-agent]
///     name = "AuditBot"
///     version = "1.0"
///     contact-url = "https://example.com/about"
///
///     [output]
///     database-path = "./audit.db"
///     report-dir = "./reports"
/// "#).unwrap();
/// assert_eq!(config.scanner.workers, 2);
/// assert_eq!(config.scanner.default_page_budget, 5);
/// ```
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of configuration text
pub fn hash_config(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads, parses and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - The validated configuration
/// * `Err(ConfigError)` - The file could not be read, parsed, or validated
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Computes the hash recorded on reports for the configuration at `path`
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    Ok(hash_config(&std::fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of exactly the bytes parsed
///
/// The hash is stored with every report so a rescan can tell whether the
/// configuration it runs under differs from the original scan.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_config(&content)))
}

//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. If no file exists either, returns the default configuration
//!
//! ## Environment Variables
//! - `APIM_CONNECTION_STRING_<NAME>`: connection string registered as
//!   `<NAME>` (at least one is required)
//! - `APIM_HTTP_TIMEOUT_SECS`: per-request timeout in seconds
//! - `APIM_HTTP_USER_AGENT`: overrides the default `User-Agent`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./apim.json` or `./apim.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../apim.json` or `../apim.toml` (parent directory)
//! 4. `../../apim.json` or `../../apim.toml` (grandparent directory)
//! 5. Relative to executable location

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use apim_domain::{ApiManagementError, ClientConfig, HttpSettings, Result};

use super::source::EnvConfigSource;

const TIMEOUT_VAR: &str = "APIM_HTTP_TIMEOUT_SECS";
const USER_AGENT_VAR: &str = "APIM_HTTP_USER_AGENT";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If no connection
/// string is set there, falls back to a config file, and finally to
/// [`ClientConfig::default`].
///
/// # Errors
/// Returns `ApiManagementError::Config` if a config file exists but
/// cannot be read or parsed.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration found, using defaults");
                    Ok(ClientConfig::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// Every `APIM_CONNECTION_STRING_<NAME>` variable becomes a named
/// connection string. Names are stored in their sanitized variable form;
/// [`ClientConfig::connection_string`] still resolves the original
/// spelling (`staging.apim-eu` for `..._STAGING_APIM_EU`).
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `ApiManagementError::Config` if no connection string variable
/// is set or the timeout is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let connection_strings: BTreeMap<String, String> = std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(EnvConfigSource::PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value))
        })
        .collect();

    if connection_strings.is_empty() {
        return Err(ApiManagementError::Config(format!(
            "Missing required environment variable: {}<NAME>",
            EnvConfigSource::PREFIX
        )));
    }

    let mut http = HttpSettings::default();
    if let Ok(timeout) = std::env::var(TIMEOUT_VAR) {
        http.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| ApiManagementError::Config(format!("Invalid HTTP timeout: {}", e)))?;
    }
    http.user_agent = std::env::var(USER_AGENT_VAR).ok();

    Ok(ClientConfig { connection_strings, http })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ApiManagementError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApiManagementError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApiManagementError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApiManagementError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `ApiManagementError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApiManagementError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApiManagementError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ApiManagementError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parents (up to 2 levels)
/// and the executable's directory for `apim.{json,toml}` and
/// `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("apim.json"),
        dir.join("apim.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../apim.json"),
        dir.join("../apim.toml"),
        dir.join("../../apim.json"),
        dir.join("../../apim.toml"),
    ]
}

//! Client configuration structures
//!
//! Named connection strings plus transport settings. Loaded from the
//! environment or from a JSON/TOML file by the infra config loader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CONNECTION_NAME;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Connection strings keyed by configuration name
    #[serde(default)]
    pub connection_strings: BTreeMap<String, String>,
    #[serde(default)]
    pub http: HttpSettings,
}

impl ClientConfig {
    /// Look up a named connection string; names compare case-insensitively.
    ///
    /// Names loaded from the environment only keep their sanitized form
    /// (see [`sanitize_name`]), so a lookup that misses falls back to
    /// comparing sanitized names: `staging.apim-eu` finds `STAGING_APIM_EU`.
    pub fn connection_string(&self, name: &str) -> Option<&str> {
        self.connection_strings
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .or_else(|| {
                let wanted = sanitize_name(name);
                self.connection_strings.iter().find(|(key, _)| sanitize_name(key) == wanted)
            })
            .map(|(_, value)| value.as_str())
    }

    /// The connection string registered under the default name
    pub fn default_connection_string(&self) -> Option<&str> {
        self.connection_string(DEFAULT_CONNECTION_NAME)
    }
}

/// Upper-cases `name` and replaces every non-alphanumeric character
/// with `_`, the form a name takes in an environment variable.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

/// Transport settings for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Overrides the default `User-Agent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs(), user_agent: None }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

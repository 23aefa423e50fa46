//! Connection string sources
//!
//! A connection string handed to the client is either a raw descriptor
//! (`uri=...;identifier=...`) or the name of one registered with a
//! [`ConfigSource`]. Names are looked up first; anything not found is
//! treated as a raw descriptor.

use std::collections::HashMap;

use apim_domain::{sanitize_name, ApiManagementError, ClientConfig, Result};

/// External configuration collaborator: named connection strings.
pub trait ConfigSource: Send + Sync {
    /// The connection string registered under `name`, if any.
    fn connection_string(&self, name: &str) -> Option<String>;
}

impl ConfigSource for ClientConfig {
    fn connection_string(&self, name: &str) -> Option<String> {
        ClientConfig::connection_string(self, name).map(str::to_string)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for std::sync::Arc<T> {
    fn connection_string(&self, name: &str) -> Option<String> {
        (**self).connection_string(name)
    }
}

/// Reads `APIM_CONNECTION_STRING_<NAME>` from the process environment.
///
/// The name is upper-cased and every non-alphanumeric character becomes
/// `_`, so `ApiManagement` reads `APIM_CONNECTION_STRING_APIMANAGEMENT`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub const PREFIX: &'static str = "APIM_CONNECTION_STRING_";

    pub fn new() -> Self {
        Self
    }

    /// Environment variable consulted for `name`
    pub fn variable_name(name: &str) -> String {
        format!("{}{}", Self::PREFIX, sanitize_name(name))
    }
}

impl ConfigSource for EnvConfigSource {
    fn connection_string(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name)).ok()
    }
}

/// In-memory source; names compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MapConfigSource {
    entries: HashMap<String, String>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, connection_string: impl Into<String>) -> Self {
        self.insert(name, connection_string);
        self
    }

    pub fn insert(&mut self, name: impl AsRef<str>, connection_string: impl Into<String>) {
        self.entries.insert(name.as_ref().to_lowercase(), connection_string.into());
    }
}

impl ConfigSource for MapConfigSource {
    fn connection_string(&self, name: &str) -> Option<String> {
        self.entries.get(&name.to_lowercase()).cloned()
    }
}

/// Consults each source in order; the first hit wins.
#[derive(Default)]
pub struct ChainedConfigSource {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ChainedConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ConfigSource for ChainedConfigSource {
    fn connection_string(&self, name: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.connection_string(name))
    }
}

/// Resolve `name_or_raw` to a raw descriptor string.
///
/// A registered name yields its connection string; anything else is
/// returned as given.
///
/// # Errors
/// Returns `InvalidArgument` if `name_or_raw` is empty or whitespace.
pub fn resolve_connection_string(source: &dyn ConfigSource, name_or_raw: &str) -> Result<String> {
    if name_or_raw.trim().is_empty() {
        return Err(ApiManagementError::invalid_argument(
            "connection string or name must not be empty",
        ));
    }

    Ok(source.connection_string(name_or_raw).unwrap_or_else(|| name_or_raw.to_string()))
}

//! Configuration loading and connection string lookup
//!
//! This module provides utilities for loading client configuration from
//! environment variables and files, and the [`ConfigSource`] seam through
//! which endpoint resolution looks up named connection strings.

pub mod loader;
pub mod source;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use source::{
    resolve_connection_string, ChainedConfigSource, ConfigSource, EnvConfigSource,
    MapConfigSource,
};

/// Serializes tests that mutate the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: once_cell::sync::Lazy<std::sync::Mutex<()>> =
    once_cell::sync::Lazy::new(|| std::sync::Mutex::new(()));

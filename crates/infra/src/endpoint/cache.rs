//! Endpoint memoization
//!
//! Resolving an endpoint parses a descriptor; callers that construct many
//! clients for the same connection share one [`Endpoint`] through an
//! [`EndpointCache`]. The cache is an ordinary value owned by the caller.

use std::sync::Arc;

use apim_domain::constants::DEFAULT_CONNECTION_NAME;
use apim_domain::Result;
use dashmap::DashMap;
use tracing::{debug, warn};

use super::core::Endpoint;
use crate::config::{resolve_connection_string, ConfigSource};

/// Thread-safe, insert-if-absent cache of resolved endpoints keyed by the
/// raw descriptor string
#[derive(Debug, Default)]
pub struct EndpointCache {
    endpoints: DashMap<String, Arc<Endpoint>>,
}

impl EndpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a connection string name or raw descriptor to an endpoint
    ///
    /// Names registered with `source` are looked up first. A descriptor
    /// that cannot be turned into an endpoint resolves to `None` and is
    /// not cached. Concurrent first resolutions of the same descriptor
    /// all observe the instance inserted first.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `name_or_raw` is empty.
    pub fn resolve(
        &self,
        source: &dyn ConfigSource,
        name_or_raw: &str,
    ) -> Result<Option<Arc<Endpoint>>> {
        let raw = resolve_connection_string(source, name_or_raw)?;

        if let Some(endpoint) = self.endpoints.get(&raw) {
            return Ok(Some(Arc::clone(endpoint.value())));
        }

        let endpoint = match Endpoint::from_connection_string(&raw) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(error = %e, "endpoint resolution failed");
                return Ok(None);
            }
        };

        let entry = self.endpoints.entry(raw).or_insert_with(|| Arc::new(endpoint));
        debug!(endpoint = %entry.value(), "endpoint resolved");
        Ok(Some(Arc::clone(entry.value())))
    }

    /// Resolve the connection registered under `ApiManagement`
    ///
    /// # Errors
    /// See [`resolve`](Self::resolve).
    pub fn resolve_default(&self, source: &dyn ConfigSource) -> Result<Option<Arc<Endpoint>>> {
        self.resolve(source, DEFAULT_CONNECTION_NAME)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn clear(&self) {
        self.endpoints.clear();
    }
}

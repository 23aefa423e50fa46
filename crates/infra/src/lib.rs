//! # API Management Infrastructure
//!
//! Network- and environment-facing half of the API Management client.
//!
//! This crate contains:
//! - Configuration loading and connection string lookup
//! - Endpoint resolution, caching and access signature generation
//! - The HTTP transport and the signed-request pipeline wrapped around it
//! - The typed client for users, groups, products, APIs and operations
//! - Translation of non-success responses into structured failures
//!
//! ## Architecture
//! - Depends on `apim-domain` (data model, errors) and `apim-common`
//!   (descriptor parsing, clock)
//! - Every request issued by the typed client passes through
//!   [`http::SignedRequestLayer`] before reaching the transport

pub mod api;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiManagementClient, ApiManagementClientBuilder, EntityClient, ErrorTranslator};
pub use config::{ConfigSource, EnvConfigSource, MapConfigSource};
pub use endpoint::{Endpoint, EndpointCache};
pub use http::{HttpClient, HttpSend, SignedRequestLayer};

//! Typed API Management client
//!
//! The client surface: per-collection entity operations, document import,
//! raw verbs through the signing pipeline, and translation of failed
//! responses into structured errors.

pub mod client;
pub mod entities;
pub mod errors;

pub use client::{ApiManagementClient, ApiManagementClientBuilder};
pub use entities::EntityClient;
pub use errors::ErrorTranslator;

//! Endpoint resolution and request credentials

mod cache;
mod core;
pub mod token;

pub use cache::EndpointCache;
pub use self::core::Endpoint;

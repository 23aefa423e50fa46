//! # API Management Domain
//!
//! Data model for the API Management REST service.
//!
//! This crate contains:
//! - Entity schemas (User, Group, Product, Api, Operation) and their
//!   outbound property shapes
//! - The list envelope and the service error envelope
//! - Error types and Result definitions
//! - Domain constants and identifier helpers
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

#[macro_use]
pub mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::{sanitize_name, ClientConfig, HttpSettings};
pub use errors::*;
pub use types::*;
pub use utils::identifier::{normalize_id, validate_id_length};

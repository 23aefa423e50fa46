//! Infrastructure error conversions
//!
//! Domain errors live in `apim-domain`, which knows nothing about the
//! HTTP stack. [`InfraError`] carries conversions from third-party errors
//! on this side of the crate boundary.

mod conversions;

pub use conversions::InfraError;

//! Side-effect-free utilities shared across the API Management crates.
//!
//! - `descriptor`: connection string parsing into a case-insensitive
//!   property bag
//! - `time`: round-trip timestamp formatting and the `Clock` abstraction
//!   used by token caching

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod descriptor;
pub mod time;

// Re-export commonly used types
pub use descriptor::ConnectionDescriptor;
pub use time::{format_round_trip, Clock, MockClock, SystemClock};

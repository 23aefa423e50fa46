//! Time utilities
//!
//! - `clock`: wall-clock abstraction with a controllable mock for tests
//! - `format`: round-trip timestamp rendering used in signed tokens

pub mod clock;
pub mod format;

pub use clock::{Clock, MockClock, SystemClock};
pub use format::format_round_trip;

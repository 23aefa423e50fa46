//! Round-trip timestamp formatting
//!
//! Signed access tokens embed their expiry twice: once in the HMAC
//! payload and once in the `ex=` field. The service recomputes the
//! signature from the `ex=` text, so both must be rendered by the same
//! function, at full 100-nanosecond precision, in UTC.

use chrono::{DateTime, Timelike, Utc};

/// Render `instant` as `yyyy-MM-ddTHH:mm:ss.fffffffZ`
///
/// # Examples
///
/// ```
/// use apim_common::time::format::format_round_trip;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2014, 2, 14, 10, 20, 30).unwrap();
/// assert_eq!(format_round_trip(instant), "2014-02-14T10:20:30.0000000Z");
/// ```
pub fn format_round_trip(instant: DateTime<Utc>) -> String {
    // Leap seconds are reported as nanosecond >= 1e9
    let ticks = (instant.nanosecond() % 1_000_000_000) / 100;
    format!("{}.{ticks:07}Z", instant.format("%Y-%m-%dT%H:%M:%S"))
}

//! Time formatting used on the wire.
//!
//! - Signature timestamps: UTC, `yyyy-MM-ddTHH:mm:ss`, no fraction, no zone suffix
//! - Query dates: `yyyy-MM-dd`

use chrono::{DateTime, NaiveDate, Utc};

/// `strftime` pattern of the `Timestamp` signing parameter.
pub const SIGNATURE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `strftime` pattern of date query parameters such as `start-date`.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats an instant as a signature timestamp.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use htx_core::time::signature_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2017, 5, 11, 15, 19, 30).unwrap();
/// assert_eq!(signature_timestamp(at), "2017-05-11T15:19:30");
/// ```
pub fn signature_timestamp(at: DateTime<Utc>) -> String {
    at.format(SIGNATURE_TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time as a signature timestamp.
pub fn signature_timestamp_now() -> String {
    signature_timestamp(Utc::now())
}

/// Formats a date as a query parameter value.
///
/// ```rust
/// use chrono::NaiveDate;
/// use htx_core::time::format_query_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(format_query_date(date), "2024-03-09");
/// ```
pub fn format_query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

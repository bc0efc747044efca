//! Small shared helpers: unique ids and timestamp normalization.

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use uuid::Uuid;

/// Storage format for all persisted timestamps (UTC).
pub const INTERNAL_DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// Generate a hash similar to git's commit id.
pub fn unique_hash() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current instant in the user's local timezone.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Convert a datetime to the internal timezone (UTC) and drop the
/// second and sub-second components.
pub fn to_internal(dt: DateTime<FixedOffset>) -> DateTime<Utc> {
    dt.with_timezone(&Utc)
        .with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or_else(|| dt.with_timezone(&Utc))
}

/// Render a datetime in the internal storage format.
pub fn format_internal(dt: DateTime<Utc>) -> String {
    dt.format(INTERNAL_DT_FORMAT).to_string()
}

/// Parse a datetime from the internal storage format.
pub fn parse_internal(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, INTERNAL_DT_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// The current UTC offset of `canonical_timezone`, e.g. "America/Sao_Paulo".
///
/// Returns `None` if the name is not a known canonical timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    get_offset_at(canonical_timezone, OffsetDateTime::now_utc())
}

/// The UTC offset `canonical_timezone` had at `timestamp`.
///
/// Unlike [get_local_offset] this follows daylight saving changes, so dates in
/// the past are shown the way they were observed locally.
pub fn get_offset_at(canonical_timezone: &str, timestamp: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&timestamp).to_utc())
}

//! Parse-or-absent policy for timestamp filter bounds.

use crate::model::entity::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a filter bound, returning `None` for anything unparsable.
///
/// Accepted shapes: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC)
/// and `YYYY-MM-DD` (midnight UTC). A rejected value disables the bound
/// rather than failing the query.
pub fn parse_timestamp_or_absent(raw: &str) -> Option<Timestamp> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }

    debug!(
        "event=filter_skip module=filter reason=unparsable_timestamp len={}",
        trimmed.len()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp_or_absent;
    use chrono::{TimeZone, Utc};

    #[test]
    fn accepts_rfc3339_with_offset() {
        let parsed = parse_timestamp_or_absent("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn accepts_naive_datetime_and_date() {
        assert_eq!(
            parse_timestamp_or_absent("2024-05-01T08:30:00.250"),
            Some(
                Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
                    + chrono::Duration::milliseconds(250)
            )
        );
        assert_eq!(
            parse_timestamp_or_absent("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_absent() {
        assert_eq!(parse_timestamp_or_absent("last tuesday"), None);
        assert_eq!(parse_timestamp_or_absent("2024-13-45"), None);
        assert_eq!(parse_timestamp_or_absent("   "), None);
    }
}

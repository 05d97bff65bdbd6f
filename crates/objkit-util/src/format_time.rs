use std::fmt::Display;

use chrono::{Local, TimeZone};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a Unix timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Timestamps whose decimal form is longer than 10 characters are taken as
/// milliseconds, shorter ones as seconds. `0` and out-of-range values give
/// `None`.
pub fn format_time(timestamp: i64) -> Option<String> {
    format_time_in(timestamp, &Local)
}

/// [`format_time`] in an explicit time zone.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use objkit_util::format_time_in;
///
/// assert_eq!(format_time_in(1_609_459_200, &Utc).as_deref(), Some("2021-01-01 00:00:00"));
/// assert_eq!(format_time_in(1_609_459_200_000, &Utc).as_deref(), Some("2021-01-01 00:00:00"));
/// assert_eq!(format_time_in(0, &Utc), None);
/// ```
pub fn format_time_in<Tz>(timestamp: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if timestamp == 0 {
        return None;
    }
    let millis = if timestamp.to_string().len() > 10 {
        timestamp
    } else {
        timestamp.checked_mul(1000)?
    };
    let at = tz.timestamp_millis_opt(millis).single()?;
    Some(at.format(FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_seconds_and_millis() {
        assert_eq!(
            format_time_in(1_609_769_915, &Utc).as_deref(),
            Some("2021-01-04 14:18:35")
        );
        assert_eq!(
            format_time_in(1_609_769_915_123, &Utc).as_deref(),
            Some("2021-01-04 14:18:35")
        );
    }

    #[test]
    fn test_padding() {
        assert_eq!(format_time_in(1, &Utc).as_deref(), Some("1970-01-01 00:00:01"));
    }

    #[test]
    fn test_offset_zone() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            format_time_in(1_609_769_915, &tz).as_deref(),
            Some("2021-01-04 22:18:35")
        );
    }

    #[test]
    fn test_zero_and_overflow() {
        assert_eq!(format_time_in(0, &Utc), None);
        assert_eq!(format_time_in(i64::MAX, &Utc), None);
    }

    #[test]
    fn test_negative_seconds() {
        // "-100000000" has ten characters: seconds.
        assert_eq!(format_time_in(-100_000_000, &Utc).as_deref(), Some("1966-10-31 14:13:20"));
    }

    #[test]
    fn test_local_matches_some() {
        assert!(format_time(1_609_769_915).is_some());
    }
}

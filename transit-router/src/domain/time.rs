//! Service-day time handling.
//!
//! All times in the router are whole seconds since the start of a service
//! day, stored as `i32`. Hours may run past 24 for trips that continue after
//! midnight, so these values are not wall-clock times. This module parses and
//! formats them and converts them to calendar datetimes when needed.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Sentinel time for stops that cannot be used (cancelled or passed).
///
/// Consumers must check [`is_available`] before doing arithmetic on a time
/// read from a cancelled trip.
pub const UNAVAILABLE: i32 = -1;

const SECONDS_PER_MINUTE: i32 = 60;
const SECONDS_PER_HOUR: i32 = 3_600;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Returns true unless `time` is the [`UNAVAILABLE`] sentinel.
pub fn is_available(time: i32) -> bool {
    time != UNAVAILABLE
}

/// Build a service time from hour, minute and second components.
pub fn hms(hour: i32, minute: i32, second: i32) -> i32 {
    hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second
}

/// Parse a service time from "HH:MM" or "HH:MM:SS".
///
/// Hours are not capped at 23, since service days run past midnight.
///
/// # Examples
///
/// ```
/// use transit_router::domain::parse_time;
///
/// assert_eq!(parse_time("10:03:15").unwrap(), 36_195);
/// assert_eq!(parse_time("10:04").unwrap(), 36_240);
/// assert_eq!(parse_time("25:10").unwrap(), 90_600);
///
/// assert!(parse_time("1004").is_err());
/// assert!(parse_time("10:60").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<i32, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 && bytes.len() != 8 {
        return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
    }
    if bytes[2] != b':' || (bytes.len() == 8 && bytes[5] != b':') {
        return Err(TimeError::new("expected colon separators"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let second = if bytes.len() == 8 {
        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }
        second
    } else {
        0
    };

    Ok(hms(hour, minute, second))
}

/// Parse two ASCII digit bytes.
fn parse_two_digits(bytes: &[u8]) -> Option<i32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as i32)
}

/// Format a time as "HH:MM", or "HH:MM:SS" when the seconds are not zero.
///
/// # Examples
///
/// ```
/// use transit_router::domain::time_to_str_compact;
///
/// assert_eq!(time_to_str_compact(36_240), "10:04");
/// assert_eq!(time_to_str_compact(36_195), "10:03:15");
/// ```
pub fn time_to_str_compact(time: i32) -> String {
    let (sign, h, m, s) = split(time);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

/// Format a time as "HH:MM:SS".
pub fn time_to_str_long(time: i32) -> String {
    let (sign, h, m, s) = split(time);
    format!("{sign}{h:02}:{m:02}:{s:02}")
}

/// Format a duration in seconds as "2h", "3m15s", "45s", "1h0m5s".
///
/// Leading zero units are dropped and so are trailing ones, but a zero
/// minute between hours and seconds is kept so the string stays
/// unambiguous.
///
/// # Examples
///
/// ```
/// use transit_router::domain::duration_to_str;
///
/// assert_eq!(duration_to_str(7_200), "2h");
/// assert_eq!(duration_to_str(195), "3m15s");
/// assert_eq!(duration_to_str(3_605), "1h0m5s");
/// assert_eq!(duration_to_str(0), "0s");
/// ```
pub fn duration_to_str(seconds: i32) -> String {
    let (sign, h, m, s) = split(seconds);
    let body = if h != 0 {
        match (m, s) {
            (0, 0) => format!("{h}h"),
            (_, 0) => format!("{h}h{m}m"),
            _ => format!("{h}h{m}m{s}s"),
        }
    } else if m != 0 {
        if s == 0 {
            format!("{m}m")
        } else {
            format!("{m}m{s}s")
        }
    } else {
        format!("{s}s")
    };
    format!("{sign}{body}")
}

fn split(seconds: i32) -> (&'static str, i32, i32, i32) {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs() as i32;
    (
        sign,
        abs / SECONDS_PER_HOUR,
        (abs / SECONDS_PER_MINUTE) % 60,
        abs % SECONDS_PER_MINUTE,
    )
}

/// Convert a service time to a calendar datetime on the given service date.
///
/// The service-day epoch is midnight at the start of `service_date`. Times
/// past 24:00 land on the following calendar day. Returns `None` for the
/// [`UNAVAILABLE`] sentinel.
///
/// # Examples
///
/// ```
/// use transit_router::domain::to_datetime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let dt = to_datetime(date, 25 * 3_600).unwrap();
/// assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
/// ```
pub fn to_datetime(service_date: NaiveDate, time: i32) -> Option<NaiveDateTime> {
    if !is_available(time) {
        return None;
    }
    service_date
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(i64::from(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_time("00:00").unwrap(), 0);
        assert_eq!(parse_time("10:00").unwrap(), 36_000);
        assert_eq!(parse_time("10:03:15").unwrap(), 36_195);
        assert_eq!(parse_time("23:59:59").unwrap(), 86_399);
        assert_eq!(parse_time("47:00").unwrap(), 47 * 3_600);
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong length
        assert!(parse_time("1430").is_err());
        assert!(parse_time("14:3").is_err());
        assert!(parse_time("14:30:1").is_err());

        // Missing colon
        assert!(parse_time("14-30").is_err());
        assert!(parse_time("14:30.15").is_err());

        // Non-digit characters
        assert!(parse_time("ab:cd").is_err());
        assert!(parse_time("1a:30").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("12:30:60").is_err());
    }

    #[test]
    fn error_display() {
        let err = parse_time("12:60").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn compact_format() {
        assert_eq!(time_to_str_compact(hms(10, 4, 0)), "10:04");
        assert_eq!(time_to_str_compact(hms(10, 35, 15)), "10:35:15");
        assert_eq!(time_to_str_compact(hms(25, 1, 0)), "25:01");
    }

    #[test]
    fn long_format() {
        assert_eq!(time_to_str_long(hms(10, 0, 0)), "10:00:00");
        assert_eq!(time_to_str_long(hms(12, 0, 0)), "12:00:00");
        assert_eq!(time_to_str_long(hms(9, 5, 7)), "09:05:07");
    }

    #[test]
    fn negative_time_format() {
        assert_eq!(time_to_str_long(-90), "-00:01:30");
        assert_eq!(duration_to_str(-195), "-3m15s");
    }

    #[test]
    fn duration_format() {
        assert_eq!(duration_to_str(0), "0s");
        assert_eq!(duration_to_str(45), "45s");
        assert_eq!(duration_to_str(180), "3m");
        assert_eq!(duration_to_str(225), "3m45s");
        assert_eq!(duration_to_str(465), "7m45s");
        assert_eq!(duration_to_str(7_200), "2h");
        assert_eq!(duration_to_str(3_720), "1h2m");
        assert_eq!(duration_to_str(3_723), "1h2m3s");
    }

    #[test]
    fn unavailable_sentinel() {
        assert!(!is_available(UNAVAILABLE));
        assert!(is_available(0));
        assert!(is_available(hms(10, 0, 0)));
    }

    #[test]
    fn datetime_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let dt = to_datetime(date, hms(10, 3, 15)).unwrap();
        assert_eq!(dt.to_string(), "2024-03-15 10:03:15");

        let dt = to_datetime(date, hms(24, 30, 0)).unwrap();
        assert_eq!(dt.to_string(), "2024-03-16 00:30:00");

        assert!(to_datetime(date, UNAVAILABLE).is_none());
    }
}

//! Time-of-day handling for journeys.
//!
//! Journeys carry their departure and arrival times as "HH:MM" strings
//! exactly as the journey screens wrote them. This module parses those
//! strings into minute values when the matcher needs to compare them; the
//! original strings are never rewritten.

use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};

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

/// A 24-hour time of day with minute precision.
///
/// # Examples
///
/// ```
/// use match_server::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("08:25").unwrap();
/// assert_eq!(time.minutes_since_midnight(), 8 * 60 + 25);
/// assert_eq!(time.to_string(), "08:25");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use match_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0800").is_err());
    /// assert!(ClockTime::parse_hhmm("8:00").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        // Must be exactly 5 characters: HH:MM
        if bytes.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Create a time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes since midnight, `60 * HH + MM`.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Absolute difference between two times of day.
    ///
    /// Times are compared within the same day: 23:50 and 00:10 are
    /// 1420 minutes apart, not 20.
    pub fn abs_diff(&self, other: Self) -> Duration {
        let a = i64::from(self.minutes_since_midnight());
        let b = i64::from(other.minutes_since_midnight());
        Duration::minutes((a - b).abs())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_times_parse_to_same_minutes(hour in 0u32..24, minute in 0u32..60) {
            let s = format!("{hour:02}:{minute:02}");
            let parsed = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(parsed.minutes_since_midnight(), hour * 60 + minute);
            prop_assert_eq!(parsed.to_string(), s);
        }

        #[test]
        fn arbitrary_strings_never_panic(s in "\\PC{0,8}") {
            let _ = ClockTime::parse_hhmm(&s);
        }

        #[test]
        fn abs_diff_bounded_by_day(a in 0u32..1440, b in 0u32..1440) {
            let ta = ClockTime::from_hm(a / 60, a % 60).unwrap();
            let tb = ClockTime::from_hm(b / 60, b % 60).unwrap();
            let diff = ta.abs_diff(tb).num_minutes();
            prop_assert!((0..1440).contains(&diff));
            prop_assert_eq!(diff, i64::from(a.abs_diff(b)));
        }
    }
}

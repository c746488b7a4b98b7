//! Service-day time handling.
//!
//! Schedules give times as "HH:MM:SS" strings measured from midnight at the
//! start of the service day. Hours may run past 23 for trips that continue
//! after midnight, so "25:30:00" is 01:30 the following morning but still
//! belongs to the same service day. Times are plain monotone second counts:
//! there is no wraparound, and "25:30:00" always sorts after "23:45:00".

use chrono::Duration;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Seconds since midnight of the service day.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::ServiceTime;
///
/// let late = ServiceTime::parse("23:45:00").unwrap();
/// let overnight = ServiceTime::parse("25:30:00").unwrap();
/// assert!(overnight > late);
/// assert_eq!(overnight.to_string(), "25:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Midnight at the start of the service day.
    pub const MIDNIGHT: Self = Self(0);

    /// Create a time from a raw second count.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Create a time from hour, minute and second components.
    ///
    /// Returns `None` if minutes or seconds are out of range or the total
    /// overflows.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes > 59 || seconds > 59 {
            return None;
        }
        hours
            .checked_mul(3600)?
            .checked_add(minutes * 60 + seconds)
            .map(Self)
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// The hour field may have any number of digits and may exceed 23.
    /// Surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::ServiceTime;
    ///
    /// assert_eq!(ServiceTime::parse("08:15:00").unwrap().as_secs(), 8 * 3600 + 15 * 60);
    /// assert!(ServiceTime::parse("7:05:09").is_ok());
    /// assert!(ServiceTime::parse("26:00:00").is_ok());
    ///
    /// assert!(ServiceTime::parse("08:15").is_err());
    /// assert!(ServiceTime::parse("08:15:00:00").is_err());
    /// assert!(ServiceTime::parse("08:xx:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(':');

        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new(s, "expected HH:MM:SS format"));
        };

        let hours = parse_digits(h).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        let minutes =
            parse_digits(m).ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        let seconds =
            parse_digits(sec).ok_or_else(|| TimeError::new(s, "invalid second digits"))?;

        if minutes > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }
        if seconds > 59 {
            return Err(TimeError::new(s, "second must be 0-59"));
        }

        Self::from_hms(hours, minutes, seconds)
            .ok_or_else(|| TimeError::new(s, "time out of range"))
    }

    /// Returns the number of seconds since midnight.
    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns the hour, which may be 24 or more for overnight service.
    pub fn hours(&self) -> u32 {
        self.0 / 3600
    }

    /// Returns the minute (0-59).
    pub fn minutes(&self) -> u32 {
        (self.0 % 3600) / 60
    }

    /// Returns the second (0-59).
    pub fn seconds(&self) -> u32 {
        self.0 % 60
    }

    /// Add a duration, returning `None` on overflow or if the result would
    /// fall before midnight.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let secs = i64::from(self.0).checked_add(duration.num_seconds())?;
        u32::try_from(secs).ok().map(Self)
    }

    /// Add a duration, clamping to the representable range.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let secs = i64::from(self.0).saturating_add(duration.num_seconds());
        Self(secs.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(other.0))
    }
}

impl Add<Duration> for ServiceTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl FromStr for ServiceTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

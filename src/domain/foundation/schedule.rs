//! Calendar and clock value objects used by the scheduling engine.
//!
//! A session's date is persisted as the absolute instant of midnight of
//! that date in a fixed reference timezone. "Which calendar day is this
//! session on" therefore depends on the viewer's timezone, and queries
//! bucket stored instants with [`DayRange`].

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Timestamp, ValidationError};

/// Parses an IANA timezone name (e.g. `America/Bogota`).
///
/// # Errors
///
/// - `InvalidFormat` for anything the tz database does not know
pub fn parse_timezone(name: &str) -> Result<Tz, ValidationError> {
    name.parse::<Tz>()
        .map_err(|_| ValidationError::invalid_format("timezone", format!("unknown IANA name '{}'", name)))
}

/// A calendar date with no attached timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parses a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if blank
    /// - `InvalidFormat` for anything that is not a real calendar date
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("date"));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD"))
    }

    /// Creates a CalendarDate from a NaiveDate.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner NaiveDate.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The instant of this date's midnight in the given timezone.
    ///
    /// This is how session dates are persisted: midnight in the configured
    /// reference timezone, as an absolute UTC instant.
    pub fn midnight_in(&self, tz: Tz) -> Timestamp {
        Timestamp::from_datetime(earliest_midnight(self.0, tz))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A wall-clock time of day in 24-hour `HH:MM` form, no timezone.
///
/// Ordering is derived on (hour, minute), which matches lexical comparison
/// of the fixed-width rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClockTime {
    hour: u8,
    minute: u8,
}

impl WallClockTime {
    /// Creates a wall-clock time from components.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if hour > 23 or minute > 59
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, hour as i32));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range("minute", 0, 59, minute as i32));
        }
        Ok(Self { hour, minute })
    }

    /// Parses a strict `HH:MM` string (two digits, colon, two digits).
    ///
    /// # Errors
    ///
    /// - `EmptyField` if blank
    /// - `InvalidFormat` / `OutOfRange` otherwise
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("time"));
        }
        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        if !well_formed {
            return Err(ValidationError::invalid_format("time", "expected HH:MM"));
        }

        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        Self::new(hour, minute)
    }

    /// Returns the hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Converts to a chrono NaiveTime for database binding.
    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Reconstitutes from a NaiveTime read back from storage.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for WallClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WallClockTime> for String {
    fn from(value: WallClockTime) -> Self {
        value.to_string()
    }
}

/// Half-open instant range `[start, end)` covering one calendar day in one
/// timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    start: Timestamp,
    end: Timestamp,
}

impl DayRange {
    /// Computes the day boundaries for `date` as seen from `tz`.
    pub fn of(date: CalendarDate, tz: Tz) -> Self {
        let start = earliest_midnight(date.as_naive(), tz);
        let end = earliest_midnight(date.as_naive() + Duration::days(1), tz);
        Self {
            start: Timestamp::from_datetime(start),
            end: Timestamp::from_datetime(end),
        }
    }

    /// Start of day (inclusive).
    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    /// End of day (exclusive).
    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    /// Whether an instant falls on this day.
    pub fn contains(&self, instant: &Timestamp) -> bool {
        instant >= &self.start && instant < &self.end
    }
}

/// The earliest valid instant of `date`'s midnight in `tz`.
///
/// DST transitions can make local midnight ambiguous (fall back) or
/// nonexistent (spring forward). Ambiguity resolves to the earlier
/// instant; a gap resolves to the first representable local time after it.
fn earliest_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let mut local = date.and_hms_opt(0, 0, 0).expect("midnight is always a valid time");
    loop {
        if let Some(dt) = tz.from_local_datetime(&local).earliest() {
            return dt.with_timezone(&Utc);
        }
        // Inside a DST gap; gaps are at most a few hours, step past in
        // quarter-hour increments.
        local += Duration::minutes(15);
    }
}

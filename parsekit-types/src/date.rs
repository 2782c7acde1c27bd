//! Date values with an explicit "invalid" state.
//!
//! A date is stored as milliseconds since the Unix epoch. Timestamps that are
//! NaN, infinite, or beyond ±8.64e15 ms are kept as-is but
//! report themselves invalid, so the encoder can reject them instead of
//! emitting a malformed ISO string.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Largest absolute timestamp (ms) a date may carry.
const MAX_TIME_MS: f64 = 8.64e15;

/// A point in time, possibly invalid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ParseDate {
    millis: f64,
}

impl ParseDate {
    /// Creates a date from milliseconds since the Unix epoch.
    ///
    /// Fractional milliseconds are truncated toward zero.
    #[must_use]
    pub fn from_millis(millis: f64) -> Self {
        Self {
            millis: millis.trunc(),
        }
    }

    /// Creates a date at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Creates an invalid date (NaN timestamp).
    #[must_use]
    pub const fn invalid() -> Self {
        Self { millis: f64::NAN }
    }

    /// Returns the raw timestamp in milliseconds.
    #[must_use]
    pub const fn millis(&self) -> f64 {
        self.millis
    }

    /// Returns true if the timestamp is finite and within ±8.64e15 ms.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.millis.is_finite() && self.millis.abs() <= MAX_TIME_MS
    }

    /// Converts to a `chrono` datetime.
    ///
    /// `None` if invalid or beyond chrono's range (about ±262,000 years),
    /// which is narrower than the valid range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        DateTime::from_timestamp_millis(self.millis as i64)
    }

    /// Formats as ISO-8601 with millisecond precision (`2015-02-03T10:20:30.000Z`).
    ///
    /// Years outside `0..=9999` use the expanded six-digit form with an
    /// explicit sign (`+010000-01-01T00:00:00.000Z`, `-000001-…`).
    #[must_use]
    pub fn iso(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let millis = self.millis as i64;
        let (year, month, day) = civil_from_days(millis.div_euclid(MS_PER_DAY));
        let ms_of_day = millis.rem_euclid(MS_PER_DAY);
        let hour = ms_of_day / 3_600_000;
        let minute = ms_of_day / 60_000 % 60;
        let second = ms_of_day / 1000 % 60;
        let ms = ms_of_day % 1000;

        let year = match year {
            0..=9999 => format!("{year:04}"),
            y if y < 0 => format!("-{:06}", -y),
            y => format!("+{y:06}"),
        };
        Some(format!(
            "{year}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{ms:03}Z"
        ))
    }
}

const MS_PER_DAY: i64 = 86_400_000;

/// Proleptic Gregorian `(year, month, day)` for a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

impl From<DateTime<Utc>> for ParseDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            millis: dt.timestamp_millis() as f64,
        }
    }
}

impl fmt::Display for ParseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iso() {
            Some(iso) => f.write_str(&iso),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl FromStr for ParseDate {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| crate::Error::InvalidDate(format!("{s}: {e}")))?;
        Ok(Self::from(dt.with_timezone(&Utc)))
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstantError {
    #[error("invalid ISO-8601 timestamp: {input:?}")]
    Parse { input: String },
    #[error("epoch milliseconds out of range: {0}")]
    OutOfRange(i64),
}

/// The accepted ways of naming a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantSource {
    DateTime(DateTime<Utc>),
    Iso(String),
    EpochMillis(i64),
}

/// An absolute point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt))
    }

    pub fn from_epoch_millis(millis: i64) -> Result<Self, InstantError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self)
            .ok_or(InstantError::OutOfRange(millis))
    }

    /// Parse an ISO-8601 string.
    ///
    /// Accepts RFC 3339 with an offset, a naive date-time (interpreted in the
    /// local zone), or a bare date (interpreted as UTC midnight).
    pub fn parse(input: &str) -> Result<Self, InstantError> {
        let trimmed = input.trim();
        let err = || InstantError::Parse {
            input: input.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                let local = Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(err)?;
                return Ok(Self::from_datetime(local.with_timezone(&Utc)));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(err)?;
            return Ok(Self::from_datetime(Utc.from_utc_datetime(&midnight)));
        }

        Err(err())
    }

    /// Parse command-line style input: all digits (optionally signed) is epoch
    /// milliseconds, anything else is ISO-8601.
    pub fn parse_loose(input: &str) -> Result<Self, InstantError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let millis = trimmed.parse::<i64>().map_err(|_| InstantError::Parse {
                input: input.to_string(),
            })?;
            return Self::from_epoch_millis(millis);
        }
        Self::parse(trimmed)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// `YYYY-MM-DDTHH:MM:SS.sssZ`, always UTC.
    pub fn to_iso_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// Human-readable form in the host's local zone, e.g. `3/14/2025, 9:26:53 AM`.
    pub fn to_locale_string(&self) -> String {
        self.0
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    }

    pub fn checked_add_secs(&self, secs: i64) -> Option<Self> {
        chrono::Duration::try_seconds(secs)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl TryFrom<InstantSource> for Instant {
    type Error = InstantError;

    fn try_from(source: InstantSource) -> Result<Self, Self::Error> {
        match source {
            InstantSource::DateTime(dt) => Ok(Self::from_datetime(dt)),
            InstantSource::Iso(s) => Self::parse(&s),
            InstantSource::EpochMillis(ms) => Self::from_epoch_millis(ms),
        }
    }
}

impl FromStr for Instant {
    type Err = InstantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_millis() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let instant = Instant::from_datetime(dt);
        assert_eq!(instant.epoch_millis(), 1_700_000_000_123);
        assert_eq!(instant.as_datetime().timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn iso_string_has_millis_and_z() {
        let instant = Instant::from_epoch_millis(0).unwrap();
        assert_eq!(instant.to_iso_string(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn parse_loose_treats_digits_as_epoch_millis() {
        let instant = Instant::parse_loose("1000").unwrap();
        assert_eq!(instant.epoch_millis(), 1000);
        let negative = Instant::parse_loose("-1000").unwrap();
        assert_eq!(negative.epoch_millis(), -1000);
    }
}

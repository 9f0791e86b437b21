//! The `YYYY-MM-DDTHH:MM:SS` local-time form used by the time selector input.

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

use crate::util::instant::{Instant, InstantError};

pub fn format_datetime_local(instant: &Instant) -> String {
    instant
        .as_datetime()
        .with_timezone(&Local)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Parse a selector value. Seconds are optional; the value is local time.
pub fn parse_datetime_local(input: &str) -> Result<Instant, InstantError> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|_| InstantError::Parse {
            input: input.to_string(),
        })?;

    // Nonexistent local times (DST gaps) have no mapping and are rejected.
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| InstantError::Parse {
            input: input.to_string(),
        })?;

    Ok(Instant::from_datetime(local.with_timezone(&Utc)))
}

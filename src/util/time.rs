use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::util::instant::Instant;

pub const MINUTE_SECS: u64 = 60;
pub const HOUR_SECS: u64 = 3_600;
pub const DAY_SECS: u64 = 86_400;
/// Fixed 30-day month.
pub const MONTH_SECS: u64 = 2_592_000;
/// Fixed 365-day year.
pub const YEAR_SECS: u64 = 31_536_000;

/// A contiguous range of elapsed seconds sharing one display rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl Band {
    pub fn for_elapsed(elapsed_secs: u64) -> Self {
        if elapsed_secs < MINUTE_SECS {
            Band::Seconds
        } else if elapsed_secs < HOUR_SECS {
            Band::Minutes
        } else if elapsed_secs < DAY_SECS {
            Band::Hours
        } else if elapsed_secs < MONTH_SECS {
            Band::Days
        } else if elapsed_secs < YEAR_SECS {
            Band::Months
        } else {
            Band::Years
        }
    }

    /// Length of one counted unit in this band. The seconds band re-checks
    /// every second.
    pub fn unit_secs(self) -> u64 {
        match self {
            Band::Seconds => 1,
            Band::Minutes => MINUTE_SECS,
            Band::Hours => HOUR_SECS,
            Band::Days => DAY_SECS,
            Band::Months => MONTH_SECS,
            Band::Years => YEAR_SECS,
        }
    }

    fn unit_name(self) -> &'static str {
        match self {
            Band::Seconds => "second",
            Band::Minutes => "minute",
            Band::Hours => "hour",
            Band::Days => "day",
            Band::Months => "month",
            Band::Years => "year",
        }
    }
}

/// Whole seconds from `instant` to `now`, floored. Instants in the future
/// clamp to zero.
pub fn elapsed_secs(instant: &Instant, now: DateTime<Utc>) -> u64 {
    let diff_ms = now.timestamp_millis() - instant.epoch_millis();
    u64::try_from(diff_ms.div_euclid(1000)).unwrap_or(0)
}

/// Format `instant` relative to `now`, e.g. "2 minutes ago".
pub fn format_relative_time(instant: &Instant, now: DateTime<Utc>) -> String {
    let elapsed = elapsed_secs(instant, now);
    let band = Band::for_elapsed(elapsed);

    if band == Band::Seconds {
        return "seconds ago".to_string();
    }

    let count = elapsed / band.unit_secs();
    let plural = if count > 1 { "s" } else { "" };
    format!("{} {}{} ago", count, band.unit_name(), plural)
}

/// Milliseconds until the text from [`format_relative_time`] would next change.
pub fn next_update_delay_ms(instant: &Instant, now: DateTime<Utc>) -> u64 {
    let elapsed = elapsed_secs(instant, now);
    let unit = Band::for_elapsed(elapsed).unit_secs();
    (unit - elapsed % unit) * 1000
}

/// Format against the current wall clock.
pub fn relative_time(instant: &Instant) -> String {
    format_relative_time(instant, Utc::now())
}

/// Delay until the next visible change, against the current wall clock.
pub fn next_update_delay(instant: &Instant) -> Duration {
    Duration::from_millis(next_update_delay_ms(instant, Utc::now()))
}

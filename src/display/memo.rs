use chrono::{DateTime, Utc};

use crate::util::instant::Instant;
use crate::util::time::format_relative_time;

/// True when swapping `prev` for `next` would not change the visible text
/// under `now`.
pub fn renders_same(prev: &Instant, next: &Instant, now: DateTime<Utc>) -> bool {
    prev == next || format_relative_time(prev, now) == format_relative_time(next, now)
}

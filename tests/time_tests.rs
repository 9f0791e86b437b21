use chrono::{DateTime, Duration, Utc};
use reltime::util::instant::Instant;
use reltime::util::time::{
    Band, elapsed_secs, format_relative_time, next_update_delay, next_update_delay_ms,
    relative_time,
};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn ago(secs: i64) -> Instant {
    Instant::from_datetime(now() - Duration::seconds(secs))
}

fn fmt(secs: i64) -> String {
    format_relative_time(&ago(secs), now())
}

fn delay(secs: i64) -> u64 {
    next_update_delay_ms(&ago(secs), now())
}

// --- Formatter ---

#[test]
fn test_sub_minute_is_always_seconds_ago() {
    for e in 0..60 {
        assert_eq!(fmt(e), "seconds ago", "elapsed {e}");
    }
}

#[test]
fn test_one_minute_singular() {
    for e in 60..=119 {
        assert_eq!(fmt(e), "1 minute ago", "elapsed {e}");
    }
    assert_eq!(fmt(120), "2 minutes ago");
}

#[test]
fn test_minutes_to_hours_boundary() {
    assert_eq!(fmt(3599), "59 minutes ago");
    assert_eq!(fmt(3600), "1 hour ago");
}

#[test]
fn test_hours_to_days_boundary() {
    assert_eq!(fmt(86_399), "23 hours ago");
    assert_eq!(fmt(86_400), "1 day ago");
    assert_eq!(fmt(2 * 86_400), "2 days ago");
}

#[test]
fn test_days_to_months_boundary() {
    assert_eq!(fmt(2_591_999), "29 days ago");
    assert_eq!(fmt(2_592_000), "1 month ago");
}

#[test]
fn test_months_to_years_boundary() {
    assert_eq!(fmt(31_535_999), "12 months ago");
    assert_eq!(fmt(31_536_000), "1 year ago");
    assert_eq!(fmt(2 * 31_536_000), "2 years ago");
}

#[test]
fn test_scenario_five_seconds() {
    assert_eq!(fmt(5), "seconds ago");
    assert_eq!(delay(5), 1000);
}

#[test]
fn test_scenario_125_seconds() {
    assert_eq!(fmt(125), "2 minutes ago");
    assert_eq!(delay(125), 55_000);
}

#[test]
fn test_scenario_three_hours() {
    assert_eq!(fmt(3 * 3600), "3 hours ago");
}

#[test]
fn test_scenario_ninety_days_uses_fixed_month() {
    assert_eq!(fmt(90 * 86_400), "3 months ago");
}

#[test]
fn test_sub_second_remainder_is_floored() {
    let instant = Instant::from_datetime(now() - Duration::milliseconds(59_999));
    assert_eq!(elapsed_secs(&instant, now()), 59);
    assert_eq!(format_relative_time(&instant, now()), "seconds ago");
}

#[test]
fn test_future_instant_clamps_to_zero() {
    let instant = Instant::from_datetime(now() + Duration::hours(5));
    assert_eq!(elapsed_secs(&instant, now()), 0);
    assert_eq!(format_relative_time(&instant, now()), "seconds ago");
    assert_eq!(next_update_delay_ms(&instant, now()), 1000);
}

#[test]
fn test_format_is_idempotent() {
    let instant = ago(4321);
    assert_eq!(
        format_relative_time(&instant, now()),
        format_relative_time(&instant, now())
    );
}

#[test]
fn test_band_never_decreases_as_time_advances() {
    let instant = ago(0);
    let mut last = Band::Seconds;
    let mut e: u64 = 0;
    while e < 3 * 31_536_000 {
        let band = Band::for_elapsed(elapsed_secs(
            &instant,
            now() + Duration::seconds(e as i64),
        ));
        assert!(band >= last, "band went backwards at {e}");
        last = band;
        e = e * 2 + 7;
    }
    assert_eq!(last, Band::Years);
}

// --- Scheduler ---

#[test]
fn test_delay_in_each_band() {
    assert_eq!(delay(45), 1000);
    assert_eq!(delay(65), 55_000);
    assert_eq!(delay(3600 + 10), (3600 - 10) * 1000);
    assert_eq!(delay(86_400 + 1), (86_400 - 1) * 1000);
    assert_eq!(delay(2_592_000 + 100), (2_592_000 - 100) * 1000);
    assert_eq!(delay(31_536_000 + 5), (31_536_000 - 5) * 1000);
}

#[test]
fn test_delay_lands_on_next_boundary() {
    for e in [0, 30, 59, 60, 61, 119, 3599, 3600, 86_399, 86_400, 2_591_999, 31_536_000] {
        let instant = ago(e);
        let before = format_relative_time(&instant, now());
        let d = next_update_delay_ms(&instant, now());
        assert!(d > 0);

        let at = now() + Duration::milliseconds(d as i64);
        let just_before = at - Duration::seconds(1);
        let unit = Band::for_elapsed(e as u64).unit_secs();

        if unit > 1 {
            // Text is constant until the boundary and changes exactly at it
            assert_eq!(format_relative_time(&instant, just_before), before, "elapsed {e}");
            assert_ne!(format_relative_time(&instant, at), before, "elapsed {e}");
        }
        assert_eq!(elapsed_secs(&instant, at) % unit, 0, "elapsed {e}");
    }
}

// --- Wall-clock entry points ---

#[test]
fn test_wall_clock_entry_points() {
    let instant = Instant::from_datetime(Utc::now() - Duration::days(400));
    assert_eq!(relative_time(&instant), "1 year ago");
    assert!(next_update_delay(&instant).as_millis() > 0);
}

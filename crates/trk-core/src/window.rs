//! Reporting window boundaries.
//!
//! Day and week windows are anchored at *local* midnight and converted to
//! UTC for filtering. Weeks start Monday 00:00 local time (ISO convention)
//! and are open-ended toward now; days are half-open `[midnight, midnight+1d)`.

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_midnight_to_utc(local_date: NaiveDate) -> DateTime<Utc> {
    let midnight = local_date.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    match Local.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight is rare but possible
            // Use 1am local which is guaranteed to exist
            let one_am = local_date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap());
            Local
                .from_local_datetime(&one_am)
                .unwrap()
                .with_timezone(&Utc)
        }
    }
}

/// Half-open day window `[local midnight, next local midnight)` in UTC.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let tomorrow = date + chrono::Duration::days(1);
    (local_midnight_to_utc(date), local_midnight_to_utc(tomorrow))
}

/// Start of the ISO week containing `date`: Monday 00:00 local time, in UTC.
///
/// The week window is open-ended; callers filter `start_time >= week_start`.
pub fn week_start(date: NaiveDate) -> DateTime<Utc> {
    let days_since_monday = date.weekday().num_days_from_monday();
    let monday = date - chrono::Duration::days(i64::from(days_since_monday));
    local_midnight_to_utc(monday)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_span_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        let (start, end) = day_bounds(date);

        let start_local = start.with_timezone(&Local).date_naive();
        let end_local = end.with_timezone(&Local).date_naive();

        assert_eq!(start_local, NaiveDate::from_ymd_opt(2025, 1, 29).unwrap());
        assert_eq!(end_local, NaiveDate::from_ymd_opt(2025, 1, 30).unwrap());
        assert!(start < end);
    }

    #[test]
    fn week_starts_on_monday_for_midweek_date() {
        // Jan 29, 2025 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        let start = week_start(wednesday);

        let start_local = start.with_timezone(&Local).date_naive();
        assert_eq!(start_local, NaiveDate::from_ymd_opt(2025, 1, 27).unwrap());
    }

    #[test]
    fn week_start_on_monday_is_that_monday() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let start_local = week_start(monday).with_timezone(&Local).date_naive();
        assert_eq!(start_local, monday);
    }

    #[test]
    fn week_start_on_sunday_reaches_back_six_days() {
        // Feb 2, 2025 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let start_local = week_start(sunday).with_timezone(&Local).date_naive();
        assert_eq!(start_local, NaiveDate::from_ymd_opt(2025, 1, 27).unwrap());
    }

    #[test]
    fn day_start_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let (start, _) = day_bounds(date);
        let local = start.with_timezone(&Local);
        assert_eq!(local.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }
}

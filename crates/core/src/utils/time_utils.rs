use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// The canonical timezone used for all care-day calculations.
///
/// All "what day is it" questions (watering due, streak gaps, daily resets)
/// are answered in this timezone, so that a user's day boundary does not
/// shift with the server's locale or with UTC rollover.
pub const DEFAULT_CARE_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC timestamp to a calendar date in the canonical care timezone.
pub fn care_date_from_utc(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&DEFAULT_CARE_TZ).date_naive()
}

/// Returns today's calendar date in the canonical care timezone.
pub fn care_date_today() -> NaiveDate {
    Utc::now().with_timezone(&DEFAULT_CARE_TZ).date_naive()
}

/// Whole days elapsed from `from` to `to` (negative when `to` precedes `from`).
///
/// Both dates are already midnight-truncated calendar dates, so this is an
/// exact signed day difference with no fractional rounding.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Converts a calendar date in the care timezone to the UTC instant of its
/// local midnight. Used when persisting day-granular timestamps.
pub fn care_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let local = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match DEFAULT_CARE_TZ.from_local_datetime(&local) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        chrono::LocalResult::None => Utc
            .from_utc_datetime(&local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_care_date_crosses_utc_midnight() {
        // 02:30 UTC is still the previous evening in America/New_York.
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 2, 30, 0).unwrap();
        assert_eq!(
            care_date_from_utc(ts),
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
        );
    }

    #[test]
    fn test_care_date_same_day() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap();
        assert_eq!(
            care_date_from_utc(ts),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_days_between_signs() {
        let a = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(days_between(a, b), 7);
        assert_eq!(days_between(b, a), -7);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_days_between_across_dst() {
        // US spring-forward happened on 2025-03-09; calendar-date arithmetic
        // must still count exactly one day per day.
        let a = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(days_between(a, b), 2);
    }
}

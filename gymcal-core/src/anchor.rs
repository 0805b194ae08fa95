//! Resolves the date a workout cycle starts on.

use chrono::{Datelike, Duration, NaiveDate};

use crate::weekday::Weekday;

/// The Monday a cycle starts on, given the reference date.
///
/// Monday resolves to itself, Saturday and Sunday to the following Monday
/// (two and one days ahead), and Tuesday–Friday to the next Monday.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().num_days_from_monday();
    let days_ahead = match weekday {
        0 => 0,
        5 => 2,
        6 => 1,
        _ => (7 - weekday) % 7,
    };
    today + Duration::days(i64::from(days_ahead))
}

/// First date on or after `date` that falls on `weekday`.
pub fn first_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = date.weekday().num_days_from_monday();
    let offset = (weekday.ordinal() + 7 - current) % 7;
    date + Duration::days(i64::from(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_monday_for_every_weekday() {
        // 2025-11-17 is a Monday
        let cases = [
            (date(2025, 11, 17), 0),
            (date(2025, 11, 18), 6),
            (date(2025, 11, 19), 5),
            (date(2025, 11, 20), 4),
            (date(2025, 11, 21), 3),
            (date(2025, 11, 22), 2),
            (date(2025, 11, 23), 1),
        ];

        for (today, expected_offset) in cases {
            let anchor = next_monday(today);
            assert_eq!(
                anchor.weekday(),
                chrono::Weekday::Mon,
                "anchor for {today} should be a Monday"
            );
            assert_eq!(
                (anchor - today).num_days(),
                expected_offset,
                "wrong offset for {} ({today})",
                today.weekday()
            );
        }
    }

    #[test]
    fn next_monday_crosses_year_boundary() {
        // Wednesday 2025-12-31
        assert_eq!(next_monday(date(2025, 12, 31)), date(2026, 1, 5));
    }

    #[test]
    fn first_on_or_after_same_day_and_later() {
        let monday = date(2025, 11, 17);
        assert_eq!(first_on_or_after(monday, Weekday::Mo), monday);
        assert_eq!(first_on_or_after(monday, Weekday::Th), date(2025, 11, 20));
        // Thursday looking for a Tuesday wraps into next week
        assert_eq!(
            first_on_or_after(date(2025, 11, 20), Weekday::Tu),
            date(2025, 11, 25)
        );
    }
}

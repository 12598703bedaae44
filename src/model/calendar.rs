// File: ./src/model/calendar.rs
//! Local wall-clock date arithmetic shared by the parser and the recurrence engine.
//!
//! Two month arithmetics live here on purpose. Keyword offsets ("next month",
//! "in 2 months") clamp to the end of the target month, while recurrence and
//! literal calendar dates roll overflowing days into the following month
//! (31 Jan + 1 month = 3 Mar). Everything is `checked`: out-of-range results
//! come back as `None` and callers decide what a non-result means.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(7)?)
}

/// Month offset that clamps the day to the last day of the target month.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Builds a date from a zero-based month that may lie outside 0..12 and a day
/// that may exceed the month length. Both overflow forward.
pub fn from_ymd_rollover(year: i32, month0: i64, day: u32) -> Option<NaiveDate> {
    let year = i64::from(year).checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_days(Days::new(u64::from(day.max(1) - 1)))
}

pub fn add_months_rollover(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let month0 = i64::from(dt.month0()).checked_add(months)?;
    let date = from_ymd_rollover(dt.year(), month0, dt.day())?;
    Some(date.and_time(dt.time()))
}

pub fn add_years_rollover(dt: NaiveDateTime, years: i64) -> Option<NaiveDateTime> {
    let year = i32::try_from(i64::from(dt.year()).checked_add(years)?).ok()?;
    let date = from_ymd_rollover(year, i64::from(dt.month0()), dt.day())?;
    Some(date.and_time(dt.time()))
}

/// First `target` strictly after `from`. Today never counts.
pub fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let ahead = (7 + target.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    from.checked_add_days(Days::new(u64::from(ahead)))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekday index with Sunday = 0, the convention `RecurrenceRule::day_of_week` uses.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rollover_overflows_into_next_month() {
        // 31 Feb 2026 is 3 Mar 2026
        assert_eq!(from_ymd_rollover(2026, 1, 31), Some(ymd(2026, 3, 3)));
        // Leap year: 31 Feb 2028 is 2 Mar 2028
        assert_eq!(from_ymd_rollover(2028, 1, 31), Some(ymd(2028, 3, 2)));
        // Month 12 is January of the next year
        assert_eq!(from_ymd_rollover(2026, 12, 5), Some(ymd(2027, 1, 5)));
    }

    #[test]
    fn test_month_arithmetics_differ_at_month_end() {
        let jan31 = ymd(2026, 1, 31);
        assert_eq!(add_months_clamped(jan31, 1), Some(ymd(2026, 2, 28)));

        let rolled = add_months_rollover(jan31.and_hms_opt(9, 30, 0).unwrap(), 1).unwrap();
        assert_eq!(rolled.date(), ymd(2026, 3, 3));
        assert_eq!(rolled.time(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_years_rollover_on_leap_day() {
        let leap = ymd(2028, 2, 29).and_time(NaiveTime::MIN);
        assert_eq!(add_years_rollover(leap, 1).unwrap().date(), ymd(2029, 3, 1));
        assert_eq!(add_years_rollover(leap, 4).unwrap().date(), ymd(2032, 2, 29));
    }

    #[test]
    fn test_next_weekday_is_strictly_after() {
        // 2026-10-19 is a Monday
        let monday = ymd(2026, 10, 19);
        assert_eq!(next_weekday(monday, Weekday::Mon), Some(ymd(2026, 10, 26)));
        assert_eq!(next_weekday(monday, Weekday::Tue), Some(ymd(2026, 10, 20)));
        assert_eq!(next_weekday(monday, Weekday::Sun), Some(ymd(2026, 10, 25)));
    }

    #[test]
    fn test_weekday_index_is_sunday_based() {
        assert_eq!(weekday_index(Weekday::Sun), 0);
        assert_eq!(weekday_index(Weekday::Mon), 1);
        assert_eq!(weekday_index(Weekday::Sat), 6);
        for index in 0..7 {
            assert_eq!(weekday_index(weekday_from_index(index)), index);
        }
        assert!(is_weekend(ymd(2026, 10, 24)));
        assert!(!is_weekend(ymd(2026, 10, 23)));
    }

    #[test]
    fn test_negative_day_offsets() {
        assert_eq!(add_days(ymd(2026, 3, 1), -1), Some(ymd(2026, 2, 28)));
        assert_eq!(add_weeks(ymd(2026, 3, 1), 2), Some(ymd(2026, 3, 15)));
    }
}

// File: ./src/model/recurrence.rs
use crate::model::calendar;
use crate::model::item::{DateType, Frequency, RecurrenceRule};
use chrono::{Days, NaiveDateTime};

pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Calculates the date a recurring task's successor is due, starting from
    /// `from` (the completed task's due date). Time of day is kept.
    ///
    /// Never fails. Results that fall outside chrono's calendar range leave the
    /// date unchanged.
    pub fn next_occurrence(rule: &RecurrenceRule, from: NaiveDateTime) -> NaiveDateTime {
        let interval = i64::from(rule.effective_interval());
        let next = match rule.frequency {
            Frequency::Daily => from.checked_add_days(Days::new(interval as u64)),
            Frequency::Weekly => from.checked_add_days(Days::new(7 * interval as u64)),
            // Calendar rollover applies: 31 Jan + 1 month lands on 3 Mar.
            Frequency::Monthly => calendar::add_months_rollover(from, interval),
            Frequency::Yearly => calendar::add_years_rollover(from, interval),
            // Single-day stepping; the interval does not apply to these two.
            Frequency::Weekday => Self::step_until(from, |d| !calendar::is_weekend(d.date())),
            Frequency::Weekend => Self::step_until(from, |d| calendar::is_weekend(d.date())),
            Frequency::Unknown => {
                log::warn!("Unknown recurrence frequency, advancing by one day");
                from.checked_add_days(Days::new(1))
            }
        };
        next.unwrap_or(from)
    }

    /// Advances a due date, keeping it all-day or timed as it was.
    pub fn next_due(rule: &RecurrenceRule, due: &DateType) -> DateType {
        let next = Self::next_occurrence(rule, due.timestamp());
        match due {
            DateType::AllDay(_) => DateType::AllDay(next.date()),
            DateType::Timed(_) => DateType::Timed(next),
        }
    }

    /// Successor due date for a completed task. A task that had no due date is
    /// treated as due today.
    pub fn next_due_from(
        rule: &RecurrenceRule,
        due: Option<&DateType>,
        now: NaiveDateTime,
    ) -> DateType {
        let seed = due.copied().unwrap_or(DateType::AllDay(now.date()));
        let next = Self::next_due(rule, &seed);
        log::debug!(
            "Advanced {} recurrence from {} to {}",
            rule.frequency,
            seed.format_smart(),
            next.format_smart()
        );
        next
    }

    fn step_until(
        from: NaiveDateTime,
        accept: impl Fn(NaiveDateTime) -> bool,
    ) -> Option<NaiveDateTime> {
        let mut d = from.checked_add_days(Days::new(1))?;
        // At most two rejected days in a row for either mode.
        while !accept(d) {
            d = d.checked_add_days(Days::new(1))?;
        }
        Some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_weekend_mode_from_weekday() {
        let rule = RecurrenceRule::new(Frequency::Weekend);
        // Wednesday 2026-10-21 -> Saturday 2026-10-24
        assert_eq!(
            RecurrenceEngine::next_occurrence(&rule, at(2026, 10, 21)),
            at(2026, 10, 24)
        );
        // Saturday -> Sunday
        assert_eq!(
            RecurrenceEngine::next_occurrence(&rule, at(2026, 10, 24)),
            at(2026, 10, 25)
        );
    }

    #[test]
    fn test_zero_interval_counts_as_one() {
        let rule = RecurrenceRule {
            frequency: Frequency::Daily,
            interval: 0,
            day_of_week: None,
        };
        assert_eq!(
            RecurrenceEngine::next_occurrence(&rule, at(2026, 1, 1)),
            at(2026, 1, 2)
        );
    }

    #[test]
    fn test_overflow_keeps_date() {
        let far = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        let rule = RecurrenceRule::new(Frequency::Daily);
        assert_eq!(RecurrenceEngine::next_occurrence(&rule, far), far);
    }
}

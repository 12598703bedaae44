// File: ./src/model/parser.rs
//! Quick-add text parsing.
//!
//! Every recognizer runs against the original input and records the byte span
//! it consumed. The title is what is left once all consumed spans are blanked
//! out. Recognizers run in a fixed order. Within a category the first match in
//! table order sets the value, and every other match is still blanked from the
//! title so that parsing a title again leaves it unchanged:
//!
//! 1. recurrence phrase
//! 2. time of day
//! 3. month + day literal ("26 jan", "jan 26th 2027")
//! 4. keyword offsets ("tomorrow", "in 3 weeks")
//! 5. weekday names ("friday", "next friday")
//! 6. numeric dates ("12/25", "2027-01-15")
//! 7. priority markers
//! 8. `#label` references

use crate::model::calendar;
use crate::model::item::{DateSuggestion, DateType, Label, ParsedDraft, RecurrenceRule};
use crate::model::patterns::{
    DAY_MONTH_DATE, DateOffset, ISO_DATE, KEYWORD_DATES, LABEL_TAG, MONTH_DAY_DATE,
    PRIORITY_PATTERNS, RECURRENCE_PATTERNS, RecurrenceValue, SLASH_DATE, TIME_PATTERNS,
    WEEKDAY_DATES, month_index,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::ops::Range;

type Span = Range<usize>;

/// Tracks which parts of the input were claimed by a recognizer.
struct Consumed<'a> {
    input: &'a str,
    spans: Vec<Span>,
}

impl<'a> Consumed<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            spans: Vec::new(),
        }
    }

    fn claim(&mut self, span: Span) {
        if !span.is_empty() {
            self.spans.push(span);
        }
    }

    /// Keeps the value of the first match and claims the spans of all of
    /// them, so phrases that lost to an earlier one do not linger in the title.
    fn take_first<T>(&mut self, matches: impl Iterator<Item = (T, Span)>) -> Option<T> {
        let mut first = None;
        for (value, span) in matches {
            self.claim(span);
            if first.is_none() {
                first = Some(value);
            }
        }
        first
    }

    /// Input with claimed spans replaced by a space, then whitespace-normalized.
    /// Blanking with a space keeps the words on either side of a removed
    /// fragment from fusing into a new token.
    fn title(&self) -> String {
        let mut out = String::with_capacity(self.input.len());
        for (idx, c) in self.input.char_indices() {
            if self.spans.iter().any(|s| s.contains(&idx)) {
                out.push(' ');
            } else {
                out.push(c);
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Parses one line of quick-add text against the local clock.
pub fn parse_input(input: &str, known_labels: &[Label]) -> ParsedDraft {
    parse_input_at(input, known_labels, Local::now().naive_local())
}

/// Parses one line of quick-add text as if it were typed at `now`.
///
/// Never fails: anything that is not recognised stays in the title.
pub fn parse_input_at(input: &str, known_labels: &[Label], now: NaiveDateTime) -> ParsedDraft {
    let today = now.date();
    let mut consumed = Consumed::new(input);
    let mut draft = ParsedDraft::default();

    // 1. Recurrence
    draft.recurring = consumed.take_first(recurrence_matches(input)).map(|rule| {
        log::debug!("recurrence {:?}", rule);
        rule
    });

    // 2. Time of day
    let time = consumed.take_first(time_matches(input)).map(|t| {
        log::debug!("time {}", t);
        t
    });

    // 3-6. Calendar date, first family that yields one wins
    let dates = month_date_matches(input, now)
        .chain(keyword_date_matches(input, today))
        .chain(weekday_date_matches(input, today))
        .chain(numeric_date_matches(input, today));
    let date = consumed.take_first(dates).map(|d| {
        log::debug!("date {}", d);
        d
    });

    draft.due_date = compose_due(date, time, draft.recurring.is_some(), today);
    draft.has_reminder = time.is_some();

    // 7. Priority
    if let Some(priority) = consumed.take_first(priority_matches(input)) {
        log::debug!("priority {}", priority);
        draft.priority = priority;
    }

    // 8. Labels
    for caps in LABEL_TAG.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        consumed.claim(whole.range());
        let name = &caps["name"];
        let lower = name.to_lowercase();
        match known_labels.iter().find(|l| l.name.to_lowercase() == lower) {
            Some(label) => {
                if !draft.label_ids.contains(&label.id) {
                    draft.label_ids.push(label.id.clone());
                }
            }
            None => {
                if !draft
                    .unmatched_labels
                    .iter()
                    .any(|n| n.to_lowercase() == lower)
                {
                    draft.unmatched_labels.push(name.to_string());
                }
            }
        }
    }

    // 9. Title
    draft.title = consumed.title();
    draft
}

/// Every `#tag` name in the input, in order of appearance, as typed.
pub fn extract_label_tags(input: &str) -> Vec<String> {
    LABEL_TAG
        .captures_iter(input)
        .map(|caps| caps["name"].to_string())
        .collect()
}

/// Canned date offers for a partially typed date word ("to" -> Today, Tomorrow).
pub fn date_suggestions(partial: &str, today: NaiveDate) -> Vec<DateSuggestion> {
    let needle = partial.to_lowercase();
    [("Today", 0), ("Tomorrow", 1), ("Next week", 7)]
        .into_iter()
        .filter(|(label, _)| label.to_lowercase().contains(&needle))
        .filter_map(|(label, days)| {
            Some(DateSuggestion {
                label: label.to_string(),
                date: calendar::add_days(today, days)?,
            })
        })
        .collect()
}

fn compose_due(
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    recurring: bool,
    today: NaiveDate,
) -> Option<DateType> {
    // A recurring task with no date of its own starts today.
    let date = date.or_else(|| (recurring || time.is_some()).then_some(today))?;
    Some(match time {
        Some(t) => DateType::Timed(date.and_time(t)),
        None => DateType::AllDay(date),
    })
}

// --- RECOGNIZERS ---
//
// Each recognizer yields every valid match in table order: all occurrences of
// the first pattern, then of the next. The first item is the one that counts.

fn captured_u32(caps: &Captures, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse::<u32>().ok()
}

fn whole_span(caps: &Captures) -> Option<Span> {
    caps.get(0).map(|m| m.range())
}

/// All matches of `regex` in `input` that `convert` accepts.
fn valid_matches<'a, T>(
    regex: &'a Regex,
    input: &'a str,
    convert: impl Fn(&Captures) -> Option<T> + 'a,
) -> impl Iterator<Item = (T, Span)> + 'a {
    regex
        .captures_iter(input)
        .filter_map(move |caps| Some((convert(&caps)?, whole_span(&caps)?)))
}

fn recurrence_matches(input: &str) -> impl Iterator<Item = (RecurrenceRule, Span)> + '_ {
    RECURRENCE_PATTERNS.iter().flat_map(move |pattern| {
        valid_matches(&pattern.regex, input, move |caps| match &pattern.value {
            RecurrenceValue::Fixed(rule) => Some(*rule),
            RecurrenceValue::Every(frequency) => {
                Some(RecurrenceRule::every(captured_u32(caps, "n")?, *frequency))
            }
        })
    })
}

/// Converts a typed hour/minute/meridiem to a wall-clock time.
///
/// Without am/pm, hours 1-6 are read as afternoon (13:00-18:00) while 0 and
/// 7-12 are kept, so "at 3" means 15:00.
fn normalize_time(hour: u32, minute: u32, meridiem: Option<&str>) -> Option<NaiveTime> {
    let meridiem = meridiem.map(|m| m.to_lowercase());
    let hour = match meridiem.as_deref() {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        None if (1..=6).contains(&hour) => hour + 12,
        _ => hour,
    };
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn time_matches(input: &str) -> impl Iterator<Item = (NaiveTime, Span)> + '_ {
    TIME_PATTERNS.iter().flat_map(move |regex| {
        valid_matches(regex, input, |caps| {
            let hour = captured_u32(caps, "h")?;
            let minute = match caps.name("m") {
                Some(m) => m.as_str().parse::<u32>().ok()?,
                None => 0,
            };
            normalize_time(hour, minute, caps.name("ap").map(|m| m.as_str()))
        })
    })
}

fn month_date_matches(
    input: &str,
    now: NaiveDateTime,
) -> impl Iterator<Item = (NaiveDate, Span)> + '_ {
    [&*DAY_MONTH_DATE, &*MONTH_DAY_DATE]
        .into_iter()
        .flat_map(move |regex| {
            valid_matches(regex, input, move |caps| {
                let day = captured_u32(caps, "day")?;
                let month0 = month_index(&caps["month"])?;
                if !(1..=31).contains(&day) {
                    return None;
                }
                let explicit_year = caps
                    .name("year")
                    .and_then(|y| y.as_str().parse::<i32>().ok());
                let year = explicit_year.unwrap_or(now.year());
                let mut date = calendar::from_ymd_rollover(year, i64::from(month0), day)?;
                // No year typed and its midnight already gone: the user means the next one.
                if explicit_year.is_none() && date.and_time(NaiveTime::MIN) < now {
                    date = calendar::add_years_rollover(date.and_time(NaiveTime::MIN), 1)?.date();
                }
                Some(date)
            })
        })
}

fn keyword_date_matches(
    input: &str,
    today: NaiveDate,
) -> impl Iterator<Item = (NaiveDate, Span)> + '_ {
    KEYWORD_DATES.iter().flat_map(move |keyword| {
        valid_matches(&keyword.regex, input, move |caps| {
            let amount = || captured_u32(caps, "n");
            match keyword.offset {
                DateOffset::Days(days) => calendar::add_days(today, days),
                DateOffset::Months(months) => calendar::add_months_clamped(today, months),
                DateOffset::CapturedDays => calendar::add_days(today, i64::from(amount()?)),
                DateOffset::CapturedWeeks => calendar::add_weeks(today, i64::from(amount()?)),
                DateOffset::CapturedMonths => calendar::add_months_clamped(today, amount()?),
            }
        })
    })
}

fn weekday_date_matches(
    input: &str,
    today: NaiveDate,
) -> impl Iterator<Item = (NaiveDate, Span)> + '_ {
    WEEKDAY_DATES.iter().flat_map(move |(regex, weekday)| {
        valid_matches(regex, input, move |_| calendar::next_weekday(today, *weekday))
    })
}

fn numeric_date_matches(
    input: &str,
    today: NaiveDate,
) -> impl Iterator<Item = (NaiveDate, Span)> + '_ {
    let slash = valid_matches(&SLASH_DATE, input, move |caps| {
        let year = match caps.name("y") {
            Some(y) => y.as_str().parse::<i32>().ok()?,
            None => today.year(),
        };
        NaiveDate::from_ymd_opt(year, captured_u32(caps, "m")?, captured_u32(caps, "d")?)
    });
    let iso = valid_matches(&ISO_DATE, input, |caps| {
        NaiveDate::from_ymd_opt(
            caps["y"].parse::<i32>().ok()?,
            captured_u32(caps, "m")?,
            captured_u32(caps, "d")?,
        )
    });
    slash.chain(iso)
}

fn priority_matches(input: &str) -> impl Iterator<Item = (u8, Span)> + '_ {
    PRIORITY_PATTERNS
        .iter()
        .flat_map(move |(regex, priority)| valid_matches(regex, input, move |_| Some(*priority)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_time_meridiem() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
        assert_eq!(normalize_time(12, 0, Some("am")), t(0, 0));
        assert_eq!(normalize_time(12, 0, Some("PM")), t(12, 0));
        assert_eq!(normalize_time(3, 30, Some("pm")), t(15, 30));
        assert_eq!(normalize_time(9, 0, Some("am")), t(9, 0));
    }

    #[test]
    fn test_normalize_time_without_meridiem() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0);
        assert_eq!(normalize_time(1, 0, None), t(13));
        assert_eq!(normalize_time(6, 0, None), t(18));
        assert_eq!(normalize_time(7, 0, None), t(7));
        assert_eq!(normalize_time(12, 0, None), t(12));
        assert_eq!(normalize_time(0, 0, None), t(0));
        assert_eq!(normalize_time(15, 0, None), t(15));
        assert_eq!(normalize_time(24, 0, None), None);
        assert_eq!(normalize_time(10, 60, None), None);
    }

    #[test]
    fn test_consumed_title_blanks_spans() {
        let mut c = Consumed::new("Buy  milk tomorrow #shop");
        c.claim(10..18);
        c.claim(19..24);
        assert_eq!(c.title(), "Buy milk");
    }

    #[test]
    fn test_out_of_range_time_falls_through_to_next_form() {
        // "@25" is not a time, but the later "4pm" is
        let (t, _) = time_matches("meet @25 then 4pm").next().unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
    }
}

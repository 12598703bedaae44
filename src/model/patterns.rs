// File: ./src/model/patterns.rs
//! Ordered pattern tables for quick-add parsing.
//!
//! Order inside each table is significant: the parser walks a table from the
//! top and stops at the first entry that matches anywhere in the input. It
//! does not look for the longest or leftmost match across entries.

use crate::model::calendar;
use crate::model::item::{Frequency, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, RecurrenceRule};
use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

const MONTH_NAMES: &str = "january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec";

const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

// --- RECURRENCE ---

pub enum RecurrenceValue {
    /// The rule is fully known from the phrase.
    Fixed(RecurrenceRule),
    /// Interval comes from capture group `n`.
    Every(Frequency),
}

pub struct RecurrencePattern {
    pub regex: Regex,
    pub value: RecurrenceValue,
}

pub static RECURRENCE_PATTERNS: Lazy<Vec<RecurrencePattern>> = Lazy::new(|| {
    let fixed = |pattern: &str, rule: RecurrenceRule| RecurrencePattern {
        regex: re(pattern),
        value: RecurrenceValue::Fixed(rule),
    };
    let every = |pattern: &str, frequency: Frequency| RecurrencePattern {
        regex: re(pattern),
        value: RecurrenceValue::Every(frequency),
    };

    let mut table = vec![
        fixed(
            r"(?i)\bevery\s*day\b|\bdaily\b",
            RecurrenceRule::new(Frequency::Daily),
        ),
        fixed(
            r"(?i)\bevery\s*week\b|\bweekly\b",
            RecurrenceRule::new(Frequency::Weekly),
        ),
        fixed(
            r"(?i)\bevery\s*month\b|\bmonthly\b",
            RecurrenceRule::new(Frequency::Monthly),
        ),
        fixed(
            r"(?i)\bevery\s*year\b|\byearly\b|\bannually\b",
            RecurrenceRule::new(Frequency::Yearly),
        ),
        every(r"(?i)\bevery\s*(?P<n>\d+)\s*days?\b", Frequency::Daily),
        every(r"(?i)\bevery\s*(?P<n>\d+)\s*weeks?\b", Frequency::Weekly),
        every(r"(?i)\bevery\s*(?P<n>\d+)\s*months?\b", Frequency::Monthly),
    ];

    for (name, weekday) in WEEKDAY_NAMES {
        table.push(fixed(
            &format!(r"(?i)\bevery\s*{}\b", name),
            RecurrenceRule::on_weekday(calendar::weekday_index(weekday)),
        ));
    }

    table.push(fixed(
        r"(?i)\bweekdays\b|\bevery\s*weekday\b",
        RecurrenceRule::new(Frequency::Weekday),
    ));
    table.push(fixed(
        r"(?i)\bweekends\b|\bevery\s*weekend\b",
        RecurrenceRule::new(Frequency::Weekend),
    ));
    table
});

// --- TIME OF DAY ---

/// Capture groups: `h` hour, `m` minutes (optional), `ap` am/pm (optional in
/// the first two forms, required in the last two).
pub static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // @3pm, @3:30pm, @3.30pm, @15:30, @2.30
        re(r"(?i)@(?P<h>\d{1,2})(?:[:.](?P<m>\d{2}))?(?:\s*(?P<ap>am|pm))?\b"),
        // at 3pm, at 3:30pm, at 3.30pm, at 2.30
        re(r"(?i)\bat\s+(?P<h>\d{1,2})(?:[:.](?P<m>\d{2}))?(?:\s*(?P<ap>am|pm))?\b"),
        // 3:30pm, 3.30 pm
        re(r"(?i)\b(?P<h>\d{1,2})[:.](?P<m>\d{2})\s*(?P<ap>am|pm)\b"),
        // 3pm, 9 am
        re(r"(?i)\b(?P<h>\d{1,2})\s*(?P<ap>am|pm)\b"),
    ]
});

// --- MONTH + DAY LITERALS ---

/// "26 jan", "3rd march 2027". Groups: `day`, `month`, `year`.
pub static DAY_MONTH_DATE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)\b(?P<day>\d{{1,2}})(?:st|nd|rd|th)?\s+(?P<month>{})(?:\s+(?P<year>\d{{4}}))?\b",
        MONTH_NAMES
    ))
});

/// "jan 26", "march 3rd 2027". Groups: `month`, `day`, `year`.
pub static MONTH_DAY_DATE: Lazy<Regex> = Lazy::new(|| {
    re(&format!(
        r"(?i)\b(?P<month>{})\s+(?P<day>\d{{1,2}})(?:st|nd|rd|th)?(?:\s+(?P<year>\d{{4}}))?\b",
        MONTH_NAMES
    ))
});

/// Zero-based month for a full or abbreviated English month name.
pub fn month_index(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" | "january" => Some(0),
        "feb" | "february" => Some(1),
        "mar" | "march" => Some(2),
        "apr" | "april" => Some(3),
        "may" => Some(4),
        "jun" | "june" => Some(5),
        "jul" | "july" => Some(6),
        "aug" | "august" => Some(7),
        "sep" | "sept" | "september" => Some(8),
        "oct" | "october" => Some(9),
        "nov" | "november" => Some(10),
        "dec" | "december" => Some(11),
        _ => None,
    }
}

// --- KEYWORD DATES ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOffset {
    Days(i64),
    Months(u32),
    /// Amount taken from capture group `n`.
    CapturedDays,
    CapturedWeeks,
    CapturedMonths,
}

pub struct KeywordDate {
    pub regex: Regex,
    pub offset: DateOffset,
}

pub static KEYWORD_DATES: Lazy<Vec<KeywordDate>> = Lazy::new(|| {
    let entry = |pattern: &str, offset: DateOffset| KeywordDate {
        regex: re(pattern),
        offset,
    };
    vec![
        entry(r"(?i)\btoday\b", DateOffset::Days(0)),
        entry(r"(?i)\btomorrow\b", DateOffset::Days(1)),
        entry(r"(?i)\byesterday\b", DateOffset::Days(-1)),
        entry(r"(?i)\bnext\s+week\b", DateOffset::Days(7)),
        entry(r"(?i)\bnext\s+month\b", DateOffset::Months(1)),
        entry(r"(?i)\bin\s+(?P<n>\d+)\s+days?\b", DateOffset::CapturedDays),
        entry(r"(?i)\bin\s+(?P<n>\d+)\s+weeks?\b", DateOffset::CapturedWeeks),
        entry(r"(?i)\bin\s+(?P<n>\d+)\s+months?\b", DateOffset::CapturedMonths),
    ]
});

// --- WEEKDAY NAMES ---

pub static WEEKDAY_DATES: Lazy<Vec<(Regex, Weekday)>> = Lazy::new(|| {
    WEEKDAY_NAMES
        .iter()
        .map(|(name, weekday)| (re(&format!(r"(?i)\b(?:next\s+)?{}\b", name)), *weekday))
        .collect()
});

// --- EXPLICIT NUMERIC DATES ---

/// MM/DD or MM/DD/YYYY. Groups: `m`, `d`, `y`.
pub static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| re(r"\b(?P<m>\d{1,2})/(?P<d>\d{1,2})(?:/(?P<y>\d{4}))?\b"));

/// YYYY-MM-DD. Groups: `y`, `m`, `d`.
pub static ISO_DATE: Lazy<Regex> = Lazy::new(|| re(r"\b(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})\b"));

// --- PRIORITY ---

/// Highest first. `!` must stay last or it would shadow `!!` and `!!!`.
pub static PRIORITY_PATTERNS: Lazy<Vec<(Regex, u8)>> = Lazy::new(|| {
    vec![
        (
            re(r"(?i)!{3,}|\bp1\b|\bpriority\s*1\b|\bhigh\s*priority\b|\burgent\b"),
            PRIORITY_HIGH,
        ),
        (
            re(r"(?i)!!|\bp2\b|\bpriority\s*2\b|\bmedium\s*priority\b"),
            PRIORITY_MEDIUM,
        ),
        (
            re(r"(?i)!|\bp3\b|\bpriority\s*3\b|\blow\s*priority\b"),
            PRIORITY_LOW,
        ),
    ]
});

// --- LABELS ---

pub static LABEL_TAG: Lazy<Regex> = Lazy::new(|| re(r"#(?P<name>\w+)"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile() {
        assert_eq!(RECURRENCE_PATTERNS.len(), 16);
        assert_eq!(TIME_PATTERNS.len(), 4);
        assert_eq!(KEYWORD_DATES.len(), 8);
        assert_eq!(WEEKDAY_DATES.len(), 7);
        assert_eq!(PRIORITY_PATTERNS.len(), 3);
        assert!(DAY_MONTH_DATE.is_match("26 jan"));
        assert!(MONTH_DAY_DATE.is_match("Jan 26th 2027"));
        assert!(SLASH_DATE.is_match("12/25"));
        assert!(ISO_DATE.is_match("2027-01-15"));
    }

    #[test]
    fn test_month_alternation_prefers_full_names() {
        let caps = DAY_MONTH_DATE.captures("due 3 september").unwrap();
        assert_eq!(&caps["month"], "september");
        let caps = MONTH_DAY_DATE.captures("sept 4").unwrap();
        assert_eq!(&caps["month"], "sept");
        assert_eq!(month_index("Sept"), Some(8));
        assert_eq!(month_index("smarch"), None);
    }

    #[test]
    fn test_time_forms_need_a_word_end() {
        // "at 2025" must not be read as 20:00 followed by "25"
        assert!(!TIME_PATTERNS[1].is_match("released at 2025"));
        let caps = TIME_PATTERNS[0].captures("call @3pm").unwrap();
        assert_eq!(&caps["h"], "3");
        assert_eq!(&caps["ap"], "pm");
        // "am" inside a longer word is not a meridiem
        let caps = TIME_PATTERNS[1].captures("at 3 amazing").unwrap();
        assert!(caps.name("ap").is_none());
    }

    #[test]
    fn test_single_bang_does_not_shadow_triple() {
        let first = PRIORITY_PATTERNS
            .iter()
            .find(|(regex, _)| regex.is_match("ship it!!!"))
            .map(|(_, p)| *p);
        assert_eq!(first, Some(1));
        // "p1" inside a word is not a priority
        assert!(!PRIORITY_PATTERNS[0].0.is_match("upload app1 build"));
    }
}

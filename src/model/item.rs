// File: ./src/model/item.rs
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumIter, EnumString};

pub const PRIORITY_HIGH: u8 = 1;
pub const PRIORITY_MEDIUM: u8 = 2;
pub const PRIORITY_LOW: u8 = 3;
pub const PRIORITY_NONE: u8 = 4;

fn default_priority() -> u8 {
    PRIORITY_NONE
}

fn default_interval() -> u32 {
    1
}

/// A label the user already owns, referenced from free text as `#name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

impl Label {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- DATE TYPES ---

/// A due date in local wall-clock terms.
///
/// `AllDay` is a calendar day (midnight, no reminder). `Timed` carries the
/// time-of-day the user typed, which is what enables a reminder.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum DateType {
    AllDay(NaiveDate),
    Timed(NaiveDateTime),
}

impl DateType {
    pub fn date(&self) -> NaiveDate {
        match self {
            DateType::AllDay(d) => *d,
            DateType::Timed(dt) => dt.date(),
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            DateType::AllDay(_) => None,
            DateType::Timed(dt) => Some(dt.time()),
        }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, DateType::Timed(_))
    }

    /// The instant this due date stands for. All-day dates map to local midnight.
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            DateType::AllDay(d) => d.and_time(NaiveTime::MIN),
            DateType::Timed(dt) => *dt,
        }
    }

    pub fn format_smart(&self) -> String {
        match self {
            DateType::AllDay(d) => d.format("%Y-%m-%d").to_string(),
            DateType::Timed(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

impl PartialOrd for DateType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateType {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.date().cmp(&other.date()) {
            Ordering::Equal => match (self, other) {
                // Same day: a timed deadline sorts before the all-day one
                (DateType::Timed(t1), DateType::Timed(t2)) => t1.cmp(t2),
                (DateType::Timed(_), DateType::AllDay(_)) => Ordering::Less,
                (DateType::AllDay(_), DateType::Timed(_)) => Ordering::Greater,
                (DateType::AllDay(_), DateType::AllDay(_)) => Ordering::Equal,
            },
            ord => ord,
        }
    }
}

// --- RECURRENCE ---

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Weekday,
    Weekend,
    /// Anything a store hands back that we do not recognise. Advances by one day.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            day_of_week: None,
        }
    }

    /// `every N <unit>`. An interval of zero is raised to one.
    pub fn every(interval: u32, frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: interval.max(1),
            day_of_week: None,
        }
    }

    /// Weekly on a given weekday, 0 = Sunday .. 6 = Saturday.
    pub fn on_weekday(day_of_week: u8) -> Self {
        Self {
            frequency: Frequency::Weekly,
            interval: 1,
            day_of_week: Some(day_of_week % 7),
        }
    }

    /// Interval as the advancer uses it; stored zeros count as one.
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }
}

// --- DRAFT ---

/// Structured result of parsing one line of quick-add text. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDraft {
    pub title: String,
    pub due_date: Option<DateType>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// `#tags` that matched no known label, as typed. Creating them is up to the caller.
    #[serde(default)]
    pub unmatched_labels: Vec<String>,
    #[serde(default)]
    pub has_reminder: bool,
    pub recurring: Option<RecurrenceRule>,
}

impl Default for ParsedDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            due_date: None,
            priority: PRIORITY_NONE,
            label_ids: Vec::new(),
            unmatched_labels: Vec::new(),
            has_reminder: false,
            recurring: None,
        }
    }
}

/// A canned due-date offer for a partially typed date word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSuggestion {
    pub label: String,
    pub date: NaiveDate,
}

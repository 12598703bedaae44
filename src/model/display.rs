// File: ./src/model/display.rs
use crate::model::calendar::weekday_from_index;
use crate::model::item::{
    DateType, Frequency, Label, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, ParsedDraft,
    RecurrenceRule,
};
use std::fmt;

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Frequency::Weekly, Some(dow)) = (self.frequency, self.day_of_week) {
            let name = match weekday_from_index(dow) {
                chrono::Weekday::Mon => "monday",
                chrono::Weekday::Tue => "tuesday",
                chrono::Weekday::Wed => "wednesday",
                chrono::Weekday::Thu => "thursday",
                chrono::Weekday::Fri => "friday",
                chrono::Weekday::Sat => "saturday",
                chrono::Weekday::Sun => "sunday",
            };
            return write!(f, "every {}", name);
        }

        let unit = match self.frequency {
            Frequency::Weekday => return write!(f, "weekdays"),
            Frequency::Weekend => return write!(f, "weekends"),
            Frequency::Unknown => return write!(f, "{}", self.frequency),
            Frequency::Daily => "days",
            Frequency::Weekly => "weeks",
            Frequency::Monthly => "months",
            Frequency::Yearly => "years",
        };
        match self.effective_interval() {
            1 => write!(f, "{}", self.frequency),
            n => write!(f, "every {} {}", n, unit),
        }
    }
}

pub fn priority_label(priority: u8) -> Option<&'static str> {
    match priority {
        PRIORITY_HIGH => Some("High"),
        PRIORITY_MEDIUM => Some("Medium"),
        PRIORITY_LOW => Some("Low"),
        _ => None,
    }
}

/// "Tue, Oct 20" or "Tue, Oct 20 @ 3:00 PM".
pub fn format_due(due: &DateType) -> String {
    let day = due.date().format("%a, %b %-d").to_string();
    match due.time() {
        Some(t) => format!("{} @ {}", day, t.format("%-I:%M %p")),
        None => day,
    }
}

pub trait DraftDisplay {
    fn due_label(&self) -> Option<String>;
    fn preview_line(&self, known_labels: &[Label]) -> String;
}

impl DraftDisplay for ParsedDraft {
    fn due_label(&self) -> Option<String> {
        self.due_date.as_ref().map(|d| {
            let mut s = format_due(d);
            if self.has_reminder {
                s.push_str(" (reminder)");
            }
            s
        })
    }

    fn preview_line(&self, known_labels: &[Label]) -> String {
        let mut parts = vec![if self.title.is_empty() {
            "(untitled)".to_string()
        } else {
            self.title.clone()
        }];

        if let Some(due) = self.due_label() {
            parts.push(format!("[{}]", due));
        }
        if let Some(p) = priority_label(self.priority) {
            parts.push(format!("[{}]", p));
        }
        if let Some(rule) = &self.recurring {
            parts.push(format!("[repeats {}]", rule));
        }
        for id in &self.label_ids {
            let name = known_labels
                .iter()
                .find(|l| &l.id == id)
                .map(|l| l.name.as_str())
                .unwrap_or(id.as_str());
            parts.push(format!("#{}", name));
        }
        for name in &self.unmatched_labels {
            parts.push(format!("#{} (new)", name));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_recurrence_display() {
        assert_eq!(RecurrenceRule::new(Frequency::Daily).to_string(), "daily");
        assert_eq!(
            RecurrenceRule::every(3, Frequency::Weekly).to_string(),
            "every 3 weeks"
        );
        assert_eq!(RecurrenceRule::on_weekday(1).to_string(), "every monday");
        assert_eq!(RecurrenceRule::on_weekday(0).to_string(), "every sunday");
        assert_eq!(RecurrenceRule::new(Frequency::Weekday).to_string(), "weekdays");
    }

    #[test]
    fn test_format_due() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert_eq!(format_due(&DateType::AllDay(d)), "Tue, Oct 20");
        let dt = d.and_hms_opt(15, 0, 0).unwrap();
        assert_eq!(format_due(&DateType::Timed(dt)), "Tue, Oct 20 @ 3:00 PM");
    }

    #[test]
    fn test_preview_line_marks_new_labels() {
        let draft = ParsedDraft {
            title: "Buy milk".to_string(),
            priority: 1,
            label_ids: vec!["L1".to_string()],
            unmatched_labels: vec!["dairy".to_string()],
            ..ParsedDraft::default()
        };
        let labels = vec![Label::new("L1", "Shopping")];
        assert_eq!(
            draft.preview_line(&labels),
            "Buy milk [High] #Shopping #dairy (new)"
        );
    }
}

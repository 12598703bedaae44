// File: ./src/model/mod.rs
pub mod calendar;
pub mod display;
pub mod item;
pub mod parser;
pub mod patterns;
pub mod recurrence;

pub use display::DraftDisplay;
pub use item::{DateSuggestion, DateType, Frequency, Label, ParsedDraft, RecurrenceRule};
pub use parser::{date_suggestions, extract_label_tags, parse_input, parse_input_at};
pub use recurrence::RecurrenceEngine;

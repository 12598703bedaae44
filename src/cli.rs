// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help and argument parsing.
use crate::model::calendar::weekday_index;
use crate::model::{DateType, Frequency};
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use std::str::FromStr;
use strum::IntoEnumIterator;

pub fn print_help(binary_name: &str) {
    println!(
        "Quickadd v{} - natural-language task input parser",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] parse [--json] <text...>", binary_name);
    println!(
        "    {} next <frequency> [--every <n>] [--on <weekday>] [--from <date>] [--json]",
        binary_name
    );
    println!("    {} suggest [<partial>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config.");
    println!("    --json                Print the result as JSON.");
    println!("    --every <n>           Recurrence interval (default 1).");
    println!("    --on <weekday>        Weekday of a weekly recurrence (recorded, not used to advance).");
    println!("    --from <date>         YYYY-MM-DD or \"YYYY-MM-DD HH:MM\" (default: now).");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("FREQUENCIES:");
    println!("    daily, weekly, monthly, yearly, weekday, weekend");
    println!();
    println!("INPUT SYNTAX:");
    println!("    every day, daily, every 3 weeks   Recurrence (defaults the due date to today)");
    println!("    every monday, weekdays, weekends  Recurrence on days of the week");
    println!("    @3pm, at 9:30, 2.30pm, 8am        Time of day (enables a reminder)");
    println!("    26 jan, jan 26th 2027             Calendar date (next one if already past)");
    println!("    today, tomorrow, next week        Relative dates");
    println!("    in 3 days, in 2 weeks             Relative offsets");
    println!("    friday, next friday               Next such weekday (never today)");
    println!("    12/25, 12/25/2027, 2027-12-25     Numeric dates");
    println!("    !!!, p1, urgent, high priority    Priority 1 (!!/p2 = 2, !/p3 = 3)");
    println!("    #label                            Label reference");
    println!();
    println!("    A time without am/pm between 1 and 6 is read as afternoon.");
    println!();
    println!("EXAMPLES:");
    println!("    {} parse Buy milk tomorrow #shopping p1", binary_name);
    println!("    {} parse --json Team sync every monday at 10", binary_name);
    println!("    {} next monthly --every 2 --from 2027-03-15", binary_name);
    println!("    {} suggest to", binary_name);
    println!();
    println!("CONFIG:");
    println!("    config.toml in the config directory:");
    println!("        log_level = \"warn\"");
    println!("        [[labels]]");
    println!("        id = \"L1\"");
    println!("        name = \"Shopping\"");
    println!("    QUICKADD_LOG=debug overrides log_level.");
}

/// Removes every occurrence of `flag`. Returns whether there was one.
pub fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

/// Removes `flag` and the value after it.
pub fn take_value(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let Some(idx) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    if idx + 1 >= args.len() {
        bail!("{} needs a value", flag);
    }
    let value = args.remove(idx + 1);
    args.remove(idx);
    Ok(Some(value))
}

/// `YYYY-MM-DD HH:MM` is timed, `YYYY-MM-DD` is all-day.
pub fn parse_from_date(value: &str) -> Result<DateType> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(DateType::Timed(dt));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(DateType::AllDay)
        .with_context(|| format!("Invalid --from date '{}'", value))
}

fn valid_frequencies() -> String {
    Frequency::iter()
        .filter(|f| *f != Frequency::Unknown)
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A frequency name as typed on the command line. `unknown` is not accepted.
pub fn parse_frequency(value: &str) -> Result<Frequency> {
    match Frequency::from_str(value) {
        Ok(Frequency::Unknown) | Err(_) => bail!(
            "Unknown frequency '{}'. One of: {}",
            value,
            valid_frequencies()
        ),
        Ok(f) => Ok(f),
    }
}

/// Sunday-based index for `--on`, accepting "mon" or "monday".
pub fn parse_weekday(value: &str) -> Result<u8> {
    Weekday::from_str(value)
        .map(weekday_index)
        .map_err(|_| anyhow::anyhow!("Invalid --on day '{}'", value))
}

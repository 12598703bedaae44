use anyhow::{Context, Result, bail};
use chrono::Local;
use quickadd::cli::{
    parse_frequency, parse_from_date, parse_weekday, print_help, take_flag, take_value,
};
use quickadd::config::Config;
use quickadd::context::StandardContext;
use quickadd::model::display::{format_due, priority_label};
use quickadd::model::{
    DateType, DraftDisplay, RecurrenceEngine, RecurrenceRule, date_suggestions, parse_input,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut root = None;
    while matches!(args.first().map(String::as_str), Some("-r" | "--root")) {
        args.remove(0);
        if args.is_empty() {
            bail!("--root needs a path");
        }
        root = Some(PathBuf::from(args.remove(0)));
    }

    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        print_help("quickadd");
        return Ok(());
    }

    let ctx = StandardContext::new(root);
    let config = Config::load_or_default(&ctx)?;
    init_logging(&config);

    let command = args.remove(0);
    let json = take_flag(&mut args, "--json");

    match command.as_str() {
        "parse" => run_parse(&config, &args, json),
        "next" => run_next(args, json),
        "suggest" => run_suggest(&args, json),
        other => bail!("Unknown command '{}'. Try 'quickadd --help'.", other),
    }
}

fn init_logging(config: &Config) {
    let level = env::var("QUICKADD_LOG")
        .ok()
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or_else(|| config.log_level_filter());

    if let Err(e) = TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn run_parse(config: &Config, args: &[String], json: bool) -> Result<()> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        bail!("Nothing to parse. Example: quickadd parse Buy milk tomorrow #shopping p1");
    }

    let draft = parse_input(&text, &config.labels);

    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    println!("Creating: {}", draft.preview_line(&config.labels));
    println!();
    println!("  Title:     {}", draft.title);
    if let Some(due) = &draft.due_date {
        println!("  Due:       {} ({})", format_due(due), due.format_smart());
    }
    println!(
        "  Reminder:  {}",
        if draft.has_reminder { "yes" } else { "no" }
    );
    println!(
        "  Priority:  {} ({})",
        priority_label(draft.priority).unwrap_or("None"),
        draft.priority
    );
    if let Some(rule) = &draft.recurring {
        println!("  Repeats:   {}", rule);
    }
    if !draft.label_ids.is_empty() {
        println!("  Labels:    {}", draft.label_ids.join(", "));
    }
    if !draft.unmatched_labels.is_empty() {
        println!("  New tags:  {}", draft.unmatched_labels.join(", "));
    }
    Ok(())
}

fn run_next(mut args: Vec<String>, json: bool) -> Result<()> {
    let every = take_value(&mut args, "--every")?;
    let on = take_value(&mut args, "--on")?;
    let from = take_value(&mut args, "--from")?;

    let Some(freq_arg) = args.first() else {
        bail!("Missing frequency. Try 'quickadd --help'.");
    };
    let frequency = parse_frequency(freq_arg)?;

    let interval = match every {
        Some(n) => n
            .parse::<u32>()
            .with_context(|| format!("Invalid --every value '{}'", n))?,
        None => 1,
    };
    let mut rule = RecurrenceRule::every(interval, frequency);
    if let Some(day) = on {
        rule.day_of_week = Some(parse_weekday(&day)?);
    }

    let seed = from.as_deref().map(parse_from_date).transpose()?;
    let next = RecurrenceEngine::next_due_from(&rule, seed.as_ref(), Local::now().naive_local());

    if json {
        let out = serde_json::json!({
            "rule": rule,
            "from": seed,
            "next": next,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} -> {}", rule, format_due(&next));
    }
    Ok(())
}

fn run_suggest(args: &[String], json: bool) -> Result<()> {
    let partial = args.join(" ");
    let suggestions = date_suggestions(&partial, Local::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }
    for s in &suggestions {
        println!("{:<10} {}", s.label, format_due(&DateType::AllDay(s.date)));
    }
    Ok(())
}

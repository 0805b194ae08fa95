//! Parsing of user-supplied dates and durations.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

/// The reference date: `input` when given, otherwise the local date now.
pub fn resolve_today(input: Option<&str>) -> Result<NaiveDate> {
    match input {
        Some(s) => parse_date(s).context("Invalid --today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse `YYYY-MM-DD`, falling back to natural language ("next monday").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_weekdays(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Spell out weekday abbreviations, which fuzzydate doesn't understand.
fn expand_weekdays(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| match word {
            "mon" => "monday",
            "tue" | "tues" => "tuesday",
            "wed" => "wednesday",
            "thu" | "thur" | "thurs" => "thursday",
            "fri" => "friday",
            "sat" => "saturday",
            "sun" => "sunday",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a workout duration ("90m", "1h 30m") into whole minutes.
pub fn parse_duration_minutes(input: &str) -> Result<u32> {
    let duration = humantime::parse_duration(input.trim())
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;

    let minutes = duration.as_secs() / 60;
    if minutes == 0 {
        bail!("Duration must be at least one minute: \"{}\"", input);
    }

    u32::try_from(minutes).context("Duration too large")
}

//! Console report printed after a calendar is written.
//!
//! Rendering is presentation only: anything that cannot be shown (an
//! unexpandable rule, an empty week) is skipped rather than reported as an
//! error.

use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use gymcal_core::recurrence::{self, Occurrence};
use gymcal_core::{CalendarDocument, CalendarEvent, StrategyKind, Weekday};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

/// "Monday (17/11) at 18:00: Treino A"
fn schedule_line(start: NaiveDateTime, summary: &str) -> String {
    format!(
        "{} {} ({}) at {}: {}",
        "->".cyan(),
        Weekday::from(start.weekday()).name(),
        start.format("%d/%m"),
        start.format("%H:%M"),
        summary
    )
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        schedule_line(self.start.naive_local(), &self.summary)
    }
}

/// Summary of a written calendar file.
pub struct Report<'a> {
    pub kind: StrategyKind,
    pub doc: &'a CalendarDocument,
    pub path: &'a Path,
    pub location: &'a str,
    /// First day covered: the anchor Monday or the rotation seed date
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Render for Report<'_> {
    fn render(&self) -> String {
        let mut lines = vec![
            format!(
                "{} {}",
                "✅ Calendar written to".green(),
                self.path.display().to_string().bold()
            ),
            format!("   Calendar:  {}", self.doc.name),
            format!("   Location:  {}", self.location),
            format!(
                "   Range:     {} to {}",
                self.start.format("%d/%m/%Y"),
                self.end.format("%d/%m/%Y")
            ),
            format!("   Events:    {}", self.doc.len()),
        ];

        match self.kind {
            StrategyKind::Aggregated => self.render_aggregated(&mut lines),
            StrategyKind::Rotational => self.render_rotational(&mut lines),
        }

        lines.join("\n")
    }
}

impl Report<'_> {
    fn render_aggregated(&self, lines: &mut Vec<String>) {
        if self.doc.is_empty() {
            lines.push(format!("\n{}", "No workouts in the weekly cycle.".yellow()));
            return;
        }

        lines.push(String::new());
        lines.push("Workouts".bold().to_string());
        for event in &self.doc.events {
            let days = event
                .recurrence
                .as_ref()
                .map(|rule| {
                    rule.days
                        .iter()
                        .map(|d| d.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            lines.push(format!("   {} {}", event.summary, days.dimmed()));
        }

        lines.push(String::new());
        lines.push("First week".bold().to_string());

        let from = self.local_midnight_utc(self.start);
        let to = from + Duration::days(7) - Duration::seconds(1);

        let mut week: Vec<(Occurrence, &str)> = self
            .doc
            .events
            .iter()
            .flat_map(|event| {
                recurrence::expand(event, from, to)
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |occurrence| (occurrence, event.summary.as_str()))
            })
            .collect();
        week.sort_by_key(|(occurrence, _)| occurrence.start);

        for (occurrence, summary) in week {
            lines.push(format!(
                "   {}",
                schedule_line(occurrence.start.naive_local(), summary)
            ));
        }
    }

    fn render_rotational(&self, lines: &mut Vec<String>) {
        lines.push(String::new());
        lines.push(format!(
            "{} {} {}",
            "Cycle starts on".bold(),
            Weekday::from(self.start.weekday()).name(),
            self.start.format("%d/%m/%Y")
        ));

        for day in self.start.iter_days().take(7) {
            let mut events = self.doc.events_between(day, day).peekable();
            if events.peek().is_none() {
                let rest = format!(
                    "{} ({}): rest",
                    Weekday::from(day.weekday()).name(),
                    day.format("%d/%m")
                );
                lines.push(format!("      {}", rest.dimmed()));
            }
            for event in events {
                lines.push(format!("   {}", event.render()));
            }
        }

        let second_week = self.start + Duration::days(7);
        if let Some(event) = self
            .doc
            .events_between(second_week, second_week + Duration::days(6))
            .next()
        {
            lines.push(String::new());
            lines.push("Start of second week".bold().to_string());
            lines.push(format!("   {}", event.render()));
        }
    }

    /// `date` 00:00 in the calendar's zone, as UTC.
    fn local_midnight_utc(&self, date: NaiveDate) -> chrono::DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::default());
        self.doc
            .timezone
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc())
    }
}

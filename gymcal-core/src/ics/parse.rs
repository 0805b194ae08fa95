//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{GymcalError, GymcalResult};

/// Header fields and events read back from an .ics document.
#[derive(Debug, Clone, Default)]
pub struct ParsedCalendar {
    pub product_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub events: Vec<ParsedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rrule: Option<String>,
}

/// Parse ICS content into its header fields and events
pub fn parse_calendar(content: &str) -> GymcalResult<ParsedCalendar> {
    let unfolded = unfold(content);
    let mut parsed = parse_header(&unfolded);

    let calendar = read_calendar(&unfolded).map_err(|e| GymcalError::IcsParse(e.to_string()))?;

    parsed.events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_event)
        .collect::<GymcalResult<Vec<_>>>()?;

    Ok(parsed)
}

/// Read VCALENDAR-level properties that appear before the first component
fn parse_header(unfolded: &str) -> ParsedCalendar {
    let mut header = ParsedCalendar::default();

    for line in unfolded.lines().skip_while(|l| *l != "BEGIN:VCALENDAR").skip(1) {
        if line.starts_with("BEGIN:") {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = Some(unescape_text(value));
        match name {
            "PRODID" => header.product_id = value,
            "VERSION" => header.version = value,
            "X-WR-CALNAME" => header.name = value,
            "X-WR-TIMEZONE" => header.timezone = value,
            _ => {}
        }
    }

    header
}

fn parse_event(vevent: &Component<'_>) -> GymcalResult<ParsedEvent> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| GymcalError::IcsParse("VEVENT without UID".into()))?;

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_else(|| "(No title)".to_string());

    let start = parse_instant(vevent, "DTSTART", &uid)?;
    let end = parse_instant(vevent, "DTEND", &uid)?;

    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()));
    let location = vevent
        .find_prop("LOCATION")
        .map(|p| unescape_text(p.val.as_ref()));
    let rrule = vevent.find_prop("RRULE").map(|p| p.val.to_string());

    Ok(ParsedEvent {
        uid,
        summary,
        description,
        location,
        start,
        end,
        rrule,
    })
}

/// Resolve a DTSTART/DTEND property to an absolute instant.
fn parse_instant(vevent: &Component<'_>, name: &str, uid: &str) -> GymcalResult<DateTime<Utc>> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| GymcalError::IcsParse(format!("{uid}: missing {name}")))?;
    let value = DatePerhapsTime::try_from(prop)
        .map_err(|_| GymcalError::IcsParse(format!("{uid}: invalid {name}")))?;

    match value {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Ok(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Ok(naive.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let tz: Tz = tzid
                .parse()
                .map_err(|_| GymcalError::IcsParse(format!("{uid}: unknown TZID {tzid}")))?;
            tz.from_local_datetime(&date_time)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| GymcalError::NonexistentLocalTime(date_time, tzid))
        }
        DatePerhapsTime::Date(_) => Err(GymcalError::IcsParse(format!(
            "{uid}: all-day {name} is not supported"
        ))),
    }
}

/// Undo RFC 5545 TEXT escaping (`\,` `\;` `\n` `\\`)
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

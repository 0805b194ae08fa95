//! Generated calendar events and the document that holds them.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::weekday::{Weekday, join_ics_codes};

/// A weekly recurrence: every listed weekday until the `until` instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRule {
    pub days: Vec<Weekday>,
    pub until: DateTime<Utc>,
}

impl fmt::Display for WeeklyRule {
    /// RRULE value, e.g. `FREQ=WEEKLY;BYDAY=MO,TH;UNTIL=20310101T025959Z`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FREQ=WEEKLY;BYDAY={};UNTIL={}",
            join_ics_codes(&self.days),
            self.until.format("%Y%m%dT%H%M%SZ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub location: String,
    pub description: String,
    pub recurrence: Option<WeeklyRule>,
}

impl CalendarEvent {
    /// Local calendar date the event starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

/// An ordered set of events plus calendar header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    pub product_id: String,
    pub version: String,
    pub name: String,
    pub timezone: Tz,
    /// DTSTAMP written on every event
    pub stamp: DateTime<Utc>,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn new(product_id: &str, name: &str, timezone: Tz, stamp: DateTime<Utc>) -> Self {
        CalendarDocument {
            product_id: product_id.to_string(),
            version: "2.0".to_string(),
            name: name.to_string(),
            timezone,
            stamp,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when no two events share a uid.
    pub fn has_unique_uids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.events.len());
        self.events.iter().all(|e| seen.insert(e.uid.as_str()))
    }

    /// Events starting on a local date within `[from, to]`.
    pub fn events_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = &CalendarEvent> {
        self.events
            .iter()
            .filter(move |e| e.date() >= from && e.date() <= to)
    }
}

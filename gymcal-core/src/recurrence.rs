//! RRULE expansion for generated events.
//!
//! Expands an event's weekly rule into concrete occurrences within a window,
//! so callers can confirm what a calendar client will display.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{GymcalError, GymcalResult};
use crate::event::CalendarEvent;

/// Upper bound on occurrences returned by a single expansion.
const MAX_OCCURRENCES: u16 = 366;

/// A single instance of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Build an iCalendar-format DTSTART + RRULE string for the rrule crate parser.
fn build_rrule_string(event: &CalendarEvent, rrule: &str) -> String {
    format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        event.start.timezone().name(),
        event.start.format("%Y%m%dT%H%M%S"),
        rrule
    )
}

/// Expand `event` into occurrences starting within `[from, to]`.
///
/// Events without a recurrence rule yield their single instance if it falls
/// inside the window.
pub fn expand(
    event: &CalendarEvent,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> GymcalResult<Vec<Occurrence>> {
    let duration = event.end - event.start;

    let Some(rule) = &event.recurrence else {
        let start = event.start.with_timezone(&Utc);
        return Ok(if start >= from && start <= to {
            vec![Occurrence {
                start: event.start,
                end: event.end,
            }]
        } else {
            Vec::new()
        });
    };

    let rrule_set: RRuleSet = build_rrule_string(event, &rule.to_string())
        .parse()
        .map_err(|e| {
            GymcalError::Recurrence(format!("Failed to parse RRULE for {}: {}", event.uid, e))
        })?;

    // after/before are exclusive, widen by a second to make the window inclusive
    let tz: rrule::Tz = Utc.into();
    let after = (from - Duration::seconds(1)).with_timezone(&tz);
    let before = (to + Duration::seconds(1)).with_timezone(&tz);

    let result = rrule_set.after(after).before(before).all(MAX_OCCURRENCES);

    let zone = event.start.timezone();
    Ok(result
        .dates
        .iter()
        .map(|dt| {
            let start = dt.with_timezone(&zone);
            Occurrence {
                start,
                end: start + duration,
            }
        })
        .collect())
}

//! Aggregated strategy: one recurring event per workout label.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::{empty_document, end_of_day_utc, event_start};
use crate::anchor::{first_on_or_after, next_monday};
use crate::error::{GymcalError, GymcalResult};
use crate::event::{CalendarDocument, CalendarEvent, WeeklyRule};
use crate::schedule::{ScheduleConfig, WorkoutCycleEntry};
use crate::weekday::Weekday;

/// A label and every weekday it occurs on, in cycle order.
#[derive(Debug, PartialEq, Eq)]
struct LabelGroup<'a> {
    label: &'a str,
    days: Vec<Weekday>,
}

impl LabelGroup<'_> {
    /// Weekday of the label's first occurrence in the cycle.
    fn anchor_weekday(&self) -> Weekday {
        self.days[0]
    }
}

/// Group cycle entries by label, keeping first-appearance order.
fn group_by_label(cycle: &[WorkoutCycleEntry]) -> Vec<LabelGroup<'_>> {
    let mut groups: Vec<LabelGroup<'_>> = Vec::new();

    for entry in cycle {
        match groups.iter_mut().find(|g| g.label == entry.label) {
            Some(group) => group.days.push(entry.weekday),
            None => groups.push(LabelGroup {
                label: &entry.label,
                days: vec![entry.weekday],
            }),
        }
    }

    groups
}

/// Deterministic uid for each group, in group order.
///
/// Labels that slug to the same text (or to nothing) get their 1-based group
/// position appended until the uid is unused.
fn label_uids(config: &ScheduleConfig, groups: &[LabelGroup<'_>]) -> Vec<String> {
    let mut used = HashSet::with_capacity(groups.len());

    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let ordinal = i + 1;
            let slug = match slug::slugify(group.label) {
                s if s.is_empty() => format!("workout-{ordinal}"),
                s => s,
            };

            let uid_for =
                |slug: &str| format!("{}-{}-{}", config.uid_prefix, slug, config.uid_suffix);
            let mut uid = uid_for(&slug);
            let mut n = ordinal;
            while used.contains(&uid) {
                uid = uid_for(&format!("{slug}-{n}"));
                n += 1;
            }

            used.insert(uid.clone());
            uid
        })
        .collect()
}

/// Emit one event per distinct label in `cycle`, each with a weekly RRULE
/// covering all of that label's weekdays until the end of `config.end_date`.
pub fn generate_aggregated(
    config: &ScheduleConfig,
    cycle: &[WorkoutCycleEntry],
    today: NaiveDate,
) -> GymcalResult<CalendarDocument> {
    let anchor = next_monday(today);
    if config.end_date < anchor {
        return Err(GymcalError::InvalidRange {
            start: anchor,
            end: config.end_date,
        });
    }

    let until = end_of_day_utc(config, config.end_date)?;
    let mut doc = empty_document(config, today);

    let groups = group_by_label(cycle);
    let uids = label_uids(config, &groups);

    for (group, uid) in groups.into_iter().zip(uids) {
        let first_date = first_on_or_after(anchor, group.anchor_weekday());
        if first_date > config.end_date {
            tracing::warn!(
                label = group.label,
                %first_date,
                "first occurrence falls after the end date, skipping"
            );
            continue;
        }

        let start = event_start(config, first_date)?;
        let end = start + config.duration();

        doc.push(CalendarEvent {
            uid,
            summary: group.label.to_string(),
            start,
            end,
            location: config.location.clone(),
            description: format!("{}{}", config.description_prefix, group.label),
            recurrence: Some(WeeklyRule {
                days: group.days,
                until,
            }),
        });
    }

    Ok(doc)
}

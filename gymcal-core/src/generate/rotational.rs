//! Rotational strategy: one explicit event per working day.

use chrono::{Datelike, NaiveDate};

use super::{empty_document, event_start};
use crate::anchor::next_monday;
use crate::error::{GymcalError, GymcalResult};
use crate::event::{CalendarDocument, CalendarEvent};
use crate::schedule::{RotationSeed, ScheduleConfig, Workout};
use crate::weekday::Weekday;

/// Emit one event per working day from the seed date through
/// `config.end_date` (inclusive), cycling through `sequence`.
///
/// The index advances only on working days, so weekends never skip a workout.
pub fn generate_rotational(
    config: &ScheduleConfig,
    sequence: &[Workout],
    working_days: &[Weekday],
    start_index: usize,
    seed: RotationSeed,
    today: NaiveDate,
) -> GymcalResult<CalendarDocument> {
    if sequence.is_empty() {
        return Err(GymcalError::Config(
            "rotational strategy needs at least one workout in the sequence".into(),
        ));
    }
    if working_days.is_empty() {
        return Err(GymcalError::Config(
            "rotational strategy needs at least one working day".into(),
        ));
    }

    let start = match seed {
        RotationSeed::NextMonday => next_monday(today),
        RotationSeed::Explicit(date) => date,
    };
    if config.end_date < start {
        return Err(GymcalError::InvalidRange {
            start,
            end: config.end_date,
        });
    }

    let mut doc = empty_document(config, today);
    let mut index = start_index % sequence.len();

    for date in start.iter_days().take_while(|d| *d <= config.end_date) {
        if !working_days.contains(&Weekday::from(date.weekday())) {
            continue;
        }

        let workout = &sequence[index];
        let event_start = event_start(config, date)?;
        tracing::trace!(%date, code = %workout.code, "rotation day");

        doc.push(CalendarEvent {
            uid: format!(
                "{}-{}-{}-{}",
                config.uid_prefix,
                workout.code,
                date.format("%Y%m%d"),
                config.uid_suffix
            ),
            summary: workout.label.clone(),
            start: event_start,
            end: event_start + config.duration(),
            location: config.location.clone(),
            description: format!("{}{}", config.description_prefix, workout.label),
            recurrence: None,
        });

        index = (index + 1) % sequence.len();
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::test_support::{config, date};
    use crate::schedule::Strategy;
    use chrono::Duration;

    fn abc() -> Vec<Workout> {
        vec![
            Workout::new("Treino A", "A"),
            Workout::new("Treino B", "B"),
            Workout::new("Treino C", "C"),
        ]
    }

    fn run(start: NaiveDate, end: NaiveDate, start_index: usize) -> CalendarDocument {
        let seed = RotationSeed::Explicit(start);
        let strategy = Strategy::Rotational {
            sequence: abc(),
            working_days: Weekday::WORKING_DAYS.to_vec(),
            start_index,
            seed,
        };
        let cfg = config(strategy, end);
        generate_rotational(&cfg, &abc(), &Weekday::WORKING_DAYS, start_index, seed, start)
            .unwrap()
    }

    fn codes(doc: &CalendarDocument) -> String {
        doc.events
            .iter()
            .map(|e| e.summary.trim_start_matches("Treino "))
            .collect()
    }

    #[test]
    fn two_weeks_rotate_across_weekend() {
        let monday = date(2025, 11, 17);
        let doc = run(monday, monday + Duration::days(13), 0);

        assert_eq!(doc.len(), 10);
        assert_eq!(codes(&doc), "ABCABCABCA");
        // Second Monday continues with C, not A
        assert_eq!(doc.events[5].date(), date(2025, 11, 24));
        assert_eq!(doc.events[5].summary, "Treino C");
    }

    #[test]
    fn end_date_is_inclusive() {
        let monday = date(2025, 11, 17);
        let doc = run(monday, date(2025, 11, 21), 0);
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.events.last().unwrap().date(), date(2025, 11, 21));

        let single = run(monday, monday, 0);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn weekend_only_window_is_empty() {
        let doc = run(date(2025, 11, 22), date(2025, 11, 23), 0);
        assert!(doc.is_empty());
    }

    #[test]
    fn start_index_offsets_the_rotation() {
        let doc = run(date(2025, 11, 17), date(2025, 11, 21), 2);
        assert_eq!(codes(&doc), "CABCA");

        // Indexes beyond the sequence length wrap
        let wrapped = run(date(2025, 11, 17), date(2025, 11, 21), 5);
        assert_eq!(codes(&wrapped), "CABCA");
    }

    #[test]
    fn explicit_midweek_start() {
        // Wednesday start, index 1
        let doc = run(date(2025, 11, 19), date(2025, 11, 25), 1);
        assert_eq!(codes(&doc), "BCABC");
        assert_eq!(doc.events[0].date(), date(2025, 11, 19));
    }

    #[test]
    fn next_monday_seed_uses_reference_date() {
        let seed = RotationSeed::NextMonday;
        let strategy = Strategy::Rotational {
            sequence: abc(),
            working_days: Weekday::WORKING_DAYS.to_vec(),
            start_index: 0,
            seed,
        };
        let cfg = config(strategy, date(2025, 11, 28));
        // Saturday reference
        let doc = generate_rotational(
            &cfg,
            &abc(),
            &Weekday::WORKING_DAYS,
            0,
            seed,
            date(2025, 11, 22),
        )
        .unwrap();

        assert_eq!(doc.len(), 5);
        assert_eq!(doc.events[0].date(), date(2025, 11, 24));
    }

    #[test]
    fn uids_are_code_and_date() {
        let doc = run(date(2025, 11, 17), date(2025, 11, 18), 0);
        assert_eq!(doc.events[0].uid, "treino-A-20251117-smartfit-abc");
        assert_eq!(doc.events[1].uid, "treino-B-20251118-smartfit-abc");
    }

    #[test]
    fn multi_year_range_keeps_invariants() {
        let doc = run(date(2025, 11, 17), date(2026, 12, 31), 0);

        assert!(doc.has_unique_uids());
        assert!(doc.events.iter().all(|e| e.end - e.start == Duration::minutes(90)));
        assert!(
            doc.events
                .iter()
                .all(|e| Weekday::from(e.date().weekday()).ordinal() < 5)
        );
        // Consecutive events step through the sequence
        for pair in doc.events.windows(2) {
            let position = |e: &CalendarEvent| abc().iter().position(|w| w.label == e.summary);
            let (a, b) = (position(&pair[0]).unwrap(), position(&pair[1]).unwrap());
            assert_eq!((a + 1) % 3, b);
        }
    }

    #[test]
    fn identical_inputs_are_idempotent() {
        let tuples = |doc: &CalendarDocument| {
            doc.events
                .iter()
                .map(|e| (e.uid.clone(), e.start, e.end, e.summary.clone()))
                .collect::<Vec<_>>()
        };
        let first = run(date(2025, 11, 17), date(2026, 3, 31), 0);
        let second = run(date(2025, 11, 17), date(2026, 3, 31), 0);
        assert_eq!(tuples(&first), tuples(&second));
    }

    #[test]
    fn rejects_empty_sequence_and_inverted_range() {
        let seed = RotationSeed::Explicit(date(2025, 11, 17));
        let strategy = Strategy::Rotational {
            sequence: vec![],
            working_days: Weekday::WORKING_DAYS.to_vec(),
            start_index: 0,
            seed,
        };
        let cfg = config(strategy, date(2025, 12, 31));
        let err = generate_rotational(&cfg, &[], &Weekday::WORKING_DAYS, 0, seed, date(2025, 11, 17))
            .unwrap_err();
        assert!(matches!(err, GymcalError::Config(_)));

        let cfg = config(
            Strategy::Aggregated { cycle: vec![] },
            date(2025, 11, 16),
        );
        let err =
            generate_rotational(&cfg, &abc(), &Weekday::WORKING_DAYS, 0, seed, date(2025, 11, 17))
                .unwrap_err();
        assert!(matches!(err, GymcalError::InvalidRange { .. }));
    }
}

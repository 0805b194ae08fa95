//! Calendar generation strategies.
//!
//! Both strategies are pure functions of the schedule and a reference date:
//! the caller decides what "today" is.

mod aggregated;
mod rotational;

pub use aggregated::generate_aggregated;
pub use rotational::generate_rotational;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{GymcalError, GymcalResult};
use crate::event::CalendarDocument;
use crate::schedule::{ScheduleConfig, Strategy};

/// Build the calendar document for `config` as of `today`.
pub fn generate(config: &ScheduleConfig, today: NaiveDate) -> GymcalResult<CalendarDocument> {
    validate(config)?;

    let doc = match &config.strategy {
        Strategy::Aggregated { cycle } => generate_aggregated(config, cycle, today)?,
        Strategy::Rotational {
            sequence,
            working_days,
            start_index,
            seed,
        } => generate_rotational(config, sequence, working_days, *start_index, *seed, today)?,
    };

    tracing::debug!(
        strategy = config.strategy.kind().as_str(),
        events = doc.len(),
        "generated calendar document"
    );

    Ok(doc)
}

/// Reject a start hour past 23 or a zero duration.
pub(crate) fn validate(config: &ScheduleConfig) -> GymcalResult<()> {
    if config.start_hour > 23 {
        return Err(GymcalError::Config(format!(
            "start_hour must be between 0 and 23, got {}",
            config.start_hour
        )));
    }
    if config.duration_minutes == 0 {
        return Err(GymcalError::Config(
            "duration_minutes must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Empty document carrying the configured header; DTSTAMP is `today` at midnight UTC.
fn empty_document(config: &ScheduleConfig, today: NaiveDate) -> CalendarDocument {
    let stamp = today.and_time(NaiveTime::MIN).and_utc();
    CalendarDocument::new(
        &config.calendar.product_id,
        &config.calendar.name,
        config.timezone,
        stamp,
    )
}

/// Localize a wall-clock time on `date` in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
fn localize(tz: Tz, date: NaiveDate, hour: u32, min: u32, sec: u32) -> GymcalResult<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, min, sec).ok_or_else(|| {
        GymcalError::Config(format!("invalid time of day {hour:02}:{min:02}:{sec:02}"))
    })?;
    let naive = date.and_time(time);

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| GymcalError::NonexistentLocalTime(naive, tz.name().to_string()))
}

/// Event start at the configured hour on `date`.
fn event_start(config: &ScheduleConfig, date: NaiveDate) -> GymcalResult<DateTime<Tz>> {
    localize(config.timezone, date, config.start_hour, 0, 0)
}

/// Last instant of `date` in the configured zone, as UTC.
fn end_of_day_utc(config: &ScheduleConfig, date: NaiveDate) -> GymcalResult<DateTime<Utc>> {
    Ok(localize(config.timezone, date, 23, 59, 59)?.with_timezone(&Utc))
}


#[cfg(test)]
mod tests {
    use super::test_support::{config, date};
    use super::*;
    use crate::schedule::{RotationSeed, Workout};
    use crate::weekday::Weekday;

    #[test]
    fn localize_keeps_wall_clock_time() {
        let dt = localize(chrono_tz::America::Sao_Paulo, date(2025, 11, 17), 18, 0, 0).unwrap();
        assert_eq!(dt.format("%Y%m%dT%H%M%S").to_string(), "20251117T180000");
        // Sao Paulo has been UTC-3 year-round since 2019
        assert_eq!(
            dt.with_timezone(&Utc).format("%H:%M").to_string(),
            "21:00"
        );
    }

    #[test]
    fn localize_rejects_times_in_dst_gap() {
        // 2025-03-09 02:30 does not exist in New York
        let err = localize(chrono_tz::America::New_York, date(2025, 3, 9), 2, 30, 0).unwrap_err();
        assert!(matches!(err, GymcalError::NonexistentLocalTime(..)));
    }

    #[test]
    fn end_of_day_converts_to_utc() {
        let cfg = config(Strategy::Aggregated { cycle: vec![] }, date(2030, 12, 31));
        let until = end_of_day_utc(&cfg, date(2030, 12, 31)).unwrap();
        assert_eq!(until.format("%Y%m%dT%H%M%SZ").to_string(), "20310101T025959Z");
    }

    #[test]
    fn generate_rejects_bad_hour_and_duration() {
        let mut cfg = config(Strategy::Aggregated { cycle: vec![] }, date(2030, 12, 31));
        cfg.start_hour = 24;
        assert!(matches!(
            generate(&cfg, date(2025, 11, 17)),
            Err(GymcalError::Config(_))
        ));

        cfg.start_hour = 18;
        cfg.duration_minutes = 0;
        assert!(matches!(
            generate(&cfg, date(2025, 11, 17)),
            Err(GymcalError::Config(_))
        ));
    }

    #[test]
    fn generate_dispatches_on_strategy() {
        let rotational = Strategy::Rotational {
            sequence: vec![Workout::new("Treino A", "A")],
            working_days: Weekday::WORKING_DAYS.to_vec(),
            start_index: 0,
            seed: RotationSeed::Explicit(date(2025, 11, 17)),
        };
        let doc = generate(&config(rotational, date(2025, 11, 21)), date(2025, 11, 1)).unwrap();
        assert_eq!(doc.len(), 5);
        assert!(doc.events.iter().all(|e| e.recurrence.is_none()));
    }

    #[test]
    fn stamp_is_reference_date_midnight_utc() {
        let doc = generate(
            &config(Strategy::Aggregated { cycle: vec![] }, date(2030, 12, 31)),
            date(2025, 11, 19),
        )
        .unwrap();
        assert_eq!(
            doc.stamp.format("%Y%m%dT%H%M%SZ").to_string(),
            "20251119T000000Z"
        );
        assert!(doc.is_empty());
    }
}

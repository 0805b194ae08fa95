//! Schedule configuration consumed by the generators.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::weekday::Weekday;

/// One slot of the weekly cycle used by the aggregated strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCycleEntry {
    pub weekday: Weekday,
    pub label: String,
}

impl WorkoutCycleEntry {
    pub fn new(weekday: Weekday, label: impl Into<String>) -> Self {
        WorkoutCycleEntry {
            weekday,
            label: label.into(),
        }
    }
}

/// One workout in the rotational sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub label: String,
    /// Short code used in uids, e.g. `A`
    pub code: String,
}

impl Workout {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Workout {
            label: label.into(),
            code: code.into(),
        }
    }
}

/// Where the rotational loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSeed {
    /// The Monday resolved from the reference date.
    NextMonday,
    /// An arbitrary, externally supplied date.
    Explicit(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Aggregated,
    Rotational,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Aggregated => "aggregated",
            StrategyKind::Rotational => "rotational",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// One recurring event per distinct label.
    Aggregated { cycle: Vec<WorkoutCycleEntry> },
    /// One explicit event per working day, cycling through `sequence`.
    Rotational {
        sequence: Vec<Workout>,
        working_days: Vec<Weekday>,
        start_index: usize,
        seed: RotationSeed,
    },
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Aggregated { .. } => StrategyKind::Aggregated,
            Strategy::Rotational { .. } => StrategyKind::Rotational,
        }
    }
}

/// Document-level metadata written to the calendar header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMeta {
    pub product_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub location: String,
    pub timezone: Tz,
    pub start_hour: u32,
    pub duration_minutes: u32,
    /// Last day covered by the schedule (inclusive)
    pub end_date: NaiveDate,
    pub calendar: CalendarMeta,
    pub description_prefix: String,
    pub uid_prefix: String,
    pub uid_suffix: String,
    pub strategy: Strategy,
}

impl ScheduleConfig {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

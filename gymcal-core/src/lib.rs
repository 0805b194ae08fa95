//! Core types for gymcal.
//!
//! This crate turns a workout schedule into an iCalendar document:
//! - `schedule` and `event` hold the data model
//! - `anchor` resolves the Monday a cycle starts on
//! - `generate` implements the aggregated and rotational strategies
//! - `ics` serializes documents to RFC 5545 text and reads them back
//! - `config` loads the schedule from a TOML settings file

pub mod anchor;
pub mod config;
pub mod error;
pub mod event;
pub mod generate;
pub mod ics;
pub mod recurrence;
pub mod schedule;
pub mod weekday;

pub use error::{GymcalError, GymcalResult};
pub use event::{CalendarDocument, CalendarEvent, WeeklyRule};
pub use generate::generate;
pub use schedule::{
    CalendarMeta, RotationSeed, ScheduleConfig, Strategy, StrategyKind, Workout,
    WorkoutCycleEntry,
};
pub use weekday::Weekday;

//! Schedule settings loaded from ~/.config/gymcal/config.toml

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{GymcalError, GymcalResult};
use crate::schedule::{
    CalendarMeta, RotationSeed, ScheduleConfig, Strategy, StrategyKind, Workout,
    WorkoutCycleEntry,
};
use crate::weekday::Weekday;

static DEFAULT_OUTPUT_DIR: &str = ".";

const WORKOUT_A: &str = "Treino A: Peito & Tríceps";
const WORKOUT_B: &str = "Treino B: Costas & Bíceps";
const WORKOUT_C: &str = "Treino C: Ombro & Perna";

/// Settings file contents. Every key is optional and falls back to the
/// built-in A/B/C schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub location: String,
    /// IANA zone identifier, e.g. `America/Sao_Paulo`
    pub timezone: String,
    pub start_hour: u32,
    pub duration_minutes: u32,
    pub uid_prefix: String,
    pub output_dir: PathBuf,

    /// Days the rotational strategy schedules a workout on
    pub working_days: Vec<Weekday>,
    pub start_index: usize,

    /// Weekly cycle for the aggregated strategy
    pub cycle: Vec<WorkoutCycleEntry>,

    /// Workout order for the rotational strategy
    pub sequence: Vec<Workout>,

    pub aggregated: StrategySettings,
    pub rotational: StrategySettings,
}

/// Per-strategy overrides; unset keys use the strategy's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid_suffix: Option<String>,
}

/// Strategy settings with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStrategy {
    pub file_name: String,
    pub product_id: String,
    pub calendar_name: String,
    pub end_date: NaiveDate,
    pub description_prefix: String,
    pub uid_suffix: String,
}

impl StrategySettings {
    pub fn resolve(&self, kind: StrategyKind) -> ResolvedStrategy {
        let (file_name, product_id, calendar_name, end_year, description_prefix, uid_suffix) =
            match kind {
                StrategyKind::Aggregated => (
                    "treino_academia_abc.ics",
                    "-//Academia Treino ABC//SmartFit//",
                    "Meu Treino ABC na Smart Fit",
                    2030,
                    "Dia de treino: ",
                    "smartfit-abc",
                ),
                StrategyKind::Rotational => (
                    "treino_academia_abc_ROTATIVO.ics",
                    "-//Academia Treino ABC Rotativo//SmartFit//",
                    "Meu Treino ABC Rotativo",
                    2026,
                    "Dia de treino (Ciclo Rotativo): ",
                    "rotativo",
                ),
            };

        let default_end = NaiveDate::from_ymd_opt(end_year, 12, 31).unwrap_or(NaiveDate::MAX);

        ResolvedStrategy {
            file_name: self.file_name.clone().unwrap_or_else(|| file_name.into()),
            product_id: self.product_id.clone().unwrap_or_else(|| product_id.into()),
            calendar_name: self
                .calendar_name
                .clone()
                .unwrap_or_else(|| calendar_name.into()),
            end_date: self.end_date.unwrap_or(default_end),
            description_prefix: self
                .description_prefix
                .clone()
                .unwrap_or_else(|| description_prefix.into()),
            uid_suffix: self.uid_suffix.clone().unwrap_or_else(|| uid_suffix.into()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            location: "Smart Fit - R. Professor José de Souza, 1216 - Jardim Vinte e Cinco de \
                       Agosto, Duque de Caxias, RJ - 25071-202"
                .to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            start_hour: 18,
            duration_minutes: 90,
            uid_prefix: "treino".to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cycle: vec![
                WorkoutCycleEntry::new(Weekday::Mo, WORKOUT_A),
                WorkoutCycleEntry::new(Weekday::Tu, WORKOUT_B),
                WorkoutCycleEntry::new(Weekday::We, WORKOUT_C),
                WorkoutCycleEntry::new(Weekday::Th, WORKOUT_A),
                WorkoutCycleEntry::new(Weekday::Fr, WORKOUT_B),
            ],
            sequence: vec![
                Workout::new(WORKOUT_A, "A"),
                Workout::new(WORKOUT_B, "B"),
                Workout::new(WORKOUT_C, "C"),
            ],
            working_days: Weekday::WORKING_DAYS.to_vec(),
            start_index: 0,
            aggregated: StrategySettings::default(),
            rotational: StrategySettings::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> GymcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GymcalError::Config("Could not determine config directory".into()))?
            .join("gymcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> GymcalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| GymcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GymcalError::Config(e.to_string()))
    }

    pub fn from_toml_str(content: &str) -> GymcalResult<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| GymcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GymcalError::Config(e.to_string()))
    }

    /// Effective settings rendered back to TOML.
    pub fn to_toml(&self) -> GymcalResult<String> {
        toml::to_string_pretty(self).map_err(|e| GymcalError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GymcalResult<()> {
        let contents = format!(
            "\
# gymcal configuration

# Where generated .ics files are written:
# output_dir = \"{DEFAULT_OUTPUT_DIR}\"

# location = \"Smart Fit\"
# timezone = \"America/Sao_Paulo\"
# start_hour = 18
# duration_minutes = 90

# Weekly cycle for `gymcal aggregated`:
# [[cycle]]
# weekday = \"MO\"
# label = \"{WORKOUT_A}\"

# Workout order for `gymcal rotational`:
# working_days = [\"MO\", \"TU\", \"WE\", \"TH\", \"FR\"]
# [[sequence]]
# label = \"{WORKOUT_A}\"
# code = \"A\"

# Per-strategy overrides:
# [aggregated]
# end_date = \"2030-12-31\"
# [rotational]
# end_date = \"2026-12-31\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GymcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GymcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Output directory with `~` expanded.
    pub fn output_dir(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn output_path(&self, kind: StrategyKind) -> PathBuf {
        self.output_dir().join(self.strategy(kind).file_name)
    }

    pub fn strategy(&self, kind: StrategyKind) -> ResolvedStrategy {
        match kind {
            StrategyKind::Aggregated => self.aggregated.resolve(kind),
            StrategyKind::Rotational => self.rotational.resolve(kind),
        }
    }

    pub fn timezone(&self) -> GymcalResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| GymcalError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Validate and convert into the generator's input.
    pub fn schedule(&self, kind: StrategyKind, seed: RotationSeed) -> GymcalResult<ScheduleConfig> {
        let timezone = self.timezone()?;

        let resolved = self.strategy(kind);
        let strategy = match kind {
            StrategyKind::Aggregated => Strategy::Aggregated {
                cycle: self.cycle.clone(),
            },
            StrategyKind::Rotational => Strategy::Rotational {
                sequence: self.sequence.clone(),
                working_days: self.working_days.clone(),
                start_index: self.start_index,
                seed,
            },
        };

        let config = ScheduleConfig {
            location: self.location.clone(),
            timezone,
            start_hour: self.start_hour,
            duration_minutes: self.duration_minutes,
            end_date: resolved.end_date,
            calendar: CalendarMeta {
                product_id: resolved.product_id,
                name: resolved.calendar_name,
            },
            description_prefix: resolved.description_prefix,
            uid_prefix: self.uid_prefix.clone(),
            uid_suffix: resolved.uid_suffix,
            strategy,
        };

        crate::generate::validate(&config)?;
        Ok(config)
    }
}

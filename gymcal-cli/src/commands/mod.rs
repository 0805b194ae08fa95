pub mod aggregated;
pub mod config;
pub mod rotational;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use gymcal_core::config::Settings;
use gymcal_core::ics::write_ics;
use gymcal_core::{CalendarDocument, StrategyKind};

use crate::dates;

/// Options shared by the generating commands.
pub struct RunOptions {
    pub today: NaiveDate,
    pub output: Option<PathBuf>,
    pub duration_minutes: Option<u32>,
}

impl RunOptions {
    pub fn new(today: NaiveDate, output: Option<PathBuf>, duration: Option<&str>) -> Result<Self> {
        let duration_minutes = duration.map(dates::parse_duration_minutes).transpose()?;
        Ok(RunOptions {
            today,
            output,
            duration_minutes,
        })
    }

    /// Settings with command-line overrides applied.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(minutes) = self.duration_minutes {
            settings.duration_minutes = minutes;
        }
        settings
    }

    pub fn output_path(&self, settings: &Settings, kind: StrategyKind) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| settings.output_path(kind))
    }
}

fn write_document(doc: &CalendarDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    write_ics(doc, path).with_context(|| format!("Could not write {}", path.display()))?;
    tracing::info!(path = %path.display(), events = doc.len(), "calendar written");
    Ok(())
}

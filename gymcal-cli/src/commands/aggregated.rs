use anyhow::{Context, Result};
use gymcal_core::anchor::next_monday;
use gymcal_core::config::Settings;
use gymcal_core::{RotationSeed, StrategyKind};

use super::{RunOptions, write_document};
use crate::render::{Render, Report};

pub fn run(settings: Settings, options: RunOptions) -> Result<()> {
    let kind = StrategyKind::Aggregated;
    let settings = options.apply(settings);
    let config = settings
        .schedule(kind, RotationSeed::NextMonday)
        .context("Invalid settings")?;

    let doc = gymcal_core::generate(&config, options.today)?;
    let path = options.output_path(&settings, kind);
    write_document(&doc, &path)?;

    let report = Report {
        kind,
        doc: &doc,
        path: &path,
        location: &config.location,
        start: next_monday(options.today),
        end: config.end_date,
    };
    println!("{}", report.render());

    Ok(())
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use gymcal_core::anchor::next_monday;
use gymcal_core::config::Settings;
use gymcal_core::{RotationSeed, StrategyKind};

use super::{RunOptions, write_document};
use crate::render::{Render, Report};
use crate::utils::tui::create_spinner;

pub fn run(
    settings: Settings,
    options: RunOptions,
    start: Option<NaiveDate>,
    index: Option<usize>,
) -> Result<()> {
    let kind = StrategyKind::Rotational;
    let mut settings = options.apply(settings);
    if let Some(index) = index {
        settings.start_index = index;
    }

    let seed = start.map_or(RotationSeed::NextMonday, RotationSeed::Explicit);
    let loop_start = match seed {
        RotationSeed::NextMonday => next_monday(options.today),
        RotationSeed::Explicit(date) => date,
    };

    let config = settings.schedule(kind, seed).context("Invalid settings")?;
    let path = options.output_path(&settings, kind);

    let spinner = create_spinner(format!("Generating {}", path.display()));
    let result = gymcal_core::generate(&config, options.today)
        .map_err(anyhow::Error::from)
        .and_then(|doc| write_document(&doc, &path).map(|()| doc));
    spinner.finish_and_clear();
    let doc = result?;

    let report = Report {
        kind,
        doc: &doc,
        path: &path,
        location: &config.location,
        start: loop_start,
        end: config.end_date,
    };
    println!("{}", report.render());

    Ok(())
}

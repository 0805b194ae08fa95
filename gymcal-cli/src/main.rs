mod commands;
mod dates;
mod logging;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gymcal_core::config::Settings;
use owo_colors::OwoColorize;

use crate::commands::RunOptions;

#[derive(Parser)]
#[command(name = "gymcal")]
#[command(about = "Write your gym workout schedule to .ics calendar files")]
struct Cli {
    /// Settings file (defaults to ~/.config/gymcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the calendar to this path instead of output_dir/file_name
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD or e.g. "next monday"); defaults to today
    #[arg(long, global = true)]
    today: Option<String>,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One recurring event per workout label (few events, weekly RRULEs)
    Aggregated {
        /// Workout duration (e.g. "90m", "1h 30m")
        #[arg(short, long)]
        duration: Option<String>,
    },
    /// One explicit event per working day, rotating through the sequence
    Rotational {
        /// Start the rotation on this date instead of the next Monday
        #[arg(short, long)]
        start: Option<String>,

        /// Position in the sequence for the first workout (0 = first)
        #[arg(short, long)]
        index: Option<usize>,

        /// Workout duration (e.g. "90m", "1h 30m")
        #[arg(short, long)]
        duration: Option<String>,
    },
    /// Show config paths and the effective settings
    Config,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Single guard for the whole run: report the failure once and exit normally
    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("\n{}", failure_message(&e).red());
    }
}

/// The one line shown for a failed run, with the full cause chain.
fn failure_message(e: &anyhow::Error) -> String {
    format!("❌ An error occurred while generating the calendar: {e:#}")
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let settings = Settings::load(&config_path)
        .with_context(|| format!("Could not load settings from {}", config_path.display()))?;

    let today = dates::resolve_today(cli.today.as_deref())?;

    match cli.command {
        Commands::Aggregated { duration } => {
            let options = RunOptions::new(today, cli.output, duration.as_deref())?;
            commands::aggregated::run(settings, options)
        }
        Commands::Rotational {
            start,
            index,
            duration,
        } => {
            let options = RunOptions::new(today, cli.output, duration.as_deref())?;
            let start = start.as_deref().map(dates::parse_date).transpose()?;
            commands::rotational::run(settings, options, start, index)
        }
        Commands::Config => commands::config::run(&config_path, &settings),
    }
}

/// Resolve ~/.config/gymcal/config.toml, writing a commented template on first use.
fn default_config_path() -> Result<PathBuf> {
    let path = Settings::config_path()?;

    if !path.exists() {
        match Settings::create_default_config(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "created default config"),
            Err(e) => tracing::warn!(error = %e, "could not create default config, using defaults"),
        }
    }

    Ok(path)
}

use std::path::Path;

use anyhow::Result;
use gymcal_core::StrategyKind;
use gymcal_core::config::Settings;
use owo_colors::OwoColorize;

pub fn run(config_path: &Path, settings: &Settings) -> Result<()> {
    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!("  Output:      {}", settings.output_dir().display());
    for kind in [StrategyKind::Aggregated, StrategyKind::Rotational] {
        println!(
            "  {:<12} {}",
            format!("{}:", kind.as_str()),
            settings.output_path(kind).display()
        );
    }

    println!();
    println!("{}", "Settings".bold());
    print!("{}", settings.to_toml()?);

    Ok(())
}

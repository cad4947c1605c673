use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("  {:<20} {}", "defaults.theme", config.theme_name());
    println!("  {:<20} {}", "defaults.threshold", config.threshold());
    println!("  {:<20} {}", "defaults.filter", config.filter().label());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green(),
        path.display().to_string().dimmed()
    );
    Ok(())
}

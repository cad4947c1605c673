pub mod completion;
pub mod config;
pub mod dump;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use majorflow::dataset::Dataset;
use majorflow::network::Network;

/// Read a dataset file and build its network, attaching the path to any error.
pub fn load_network(file: &Path) -> Result<Network> {
    let dataset = Dataset::load(file)?;
    dataset
        .build()
        .with_context(|| format!("Invalid dataset {}", file.display()))
}

pub fn print_version() {
    println!(
        "{} {}",
        "majorflow".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}

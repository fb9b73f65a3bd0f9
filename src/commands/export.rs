use colored::*;
use eyre::{Context, Result};
use std::path::Path;

use crate::config::Config;

use super::load_registry;

pub fn run(output: &Path, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    registry
        .export_snapshot(output)
        .with_context(|| format!("Failed to export registry to {}", output.display()))?;

    println!(
        "{} Exported {} agents to {}",
        "✓".green(),
        registry.len(),
        output.display()
    );
    Ok(())
}

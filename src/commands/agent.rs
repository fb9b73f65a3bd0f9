//! Agent listing and inspection commands

use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::agent::invoker::system_prompt;
use crate::agent::metadata::AgentMetadata;
use crate::agent::phase::Phase;
use crate::agent::registry::{AgentSummary, Registry, load_one};
use crate::cli::OutputFormat;
use crate::config::Config;

use super::load_registry;

pub fn list(phase: Option<Phase>, format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;

    let summaries: Vec<AgentSummary> = match phase {
        Some(p) => registry.filter_by_phase(p).into_iter().map(|r| r.summary()).collect(),
        None => registry.records().iter().map(|r| r.summary()).collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summaries)?),
        OutputFormat::Text => {
            if registry.is_empty() {
                println!(
                    "  {} No agents found in {}",
                    "(none)".dimmed(),
                    config.profiles_root().display()
                );
                println!();
                println!("  Profiles go in: {}", "<profiles_dir>/<phase>/<agent>.md".cyan());
            } else {
                print!("{}", render_registry(&registry, phase));
            }
        }
    }

    Ok(())
}

/// Registry grouped under phase headings; empty phases are skipped
pub fn render_registry(registry: &Registry, only: Option<Phase>) -> String {
    let mut out = format!("\n{}\n{}\n", "AGENT REGISTRY".bold(), "=".repeat(80));

    for phase in Phase::ALL {
        if only.is_some_and(|p| p != phase) {
            continue;
        }
        let records = registry.filter_by_phase(phase);
        if records.is_empty() {
            continue;
        }

        out.push_str(&format!("\n{}\n{}\n", phase.title().bold(), "-".repeat(80)));
        for record in records {
            out.push_str(&format!("  {} {}\n", "●".green(), record.id.bold()));
            out.push_str(&format!("    File: {}\n\n", record.filename.dimmed()));
        }
    }

    out
}

#[derive(Serialize)]
struct AgentDetails {
    #[serde(flatten)]
    summary: AgentSummary,
    metadata: AgentMetadata,
}

pub fn show(agent: &str, profile: bool, prompt: bool, format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;

    let Some(record) = registry.get(agent) else {
        eprintln!("{} Agent '{}' not found in {}", "✗".red(), agent, config.profiles_root().display());
        return Ok(());
    };

    if profile {
        println!("{}", record.raw_text);
        return Ok(());
    }
    if prompt {
        println!("{}", system_prompt(record));
        return Ok(());
    }

    let details = AgentDetails {
        summary: record.summary(),
        metadata: record.metadata(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&details)?),
        OutputFormat::Text => {
            println!("{} {}", "Agent:".bold(), record.id.green().bold());
            println!("{} {}", "Phase:".bold(), record.phase.title());
            println!("{} {}", "File:".bold(), record.source_path.display());

            let meta = &details.metadata;
            let fields = [
                ("Role", &meta.role),
                ("Tier", &meta.tier),
                ("Specialty", &meta.specialty),
                ("Personality", &meta.personality),
            ];
            for (label, value) in fields {
                if let Some(v) = value {
                    println!("{} {}", format!("{}:", label).bold(), v.cyan());
                }
            }
        }
    }

    Ok(())
}

pub fn cat(filename: &str, config: &Config) -> Result<()> {
    match load_one(&config.profiles_root(), filename) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
    Ok(())
}

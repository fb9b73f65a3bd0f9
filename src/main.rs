use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod agent;
mod cli;
mod commands;
mod config;
mod error;
mod llm;
mod protocol;

use cli::{Cli, Commands, OutputFormat};
use config::{Config, LogLevel};

fn setup_logging(log_level: LogLevel, verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agentctl")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("agentctl.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log_level.as_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref dir) = cli.profiles_dir {
        config.profiles_dir = dir.clone();
    }
    if let Some(ref model) = cli.model {
        config.llm.model = model.clone();
    }
}

fn run(mut cli: Cli, config: Config) -> Result<()> {
    match cli.command.take() {
        Some(Commands::List { phase, format }) => commands::agent::list(phase, OutputFormat::resolve(format), &config),
        Some(Commands::Show {
            agent,
            profile,
            prompt,
            format,
        }) => commands::agent::show(&agent, profile, prompt, OutputFormat::resolve(format), &config),
        Some(Commands::Cat { filename }) => commands::agent::cat(&filename, &config),
        Some(Commands::Ask { agents, task, format }) => {
            commands::invoke::ask(&agents, &task, OutputFormat::resolve(format), &config)
        }
        Some(Commands::Collab {
            primary,
            supporting,
            task,
            format,
        }) => commands::invoke::collab(&primary, &supporting, &task, OutputFormat::resolve(format), &config),
        Some(Commands::Chat { agent }) => commands::chat::run(agent, &config),
        Some(Commands::Export { output }) => commands::export::run(&output, &config),
        Some(Commands::Message { action }) => commands::message::run(action),
        Some(Commands::Completions { shell }) => commands::completions::run(shell),
        None => match cli.direct_invocation() {
            Some((agent, task)) => commands::invoke::single(agent, task, &config),
            None => commands::chat::run(None, &config),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);

    setup_logging(config.log_level, cli.verbose).context("Failed to setup logging")?;

    info!("Starting agentctl with profiles from: {}", config.profiles_root().display());

    run(cli, config).context("Command failed")?;

    Ok(())
}

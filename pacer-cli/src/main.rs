use anyhow::{bail, Context, Result};
use clap::Parser;
use pacer_config::{ConfigLoader, LogLevel, PacerConfig};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};
use commands::run::RunOverrides;

/// Load configuration from file or use defaults
///
/// Runs before logging is initialised, so an explicitly named file that does not
/// exist is an error rather than a silent fallback to defaults.
fn load_config(config_path: Option<&PathBuf>) -> Result<PacerConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            loader
                .from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))
        }
        None => {
            debug!("No configuration file specified. Loading from environment or defaults.");
            loader
                .from_env()
                .context("Failed to load configuration from environment")
        }
    }
}

/// Initialize logging, letting `--log-level` win over the configured level
fn init_logging(config: &PacerConfig, log_level: Option<&str>) -> Result<()> {
    let mut logging = config.logging.clone();

    if let Some(level) = log_level {
        match LogLevel::from_str(level) {
            Ok(parsed) => logging.level = parsed,
            // Not a plain level: treat it as a filter directive
            Err(_) => return pacer_logging::init_simple_tracing(level),
        }
    }

    pacer_logging::init_logging_from_config(&logging)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_logging(&config, cli.log_level.as_deref())?;
    if let Some(path) = &cli.config {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Run {
            schedule,
            spawn_rate,
            poll_interval_ms,
            json,
        } => {
            let config = RunOverrides {
                schedule,
                spawn_rate,
                poll_interval_ms,
            }
            .apply(config)?;

            let summary = commands::run::handle_run(&config).await?;
            println!("{}", commands::run::render_summary(&summary, json)?);
        }
        Commands::Validate { schedule, format } => {
            println!(
                "{}",
                commands::schedule::handle_validate(&schedule, format)?
            );
        }
        Commands::Ticks {
            schedule,
            spawn_rate,
            at,
        } => {
            let spawn_rate = spawn_rate.unwrap_or(config.shape.spawn_rate);
            for line in commands::schedule::handle_ticks(&schedule, spawn_rate, &at)? {
                println!("{}", line);
            }
        }
        Commands::Config { config_cmd } => match config_cmd {
            ConfigCommands::Validate { config_file } => {
                commands::config::handle_config_validate(&config_file)?
            }
            ConfigCommands::Generate { output, force } => {
                commands::config::handle_config_generate(&output, force)?
            }
            ConfigCommands::Show { format } => {
                println!("{}", commands::config::handle_config_show(&config, format)?);
            }
        },
    }

    Ok(())
}

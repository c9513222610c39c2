//! CLI argument parsing definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a rate schedule against the simulated user pool
    Run {
        /// Rate schedule file, one target user count per line
        #[arg(long, value_name = "PATH")]
        schedule: Option<PathBuf>,

        /// Maximum users per second to add or remove while ramping
        #[arg(long, value_name = "USERS")]
        spawn_rate: Option<f64>,

        /// Milliseconds between shape polls
        #[arg(long, value_name = "MS")]
        poll_interval_ms: Option<u64>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a rate schedule and report its shape
    Validate {
        /// Rate schedule file
        #[arg(long, value_name = "PATH")]
        schedule: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the driver output at the given elapsed times
    Ticks {
        /// Rate schedule file
        #[arg(long, value_name = "PATH")]
        schedule: PathBuf,

        /// Spawn rate reported with every target (defaults to the configured value)
        #[arg(long, value_name = "USERS")]
        spawn_rate: Option<f64>,

        /// Elapsed run times in seconds
        #[arg(long, value_name = "SECONDS", num_args = 1.., required = true)]
        at: Vec<f64>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Write the default configuration as YAML
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration in effect
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ShowFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "pacer",
            "--log-level",
            "debug",
            "run",
            "--schedule",
            "rps.txt",
            "--spawn-rate",
            "25",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Run {
                schedule,
                spawn_rate,
                poll_interval_ms,
                json,
            } => {
                assert_eq!(schedule, Some(PathBuf::from("rps.txt")));
                assert_eq!(spawn_rate, Some(25.0));
                assert_eq!(poll_interval_ms, None);
                assert!(!json);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_ticks_multiple_times() {
        let cli = Cli::try_parse_from([
            "pacer", "ticks", "--schedule", "rps.txt", "--at", "0", "0.999", "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Ticks { at, spawn_rate, .. } => {
                assert_eq!(at, vec![0.0, 0.999, 3.0]);
                assert_eq!(spawn_rate, None);
            }
            _ => panic!("expected ticks command"),
        }
    }

    #[test]
    fn test_ticks_requires_times() {
        assert!(Cli::try_parse_from(["pacer", "ticks", "--schedule", "rps.txt"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pacer", "validate", "--schedule", "rps.txt", "--config", "pacer.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("pacer.yaml")));
    }
}

//! Configuration management commands

use crate::cli::ShowFormat;
use anyhow::{Context, Result};
use pacer_config::{ConfigLoader, PacerConfig};
use std::fs;
use std::path::Path;
use tracing::info;

/// Validate a configuration file
pub fn handle_config_validate(config_file: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    ConfigLoader::new()
        .from_file(config_file)
        .with_context(|| format!("Invalid configuration file {:?}", config_file))?;

    println!("Configuration file {:?} is valid", config_file);
    Ok(())
}

/// Write the default configuration to `output`
pub fn handle_config_generate(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(anyhow::anyhow!(
            "Output file {:?} already exists. Use --force to overwrite",
            output
        ));
    }

    fs::write(output, PacerConfig::generate_sample())
        .context("Failed to write configuration file")?;

    println!("Configuration generated at: {:?}", output);
    println!("Validate with: pacer config validate --config-file {:?}", output);
    Ok(())
}

/// Render the configuration in effect
pub fn handle_config_show(config: &PacerConfig, format: ShowFormat) -> Result<String> {
    match format {
        ShowFormat::Yaml => serde_yaml::to_string(config).context("Failed to serialize to YAML"),
        ShowFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize to JSON")
        }
    }
}

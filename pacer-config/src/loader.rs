//! Configuration loading and environment variable handling

use crate::compat;
use crate::domains::PacerConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "PACER".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<PacerConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let mut config = if is_json {
            Self::parse_json(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config)?;

        // Validate all domains
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<PacerConfig> {
        let mut config = PacerConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<PacerConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn parse_json(content: &str) -> ConfigResult<PacerConfig> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if compat::is_legacy_document(&value) {
            let legacy: compat::LegacyStatsConfig = serde_json::from_value(value)?;
            return Ok(compat::from_legacy_config(&legacy));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut PacerConfig) -> ConfigResult<()> {
        self.apply_shape_overrides(&mut config.shape)?;
        self.apply_pacing_overrides(&mut config.pacing)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply load shape overrides
    fn apply_shape_overrides(
        &self,
        config: &mut crate::domains::shape::ShapeConfig,
    ) -> ConfigResult<()> {
        if let Ok(path) = self.get_env_var("SCHEDULE_PATH") {
            config.schedule_path = PathBuf::from(path);
        }

        if let Ok(spawn_rate) = self.get_env_var("SPAWN_RATE") {
            config.spawn_rate = spawn_rate
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SPAWN_RATE: {}", e)))?;
        }

        if let Ok(interval) = self.get_env_var("POLL_INTERVAL_MS") {
            let millis: u64 = interval
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid POLL_INTERVAL_MS: {}", e)))?;
            config.poll_interval = std::time::Duration::from_millis(millis);
        }

        Ok(())
    }

    /// Apply pacing overrides
    fn apply_pacing_overrides(
        &self,
        config: &mut crate::domains::pacing::PacingConfig,
    ) -> ConfigResult<()> {
        if let Ok(rate) = self.get_env_var("REQUEST_RATE_PER_USER") {
            config.request_rate_per_user = rate.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid REQUEST_RATE_PER_USER: {}", e))
            })?;
        }

        if let Ok(seed) = self.get_env_var("RANDOM_SEED") {
            config.random_seed = Some(
                seed.parse()
                    .map_err(|e| ConfigError::EnvError(format!("Invalid RANDOM_SEED: {}", e)))?,
            );
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

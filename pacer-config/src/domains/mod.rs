//! Domain-specific configuration modules

pub mod logging;
pub mod pacing;
pub mod shape;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main pacer configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PacerConfig {
    /// Load shape (rate schedule replay) configuration
    #[serde(default)]
    pub shape: shape::ShapeConfig,

    /// Per-user pacing configuration
    #[serde(default)]
    pub pacing: pacing::PacingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl PacerConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.shape.validate()?;
        self.pacing.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = PacerConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PacerConfig::default().validate_all().is_ok());
    }

    #[test]
    fn test_sample_parses_back() {
        let sample = PacerConfig::generate_sample();
        let parsed: PacerConfig = serde_yaml::from_str(&sample).unwrap();
        assert_eq!(parsed, PacerConfig::default());
    }
}

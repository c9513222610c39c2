//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a positive number
///
/// NaN compares false against everything, so it is rejected here as well.
pub fn validate_positive<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if !(value > T::default()) {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Validate a finite floating point number
pub fn validate_finite(value: f64, field_name: &str, domain: &str) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be a finite number, got {}", field_name, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1u64, "field", "test").is_ok());
        assert!(validate_positive(0.5f64, "field", "test").is_ok());
        assert!(validate_positive(0u64, "field", "test").is_err());
        assert!(validate_positive(-1.0f64, "field", "test").is_err());
        assert!(validate_positive(f64::NAN, "field", "test").is_err());
    }

    #[test]
    fn test_validate_required_string() {
        assert!(validate_required_string("rps.txt", "schedule_path", "shape").is_ok());
        assert!(validate_required_string("", "schedule_path", "shape").is_err());
        assert!(validate_required_string("   ", "schedule_path", "shape").is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite(100.0, "spawn_rate", "shape").is_ok());
        assert!(validate_finite(f64::INFINITY, "spawn_rate", "shape").is_err());
        assert!(validate_finite(f64::NAN, "spawn_rate", "shape").is_err());
    }

    #[test]
    fn test_domain_error_message() {
        let err = validate_positive(0.0f64, "spawn_rate", "shape").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Domain configuration error in shape: spawn_rate must be greater than 0, got 0"
        );
    }
}

//! # Configuration Management
//!
//! Environment-driven configuration for the payroll service. Every value has
//! a default, so an empty environment yields a runnable service on port 8080.

pub mod settings;

pub use settings::{ApiServerConfig, ObservabilityConfig};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub api: ApiServerConfig,

    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api: ApiServerConfig::from_env()?,
            observability: ObservabilityConfig::from_env(),
        })
    }

    /// Loopback configuration on an OS-assigned port, for test harnesses
    pub fn ephemeral() -> Self {
        Self { api: ApiServerConfig::ephemeral(), observability: ObservabilityConfig::default() }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self)?;

        self.api.socket_addr()?;

        EnvFilter::try_new(&self.observability.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", self.observability.log_level, e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.bind_address, "0.0.0.0");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.observability.service_name, "payroll");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ephemeral_config_is_valid() {
        let config = Config::ephemeral();
        assert!(config.api.is_ephemeral());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_bind_address() {
        let mut config = Config::ephemeral();
        config.api.bind_address = String::new();
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unparsable_bind_address() {
        let mut config = Config::ephemeral();
        config.api.bind_address = "not-an-ip".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = Config::ephemeral();
        config.observability.log_level = "payroll=verbose".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}

//! # Configuration Settings
//!
//! Defines the configuration structures for the payroll service.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use validator::Validate;

/// Environment variable for the API bind address
pub const ENV_API_BIND_ADDRESS: &str = "PAYROLL_API_BIND_ADDRESS";

/// Environment variable for the API port (0 = OS-assigned)
pub const ENV_API_PORT: &str = "PAYROLL_API_PORT";

/// Environment variable for the startup/shutdown timeout in seconds
pub const ENV_STARTUP_TIMEOUT_SECONDS: &str = "PAYROLL_STARTUP_TIMEOUT_SECONDS";

/// Environment variable for the service name
pub const ENV_SERVICE_NAME: &str = "PAYROLL_SERVICE_NAME";

/// Environment variable for the default log level
pub const ENV_LOG_LEVEL: &str = "PAYROLL_LOG_LEVEL";

/// Environment variable enabling JSON log output
pub const ENV_LOG_JSON: &str = "PAYROLL_LOG_JSON";

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiServerConfig {
    /// Listener IP address
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_address: String,

    /// Listener port. 0 asks the OS for an ephemeral port.
    pub port: u16,

    /// Upper bound for readiness and graceful shutdown, in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Startup timeout must be between 1 and 300 seconds"
    ))]
    pub startup_timeout_seconds: u64,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8080, startup_timeout_seconds: 10 }
    }
}

impl ApiServerConfig {
    /// Loopback listener on an OS-assigned port
    pub fn ephemeral() -> Self {
        Self { bind_address: "127.0.0.1".to_string(), port: 0, ..Self::default() }
    }

    /// Parse the configured address into a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            Error::config(format!("Invalid API bind address '{}': {}", self.bind_address, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Get startup timeout as Duration
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_seconds)
    }

    /// Whether the listener port is picked by the OS
    pub fn is_ephemeral(&self) -> bool {
        self.port == 0
    }

    /// Create ApiServerConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_address =
            std::env::var(ENV_API_BIND_ADDRESS).unwrap_or_else(|_| defaults.bind_address.clone());

        let port = match std::env::var(ENV_API_PORT) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::config(format!("Invalid API port '{}': {}", raw, e)))?,
            Err(_) => defaults.port,
        };

        let startup_timeout_seconds = match std::env::var(ENV_STARTUP_TIMEOUT_SECONDS) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                Error::config(format!("Invalid startup timeout '{}': {}", raw, e))
            })?,
            Err(_) => defaults.startup_timeout_seconds,
        };

        Ok(Self { bind_address, port, startup_timeout_seconds })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Service name reported in logs and health endpoints
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: crate::APP_NAME.to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let service_name = std::env::var(ENV_SERVICE_NAME).unwrap_or(defaults.service_name);
        let log_level = std::env::var(ENV_LOG_LEVEL).unwrap_or(defaults.log_level);
        let json_logging = std::env::var(ENV_LOG_JSON)
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(defaults.json_logging);

        Self { service_name, log_level, json_logging }
    }
}

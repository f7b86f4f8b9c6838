//! # Structured Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level so operators can widen filters without a config change.

use crate::config::{Config, ObservabilityConfig};
use crate::errors::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter from `RUST_LOG`, falling back to the configured level
pub fn build_env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed (e.g. by a
/// test harness), which is not an error.
pub fn init_logging(config: &ObservabilityConfig) -> Result<bool> {
    let filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_logging {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(
            service_name = %config.service_name,
            log_level = %config.log_level,
            json = config.json_logging,
            "Logging initialized"
        );
    }

    Ok(installed)
}

/// Log configuration at startup
pub fn log_config_info(config: &Config) {
    tracing::info!(
        service_name = %config.observability.service_name,
        bind_address = %config.api.bind_address,
        port = config.api.port,
        ephemeral_port = config.api.is_ephemeral(),
        startup_timeout_seconds = config.api.startup_timeout_seconds,
        json_logging = config.observability.json_logging,
        "Payroll service configuration"
    );
}

//! # Observability Infrastructure
//!
//! Structured logging, request tracing and component health checking for the payroll service.

pub mod health;
pub mod http_tracing;
pub mod logging;

pub use health::{HealthCheck, HealthChecker, HealthStatus};
pub use http_tracing::trace_http_requests;
pub use logging::{init_logging, log_config_info};

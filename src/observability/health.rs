//! # Health Checking
//!
//! Tracks the health of the components wired into the application context.
//! Bootstrap reports each component as it comes up; the readiness endpoint reads
//! the aggregate.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Health status for a component
#[derive(Debug, Clone, PartialEq)]
pub enum HealthStatus {
    /// Component is healthy and operational
    Healthy,
    /// Component is degraded but still functional
    Degraded { message: String },
    /// Component is unhealthy and not functional
    Unhealthy { message: String },
}

impl HealthStatus {
    /// Check if the status is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Get the status message
    pub fn message(&self) -> Option<&str> {
        match self {
            HealthStatus::Healthy => None,
            HealthStatus::Degraded { message } | HealthStatus::Unhealthy { message } => {
                Some(message)
            }
        }
    }

    /// Short label used in health responses
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded { .. } => "degraded",
            HealthStatus::Unhealthy { .. } => "unhealthy",
        }
    }

    /// Aggregate status of a set of component checks. An empty set is degraded.
    pub fn aggregate(checks: &[HealthCheck]) -> Self {
        if checks.is_empty() {
            return HealthStatus::Degraded { message: "No components registered".to_string() };
        }

        let mut unhealthy = Vec::new();
        let mut degraded = Vec::new();

        for check in checks {
            match &check.status {
                HealthStatus::Healthy => {}
                HealthStatus::Degraded { .. } => degraded.push(check.component.as_str()),
                HealthStatus::Unhealthy { .. } => unhealthy.push(check.component.as_str()),
            }
        }

        if !unhealthy.is_empty() {
            unhealthy.sort_unstable();
            HealthStatus::Unhealthy {
                message: format!("Unhealthy components: {}", unhealthy.join(", ")),
            }
        } else if !degraded.is_empty() {
            degraded.sort_unstable();
            HealthStatus::Degraded {
                message: format!("Degraded components: {}", degraded.join(", ")),
            }
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Component name
    pub component: String,
    /// Health status
    pub status: HealthStatus,
    /// Last check timestamp
    pub last_check: chrono::DateTime<chrono::Utc>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
}

impl HealthCheck {
    /// Create a new health check result
    pub fn new<S: Into<String>>(component: S, status: HealthStatus) -> Self {
        Self {
            component: component.into(),
            status,
            last_check: chrono::Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Create a healthy health check
    pub fn healthy<S: Into<String>>(component: S) -> Self {
        Self::new(component, HealthStatus::Healthy)
    }

    /// Create an unhealthy health check
    pub fn unhealthy<S: Into<String>, M: Into<String>>(component: S, message: M) -> Self {
        Self::new(component, HealthStatus::Unhealthy { message: message.into() })
    }

    /// Add metadata to the health check
    pub fn with_metadata<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Central registry of component health for one application context
#[derive(Debug, Clone)]
pub struct HealthChecker {
    checks: Arc<RwLock<HashMap<String, HealthCheck>>>,
    instance_id: String,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    /// Create a new health checker
    pub fn new() -> Self {
        Self {
            checks: Arc::new(RwLock::new(HashMap::new())),
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Unique id of the context this checker belongs to
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Record the latest result for a component, replacing any previous one
    pub async fn report(&self, check: HealthCheck) {
        tracing::debug!(
            component = %check.component,
            status = check.status.label(),
            "Component health reported"
        );
        self.checks.write().await.insert(check.component.clone(), check);
    }

    /// Snapshot of all component checks, sorted by component name
    pub async fn checks(&self) -> Vec<HealthCheck> {
        let mut checks: Vec<HealthCheck> = self.checks.read().await.values().cloned().collect();
        checks.sort_by(|a, b| a.component.cmp(&b.component));
        checks
    }

    /// Get the overall health status
    pub async fn overall_status(&self) -> HealthStatus {
        HealthStatus::aggregate(&self.checks().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert_eq!(HealthStatus::Healthy.message(), None);

        let degraded = HealthStatus::Degraded { message: "slow".to_string() };
        assert!(!degraded.is_healthy());
        assert_eq!(degraded.message(), Some("slow"));
        assert_eq!(degraded.label(), "degraded");

        let unhealthy = HealthStatus::Unhealthy { message: "down".to_string() };
        assert_eq!(unhealthy.label(), "unhealthy");
    }

    #[test]
    fn test_health_check_metadata() {
        let check = HealthCheck::healthy("api_server").with_metadata("address", "127.0.0.1:1");
        assert_eq!(check.component, "api_server");
        assert_eq!(check.metadata.get("address").map(String::as_str), Some("127.0.0.1:1"));
    }

    #[tokio::test]
    async fn test_empty_checker_is_degraded() {
        let checker = HealthChecker::new();
        assert!(matches!(checker.overall_status().await, HealthStatus::Degraded { .. }));
    }

    #[tokio::test]
    async fn test_overall_status_aggregation() {
        let checker = HealthChecker::new();
        checker.report(HealthCheck::healthy("configuration")).await;
        checker.report(HealthCheck::healthy("api_server")).await;
        assert_eq!(checker.overall_status().await, HealthStatus::Healthy);

        checker
            .report(HealthCheck::new(
                "api_server",
                HealthStatus::Degraded { message: "slow".to_string() },
            ))
            .await;
        assert!(matches!(checker.overall_status().await, HealthStatus::Degraded { .. }));

        checker.report(HealthCheck::unhealthy("configuration", "missing")).await;
        let status = checker.overall_status().await;
        assert_eq!(status.message(), Some("Unhealthy components: configuration"));
    }

    #[test]
    fn test_aggregate_matches_listed_checks() {
        let checks = vec![
            HealthCheck::healthy("api_server"),
            HealthCheck::unhealthy("configuration", "reloading"),
        ];
        let status = HealthStatus::aggregate(&checks);
        assert_eq!(status.label(), "unhealthy");
        assert_eq!(status.message(), Some("Unhealthy components: configuration"));

        assert_eq!(HealthStatus::aggregate(&checks[..1]), HealthStatus::Healthy);
        assert_eq!(HealthStatus::aggregate(&[]).label(), "degraded");
    }

    #[tokio::test]
    async fn test_checks_sorted_and_replaced() {
        let checker = HealthChecker::new();
        checker.report(HealthCheck::healthy("b")).await;
        checker.report(HealthCheck::healthy("a")).await;
        checker.report(HealthCheck::unhealthy("b", "gone")).await;

        let checks = checker.checks().await;
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].component, "a");
        assert!(!checks[1].status.is_healthy());
    }

    #[test]
    fn test_instance_ids_are_unique() {
        assert_ne!(HealthChecker::new().instance_id(), HealthChecker::new().instance_id());
    }
}

//! # Smoke Test Harness
//!
//! Starts a full service instance on the configured port (normally an
//! ephemeral one), invokes a check once the instance is ready, tears the
//! instance down and reports PASS/FAIL. A startup failure is reported without
//! ever invoking the check.

use std::fmt;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::config::Config;
use crate::errors::Result;
use crate::smoke::run_context_load_check;
use crate::startup::{launch, RunningApp};

/// Outcome of one harness run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeVerdict {
    Passed,
    /// The service never became ready; the check was not invoked
    StartupFailed { reason: String },
    /// The check returned an error, or shutdown failed after it ran
    CheckFailed { reason: String },
}

impl SmokeVerdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, SmokeVerdict::Passed)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            SmokeVerdict::Passed => None,
            SmokeVerdict::StartupFailed { reason } | SmokeVerdict::CheckFailed { reason } => {
                Some(reason)
            }
        }
    }
}

/// Report for one harness run
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub verdict: SmokeVerdict,
    /// Bound address of the instance, when startup got that far
    pub local_addr: Option<SocketAddr>,
    pub elapsed: Duration,
}

impl SmokeReport {
    pub fn is_passed(&self) -> bool {
        self.verdict.is_passed()
    }
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed_ms = self.elapsed.as_millis();
        match (&self.verdict, self.local_addr) {
            (SmokeVerdict::Passed, Some(addr)) => write!(f, "PASS ({} in {}ms)", addr, elapsed_ms),
            (SmokeVerdict::Passed, None) => write!(f, "PASS ({}ms)", elapsed_ms),
            (SmokeVerdict::StartupFailed { reason }, _) => {
                write!(f, "FAIL during startup after {}ms: {}", elapsed_ms, reason)
            }
            (SmokeVerdict::CheckFailed { reason }, _) => {
                write!(f, "FAIL after {}ms: {}", elapsed_ms, reason)
            }
        }
    }
}

/// Start a service instance from `config`, run `check` against it once, and
/// shut it down.
pub async fn run_smoke_test<F>(config: Config, check: F) -> SmokeReport
where
    F: FnOnce(&RunningApp) -> Result<()>,
{
    let started = Instant::now();

    let app = match launch(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Smoke test aborted: service failed to start");
            return SmokeReport {
                verdict: SmokeVerdict::StartupFailed { reason: e.to_string() },
                local_addr: None,
                elapsed: started.elapsed(),
            };
        }
    };

    let local_addr = app.local_addr();
    let check_result = check(&app);
    let shutdown_result = app.shutdown().await;

    let verdict = match (check_result, shutdown_result) {
        (Ok(()), Ok(())) => SmokeVerdict::Passed,
        (Err(e), _) => SmokeVerdict::CheckFailed { reason: e.to_string() },
        (Ok(()), Err(e)) => SmokeVerdict::CheckFailed { reason: e.to_string() },
    };

    let report = SmokeReport { verdict, local_addr: Some(local_addr), elapsed: started.elapsed() };

    if report.is_passed() {
        info!(
            address = %local_addr,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Smoke test passed"
        );
    } else {
        error!(
            address = %local_addr,
            reason = report.verdict.reason().unwrap_or_default(),
            "Smoke test failed"
        );
    }

    report
}

/// Start a service instance and run the context-load check against it.
pub async fn run_context_load_smoke_test(config: Config) -> SmokeReport {
    run_smoke_test(config, |_| run_context_load_check()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn test_passing_check() {
        let report = run_smoke_test(Config::ephemeral(), |app| {
            assert!(app.is_running());
            Ok(())
        })
        .await;

        assert!(report.is_passed());
        assert!(report.local_addr.is_some_and(|addr| addr.port() != 0));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_run_is_logged() {
        let report = run_context_load_smoke_test(Config::ephemeral()).await;
        assert!(report.is_passed(), "{}", report);
        assert!(logs_contain("Payroll service started"));
        assert!(logs_contain("Smoke test passed"));
    }

    #[tokio::test]
    async fn test_failing_check_is_reported() {
        let report =
            run_smoke_test(Config::ephemeral(), |_| Err(Error::assertion("forced failure"))).await;

        assert_eq!(
            report.verdict,
            SmokeVerdict::CheckFailed { reason: "Assertion failed: forced failure".to_string() }
        );
        assert!(report.local_addr.is_some());
    }

    #[tokio::test]
    async fn test_startup_failure_skips_check() {
        let mut config = Config::ephemeral();
        config.api.bind_address = "not-an-ip".to_string();

        let mut invoked = false;
        let report = run_smoke_test(config, |_| {
            invoked = true;
            Ok(())
        })
        .await;

        assert!(!invoked);
        assert!(matches!(report.verdict, SmokeVerdict::StartupFailed { .. }));
        assert!(report.local_addr.is_none());
    }

    #[test]
    fn test_report_display() {
        let passed = SmokeReport {
            verdict: SmokeVerdict::Passed,
            local_addr: Some("127.0.0.1:4000".parse().unwrap()),
            elapsed: Duration::from_millis(12),
        };
        assert_eq!(passed.to_string(), "PASS (127.0.0.1:4000 in 12ms)");

        let failed = SmokeReport {
            verdict: SmokeVerdict::StartupFailed { reason: "bad config".to_string() },
            local_addr: None,
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(failed.to_string(), "FAIL during startup after 3ms: bad config");
        assert_eq!(failed.verdict.reason(), Some("bad config"));
    }
}

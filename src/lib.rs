//! # Payroll
//!
//! Service bootstrap and context-load smoke harness for the payroll service.
//!
//! ## Architecture
//!
//! ```text
//! Smoke Harness → launch(Config) → AppContext ─┬─ HealthChecker
//!      ↓                                       └─ HTTP API (/health/live, /health/ready)
//! Context Load Check
//! ```
//!
//! The harness starts a full instance on an OS-assigned port, runs the
//! context-load check once the listener is ready, then shuts the instance
//! down and reports PASS/FAIL.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use payroll::{harness::run_context_load_smoke_test, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = run_context_load_smoke_test(Config::ephemeral()).await;
//!     assert!(report.is_passed(), "{}", report);
//! }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod harness;
pub mod observability;
pub mod smoke;
pub mod startup;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};
pub use harness::{run_context_load_smoke_test, run_smoke_test, SmokeReport, SmokeVerdict};
pub use smoke::run_context_load_check;
pub use startup::{launch, AppContext, RunningApp};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

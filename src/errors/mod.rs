//! # Error Handling
//!
//! Error types for the payroll service and its smoke harness, built on
//! `thiserror`.

/// Custom result type for payroll operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the payroll service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Declarative validation failures on configuration structs
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Network transport errors (bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },

    /// A smoke check condition did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(operation: S, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create a new assertion error
    pub fn assertion<S: Into<String>>(message: S) -> Self {
        Self::Assertion(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error came from a failed check rather than the service
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }
}

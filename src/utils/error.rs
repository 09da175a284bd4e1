//! Error handling for the report engine
//!
//! This module defines all error types used throughout the engine.

use thiserror::Error;

/// Result type alias for the report engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the report engine
///
/// Propagation policy (see `core::report_job`): `Validation` never surfaces
/// to callers, it becomes a terminal `Error` status with a message on the
/// report row. Everything else is recorded on the row first and then
/// surfaced for retry/alerting infrastructure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Strategy parameter validation failures (expected, user-facing)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Report name does not resolve to a registered strategy
    #[error("No report strategy registered for '{0}'")]
    StrategyNotFound(String),

    /// Failure while scanning or querying records
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Failure while producing report output
    #[error("Render error: {0}")]
    Render(String),

    /// Entity lookup failures
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected report status transition
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the report is currently in
        from: String,
        /// Status the caller attempted to move to
        to: String,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a data access error
    pub fn data_access(msg: impl Into<String>) -> Self {
        Self::DataAccess(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

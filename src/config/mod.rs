//! Configuration management for the report engine
//!
//! Hosts can run the engine with `EngineConfig::default()` or load settings
//! from a YAML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::types::ReportFormat;
use crate::utils::error::{EngineError, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Report job settings
    #[serde(default)]
    pub job: JobConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the report execution job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Stop the batch at the first execution failure instead of continuing
    /// with the remaining reports
    #[serde(default)]
    pub halt_on_failure: bool,
    /// Format used when a caller creates a report without one
    #[serde(default = "default_format")]
    pub default_format: ReportFormat,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            halt_on_failure: false,
            default_format: default_format(),
        }
    }
}

fn default_format() -> ReportFormat {
    ReportFormat::Csv
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::config(format!("Failed to read config file: {e}")))?;

        let config: EngineConfig = serde_yaml::from_str(&content)
            .map_err(|e| EngineError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Check settings for values that cannot work at runtime
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(EngineError::config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.job.halt_on_failure);
        assert_eq!(config.job.default_format, ReportFormat::Csv);
        assert_eq!(config.logging.level, "info");
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let mut config = EngineConfig::default();
        config.logging.level = "verbose".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "job:\n  halt_on_failure: true\n  default_format: html\nlogging:\n  level: debug"
        )
        .unwrap();

        let config = EngineConfig::from_file(file.path()).await.unwrap();
        assert!(config.job.halt_on_failure);
        assert_eq!(config.job.default_format, ReportFormat::Html);
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_from_file_missing_path_is_config_error() {
        let err = EngineConfig::from_file("/nonexistent/engine.yml")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[tokio::test]
    async fn test_from_file_partial_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "job:\n  halt_on_failure: true").unwrap();

        let config = EngineConfig::from_file(file.path()).await.unwrap();
        assert!(config.job.halt_on_failure);
        assert_eq!(config.logging.level, "info");
    }
}

//! Configuration management

use crate::error::{ErrorContext, FundscoutError, FundscoutResult};
use crate::types::{FundscoutConfig, WorkflowTimings};

use std::path::Path;

impl Default for WorkflowTimings {
    fn default() -> Self {
        Self {
            queries_ms: 1500,
            search_ms: 2000,
            identification_ms: 2500,
            report_ms: 1000,
            settle_delay_ms: 1500,
        }
    }
}

impl Default for FundscoutConfig {
    fn default() -> Self {
        Self {
            workflow: WorkflowTimings::default(),
            logging: crate::logging::LoggingConfig::default(),
        }
    }
}

impl FundscoutConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FundscoutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FundscoutError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: FundscoutConfig =
            toml::from_str(&content).map_err(|e| FundscoutError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> FundscoutResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| FundscoutError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| FundscoutError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> FundscoutResult<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(FundscoutError::Config {
                    message: format!("Unknown log level: {}", other),
                    source: None,
                    context: ErrorContext::new("config")
                        .with_operation("validate")
                        .with_suggestion(
                            "Set logging.level to one of trace, debug, info, warn, error",
                        ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FundscoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workflow.settle_delay_ms, 1500);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fundscout.toml");

        let mut config = FundscoutConfig::default();
        config.workflow.search_ms = 42;
        config.save_to_file(&path).unwrap();

        let loaded = FundscoutConfig::from_file(&path).unwrap();
        assert_eq!(loaded.workflow.search_ms, 42);
        assert_eq!(loaded.workflow.queries_ms, config.workflow.queries_ms);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = FundscoutConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }
}

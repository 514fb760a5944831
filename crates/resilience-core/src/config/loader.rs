//! Configuration loader with precedence
//!
//! Loads configuration from the following sources (low to high):
//! 1. Built-in defaults
//! 2. YAML config file, if one was given
//! 3. Environment variables (RESILIENCE_* prefix)

use crate::config::{ResilienceConfig, ServiceLifetime};
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;

/// Environment variable toggling the console logger
pub const ENV_LOGGER_SUPPORT: &str = "RESILIENCE_LOGGER_SUPPORT";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "RESILIENCE_LOG_LEVEL";
/// Environment variable overriding the service lifetime
pub const ENV_LIFETIME: &str = "RESILIENCE_LIFETIME";

/// Configuration loader
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_file: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads defaults and the environment only
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that also reads the given YAML file
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
        }
    }

    /// Get the config file path, if any
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Load configuration with precedence applied
    pub fn load(&self) -> Result<ResilienceConfig> {
        let mut config = match &self.config_file {
            Some(path) => Self::load_yaml_file(path)?,
            None => ResilienceConfig::default(),
        };

        config = Self::apply_env_overrides(config)?;

        tracing::debug!(
            logger_support = config.logger_support,
            log_level = %config.log_level,
            lifetime = %config.lifetime,
            "loaded resilience configuration"
        );

        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<ResilienceConfig> {
        let config = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<ResilienceConfig> {
        if !path.exists() {
            return Err(Error::config_not_found(path.as_str()));
        }

        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(mut config: ResilienceConfig) -> Result<ResilienceConfig> {
        if let Ok(val) = env::var(ENV_LOGGER_SUPPORT) {
            config.logger_support = val.trim().parse().map_err(|_| {
                Error::invalid_config(format!("{} must be true or false", ENV_LOGGER_SUPPORT))
            })?;
        }

        if let Ok(val) = env::var(ENV_LOG_LEVEL) {
            if !val.trim().is_empty() {
                config.log_level = val.trim().to_string();
            }
        }

        if let Ok(val) = env::var(ENV_LIFETIME) {
            config.lifetime = val.parse::<ServiceLifetime>().map_err(|_| {
                Error::invalid_config(format!(
                    "{} must be one of: singleton, transient",
                    ENV_LIFETIME
                ))
            })?;
        }

        Ok(config)
    }
}

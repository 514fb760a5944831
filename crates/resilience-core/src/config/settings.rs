//! Settings that decide how an engine is wired

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Wiring settings for the retry engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResilienceConfig {
    /// Install a console logger and log every retry through it
    #[serde(default = "default_logger_support")]
    pub logger_support: bool,

    /// Minimum level for the console logger (an `EnvFilter` directive)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether resolving hands out one shared engine or a fresh one
    #[serde(default)]
    pub lifetime: ServiceLifetime,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            logger_support: default_logger_support(),
            log_level: default_log_level(),
            lifetime: ServiceLifetime::default(),
        }
    }
}

fn default_logger_support() -> bool {
    true
}
fn default_log_level() -> String {
    "debug".to_string()
}

/// How long a resolved engine lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceLifetime {
    /// Every resolve returns the same instance
    #[default]
    Singleton,

    /// Every resolve builds a new instance
    Transient,
}

impl fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceLifetime::Singleton => write!(f, "singleton"),
            ServiceLifetime::Transient => write!(f, "transient"),
        }
    }
}

impl FromStr for ServiceLifetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "singleton" => Ok(ServiceLifetime::Singleton),
            "transient" => Ok(ServiceLifetime::Transient),
            other => Err(Error::invalid_config(format!(
                "Unknown service lifetime: {}. Valid lifetimes: singleton, transient",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResilienceConfig::default();
        assert!(config.logger_support);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.lifetime, ServiceLifetime::Singleton);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ResilienceConfig = serde_yaml_ng::from_str("lifetime: transient\n").unwrap();
        assert!(config.logger_support);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.lifetime, ServiceLifetime::Transient);
    }

    #[test]
    fn test_serialization_uses_kebab_case() {
        let yaml = serde_yaml_ng::to_string(&ResilienceConfig::default()).unwrap();
        assert!(yaml.contains("logger-support: true"));
        assert!(yaml.contains("log-level: debug"));
        assert!(yaml.contains("lifetime: singleton"));
    }

    #[test]
    fn test_lifetime_from_str() {
        assert_eq!(
            "Transient".parse::<ServiceLifetime>().unwrap(),
            ServiceLifetime::Transient
        );
        assert_eq!(
            " singleton ".parse::<ServiceLifetime>().unwrap(),
            ServiceLifetime::Singleton
        );

        let err = "scoped".parse::<ServiceLifetime>().unwrap_err();
        assert!(err.to_string().contains("Unknown service lifetime: scoped"));
    }

    #[test]
    fn test_lifetime_display_round_trips() {
        for lifetime in [ServiceLifetime::Singleton, ServiceLifetime::Transient] {
            assert_eq!(lifetime.to_string().parse::<ServiceLifetime>().unwrap(), lifetime);
        }
    }
}

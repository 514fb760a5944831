//! Engine factory and service lifetimes
//!
//! [`ResilienceSupport`] collects the wiring choices (logger, observer,
//! lifetime) and builds a [`ResilienceProvider`] that resolves engines.

use std::sync::Arc;

use anyhow::{Context, Result};
use resilience_core::retry::{ResilienceRetry, RetryObserver, TracingObserver};
use resilience_core::{ConfigLoader, ResilienceConfig, ServiceLifetime};

use crate::logging::init_console_logging;

/// Builder wiring a retry engine
///
/// # Example
///
/// ```rust,no_run
/// use resilience_ioc::ResilienceSupport;
/// use resilience_core::ServiceLifetime;
///
/// let provider = ResilienceSupport::new()
///     .with_lifetime(ServiceLifetime::Transient)
///     .build()
///     .unwrap();
///
/// let retry = provider.resolve();
/// ```
#[derive(Debug, Clone)]
pub struct ResilienceSupport<O = TracingObserver> {
    logger_support: bool,
    log_level: String,
    lifetime: ServiceLifetime,
    observer: O,
}

impl Default for ResilienceSupport<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl ResilienceSupport<TracingObserver> {
    /// Create a builder with default settings
    ///
    /// Logger support on, `debug` level, singleton lifetime, and a
    /// `TracingObserver` as the notification hook.
    pub fn new() -> Self {
        Self::from_config(&ResilienceConfig::default())
    }

    /// Create a builder from loaded configuration
    pub fn from_config(config: &ResilienceConfig) -> Self {
        Self {
            logger_support: config.logger_support,
            log_level: config.log_level.clone(),
            lifetime: config.lifetime,
            observer: TracingObserver::default(),
        }
    }

    /// Create a builder from defaults overridden by RESILIENCE_* variables
    pub fn from_env() -> Result<Self> {
        let config = ConfigLoader::new()
            .load()
            .context("Failed to load resilience configuration")?;
        Ok(Self::from_config(&config))
    }
}

impl<O> ResilienceSupport<O> {
    /// Enable or disable the console logger
    pub fn with_logger_support(mut self, enabled: bool) -> Self {
        self.logger_support = enabled;
        self
    }

    /// Set the console logger's level directive
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the service lifetime
    pub fn with_lifetime(mut self, lifetime: ServiceLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Replace the notification hook
    pub fn with_observer<O2>(self, observer: O2) -> ResilienceSupport<O2> {
        ResilienceSupport {
            logger_support: self.logger_support,
            log_level: self.log_level,
            lifetime: self.lifetime,
            observer,
        }
    }

    /// Whether the console logger will be installed
    pub fn logger_support(&self) -> bool {
        self.logger_support
    }

    /// The configured service lifetime
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

impl<O> ResilienceSupport<O>
where
    O: RetryObserver + Clone,
{
    /// Build the provider, installing the console logger if enabled
    pub fn build(self) -> Result<ResilienceProvider<O>> {
        if self.logger_support {
            init_console_logging(&self.log_level)
                .context("Failed to install console logger")?;
        }

        tracing::debug!(
            lifetime = %self.lifetime,
            logger_support = self.logger_support,
            "resilience support registered"
        );

        Ok(ResilienceProvider {
            lifetime: self.lifetime,
            shared: Arc::new(ResilienceRetry::with_observer(self.observer.clone())),
            observer: self.observer,
        })
    }
}

/// Resolves retry engines according to a service lifetime
#[derive(Debug)]
pub struct ResilienceProvider<O> {
    lifetime: ServiceLifetime,
    observer: O,
    shared: Arc<ResilienceRetry<O>>,
}

impl<O> ResilienceProvider<O>
where
    O: RetryObserver + Clone,
{
    /// Resolve an engine
    ///
    /// Singleton providers hand out the same instance on every call;
    /// transient providers build a new engine around a clone of the hook.
    pub fn resolve(&self) -> Arc<ResilienceRetry<O>> {
        match self.lifetime {
            ServiceLifetime::Singleton => Arc::clone(&self.shared),
            ServiceLifetime::Transient => {
                Arc::new(ResilienceRetry::with_observer(self.observer.clone()))
            }
        }
    }

    /// The lifetime this provider resolves with
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resilience_core::retry::NoOpObserver;

    #[test]
    fn test_defaults() {
        let support = ResilienceSupport::new();
        assert!(support.logger_support());
        assert_eq!(support.lifetime(), ServiceLifetime::Singleton);
        assert_eq!(support.observer.operation(), "retry");
    }

    #[test]
    fn test_from_config() {
        let config = ResilienceConfig {
            logger_support: false,
            log_level: "warn".to_string(),
            lifetime: ServiceLifetime::Transient,
        };

        let support = ResilienceSupport::from_config(&config);
        assert!(!support.logger_support());
        assert_eq!(support.log_level, "warn");
        assert_eq!(support.lifetime(), ServiceLifetime::Transient);
    }

    #[test]
    fn test_with_observer_keeps_settings() {
        let support = ResilienceSupport::new()
            .with_logger_support(false)
            .with_lifetime(ServiceLifetime::Transient)
            .with_observer(NoOpObserver);

        assert!(!support.logger_support());
        assert_eq!(support.lifetime(), ServiceLifetime::Transient);
    }

    #[test]
    fn test_singleton_resolves_same_instance() {
        let provider = ResilienceSupport::new()
            .with_logger_support(false)
            .build()
            .unwrap();

        assert_eq!(provider.lifetime(), ServiceLifetime::Singleton);
        assert!(Arc::ptr_eq(&provider.resolve(), &provider.resolve()));
    }

    #[test]
    fn test_transient_resolves_new_instances() {
        let provider = ResilienceSupport::new()
            .with_logger_support(false)
            .with_lifetime(ServiceLifetime::Transient)
            .build()
            .unwrap();

        assert!(!Arc::ptr_eq(&provider.resolve(), &provider.resolve()));
    }
}

//! Configuration loading and management

mod loader;
mod settings;

pub use loader::{ConfigLoader, ENV_LIFETIME, ENV_LOGGER_SUPPORT, ENV_LOG_LEVEL};
pub use settings::{ResilienceConfig, ServiceLifetime};

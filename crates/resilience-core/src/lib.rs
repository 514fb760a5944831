//! # resilience-core
//!
//! Core library for resilient execution providing:
//! - Retry engine with a fixed delay and an attempt budget (blocking and async)
//! - Predicate polling until a check reaches a target value
//! - Observer hooks notified on every retry
//! - Wiring configuration (YAML file and environment overrides)

pub mod config;
pub mod error;
pub mod retry;

pub use config::{ConfigLoader, ResilienceConfig, ServiceLifetime};
pub use error::{Error, Result};
pub use retry::{Failure, ResilienceRetry, RetryError, RetryObserver};
